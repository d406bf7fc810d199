use super::{file_stem_for, LayerSink};
use crate::basemap::{BaseLayer, FillStyle};
use crate::error::Result;
use crate::style::PlannedGroup;
use serde_json::{json, Value};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const BASE_LAYER_FILE: &str = "base_layer.json";
pub const INDEX_FILE: &str = "layers.json";

/// Writes each point layer as a GeoJSON FeatureCollection.
///
/// Features carry `lineage` and `marker-color` properties; the collection
/// lists its categories in plan order. `refresh` writes an index of the
/// layer files in the order they were added. Layers whose names clean up to
/// the same file stem get a numeric suffix (`_2`, `_3`, ...).
pub struct GeoJsonExporter {
    out_dir: PathBuf,
    written: Vec<String>,
    stems: HashSet<String>,
    base_layer: Option<String>,
}

impl GeoJsonExporter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Result<Self> {
        let out_dir = out_dir.into();
        fs::create_dir_all(&out_dir)?;
        Ok(Self {
            out_dir,
            written: Vec::new(),
            stems: HashSet::new(),
            base_layer: None,
        })
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Claim a file stem not yet used by this exporter.
    ///
    /// Compared case-insensitively so layers stay distinct on
    /// case-folding filesystems.
    fn claim_stem(&mut self, layer_name: &str) -> String {
        let base = file_stem_for(layer_name);
        let mut stem = base.clone();
        let mut suffix = 2;
        while !self.stems.insert(stem.to_lowercase()) {
            stem = format!("{base}_{suffix}");
            suffix += 1;
        }
        if stem != base {
            debug!("Layer {} exported as {}", layer_name, stem);
        }
        stem
    }

    fn write_json(&self, file_name: &str, value: &Value) -> Result<PathBuf> {
        let path = self.out_dir.join(file_name);
        fs::write(&path, serde_json::to_string_pretty(value)?)?;
        debug!("Wrote {}", path.display());
        Ok(path)
    }
}

pub fn feature_collection(layer: &PlannedGroup) -> Value {
    let features: Vec<Value> = layer
        .group
        .entries()
        .iter()
        .map(|(lineage, point)| {
            let color = layer.plan.color_of(lineage).map(|c| c.hex());
            json!({
                "type": "Feature",
                "geometry": {
                    "type": "Point",
                    "coordinates": [point.longitude, point.latitude],
                },
                "properties": {
                    "lineage": lineage,
                    "marker-color": color,
                },
            })
        })
        .collect();

    let categories: Vec<Value> = layer
        .plan
        .categories()
        .iter()
        .map(|c| json!({ "label": c.label(), "lineage": c.lineage, "color": c.color }))
        .collect();

    json!({
        "type": "FeatureCollection",
        "name": layer.layer_name(),
        "genus": layer.key.genus,
        "species": layer.key.species,
        "categories": categories,
        "features": features,
    })
}

impl LayerSink for GeoJsonExporter {
    fn add_base_layer(&mut self, layer: &BaseLayer, fill: &FillStyle) -> Result<()> {
        let value = json!({
            "name": layer.name,
            "source": layer.source,
            "shape_type": layer.shape_type,
            "extent": layer.extent,
            "fill": fill.color,
        });
        self.write_json(BASE_LAYER_FILE, &value)?;
        self.base_layer = Some(BASE_LAYER_FILE.to_string());
        Ok(())
    }

    fn add_point_layer(&mut self, layer: &PlannedGroup) -> Result<()> {
        let file_name = format!("{}.geojson", self.claim_stem(&layer.layer_name()));
        self.write_json(&file_name, &feature_collection(layer))?;
        self.written.push(file_name);
        Ok(())
    }

    fn refresh(&mut self) -> Result<()> {
        let index = json!({
            "base_layer": self.base_layer,
            "layers": self.written,
        });
        self.write_json(INDEX_FILE, &index)?;
        info!(
            "Exported {} layers to {}",
            self.written.len(),
            self.out_dir.display()
        );
        Ok(())
    }
}
