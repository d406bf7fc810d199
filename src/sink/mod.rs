//! Rendering collaborators
//!
//! The pipeline hands finished layers to a [`LayerSink`]. A GIS host would
//! implement this against its own project and canvas; the crate ships a
//! GeoJSON exporter and a plain-text summary.

pub mod geojson;
pub mod summary;

pub use geojson::GeoJsonExporter;
pub use summary::SummarySink;

use crate::basemap::{BaseLayer, FillStyle};
use crate::error::Result;
use crate::style::PlannedGroup;

pub trait LayerSink {
    /// Display the base polygons with a single fill.
    fn add_base_layer(&mut self, layer: &BaseLayer, fill: &FillStyle) -> Result<()>;

    /// Register one point layer with its categorical style.
    fn add_point_layer(&mut self, layer: &PlannedGroup) -> Result<()>;

    /// Called once after every layer has been added.
    fn refresh(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<S: LayerSink + ?Sized> LayerSink for &mut S {
    fn add_base_layer(&mut self, layer: &BaseLayer, fill: &FillStyle) -> Result<()> {
        (**self).add_base_layer(layer, fill)
    }

    fn add_point_layer(&mut self, layer: &PlannedGroup) -> Result<()> {
        (**self).add_point_layer(layer)
    }

    fn refresh(&mut self) -> Result<()> {
        (**self).refresh()
    }
}

impl<S: LayerSink + ?Sized> LayerSink for Box<S> {
    fn add_base_layer(&mut self, layer: &BaseLayer, fill: &FillStyle) -> Result<()> {
        (**self).add_base_layer(layer, fill)
    }

    fn add_point_layer(&mut self, layer: &PlannedGroup) -> Result<()> {
        (**self).add_point_layer(layer)
    }

    fn refresh(&mut self) -> Result<()> {
        (**self).refresh()
    }
}

/// Replace characters that are awkward in file names.
pub fn file_stem_for(layer_name: &str) -> String {
    layer_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}
