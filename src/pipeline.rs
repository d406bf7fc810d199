//! End-to-end run: base map, records, grouping, styling, rendering.
//!
//! Every stage is driven from here with explicit local state. The record
//! source is opened and closed inside [`plan_path`], so it never outlives the
//! grouping pass.

use crate::basemap::{BaseLayer, BaseMapLoader, BaseMapPolicy, FillStyle};
use crate::config::PipelineConfig;
use crate::error::{Error, Result};
use crate::grouping::{AssignmentStats, GroupAssigner};
use crate::records::RecordReader;
use crate::sink::LayerSink;
use crate::style::{PlannedGroup, StylePlanner};
use serde::Serialize;
use std::io;
use std::path::Path;
use tracing::{error, info};

/// Grouped and styled layers plus the row statistics that produced them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plan {
    pub layers: Vec<PlannedGroup>,
    pub stats: AssignmentStats,
}

/// Read, group and style every record from `reader`.
pub fn plan_records<R: io::Read>(reader: RecordReader<R>, sentinel: &str, seed: u64) -> Result<Plan> {
    let mut assigner = GroupAssigner::new(sentinel);
    assigner.assign_all(reader)?;
    let (groups, stats) = assigner.finish();
    let layers = StylePlanner::new(seed).plan(groups);
    Ok(Plan { layers, stats })
}

/// Like [`plan_records`], reading from a CSV file.
pub fn plan_path(path: &Path, sentinel: &str, seed: u64) -> Result<Plan> {
    info!("Reading occurrence records from {}", path.display());
    let reader = RecordReader::from_path(path)?;
    plan_records(reader, sentinel, seed)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BaseMapStatus {
    NotConfigured,
    Loaded { layer: BaseLayer },
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineReport {
    pub base_map: BaseMapStatus,
    pub layers: Vec<String>,
    pub stats: AssignmentStats,
}

pub struct Pipeline<L: BaseMapLoader> {
    config: PipelineConfig,
    loader: L,
}

impl<L: BaseMapLoader> Pipeline<L> {
    pub fn new(config: PipelineConfig, loader: L) -> Self {
        Self { config, loader }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    fn load_base_map<S: LayerSink>(&self, sink: &mut S) -> Result<BaseMapStatus> {
        let Some(source) = self.config.base_map.as_deref() else {
            return Ok(BaseMapStatus::NotConfigured);
        };

        match self.loader.load(source) {
            Ok(layer) => {
                info!("Loaded base map {}", layer.name);
                let fill = FillStyle {
                    color: self.config.base_map_fill,
                };
                sink.add_base_layer(&layer, &fill)?;
                Ok(BaseMapStatus::Loaded { layer })
            }
            Err(e) => match self.config.base_map_policy {
                BaseMapPolicy::Abort => Err(Error::BaseMapLoad(e)),
                BaseMapPolicy::Continue => {
                    error!("Failed to load base map: {}", e);
                    Ok(BaseMapStatus::Failed {
                        reason: e.to_string(),
                    })
                }
            },
        }
    }

    /// Run every stage and hand the results to `sink`.
    ///
    /// Under [`BaseMapPolicy::Abort`] a base map failure returns before the
    /// record source is opened and before the sink sees any layer.
    pub fn run<S: LayerSink>(&self, mut sink: S) -> Result<PipelineReport> {
        let base_map = self.load_base_map(&mut sink)?;

        let plan = plan_path(
            self.config.records_path()?,
            &self.config.missing_sentinel,
            self.config.seed,
        )?;

        let mut layers = Vec::with_capacity(plan.layers.len());
        for layer in &plan.layers {
            sink.add_point_layer(layer)?;
            layers.push(layer.layer_name());
        }
        sink.refresh()?;

        Ok(PipelineReport {
            base_map,
            layers,
            stats: plan.stats,
        })
    }
}
