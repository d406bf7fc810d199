//! Base polygon layer
//!
//! The pipeline only needs to know whether the base layer could be loaded and
//! what to hand to the sink. Loading is behind [`BaseMapLoader`] so hosts can
//! plug in their own reader; [`ShapefileLoader`] checks an ESRI shapefile
//! without pulling in a GIS engine.

pub mod shapefile;

pub use shapefile::{ShapeType, ShapefileLoader};

use crate::style::Rgb;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Light gray used for base polygons unless configured otherwise.
pub const DEFAULT_FILL: Rgb = Rgb::new(0xf0, 0xf0, 0xf0);

#[derive(Error, Debug)]
pub enum BaseMapError {
    #[error("base map '{}' does not exist", .0.display())]
    NotFound(PathBuf),

    #[error("base map '{}' is missing companion file '{}'", .path.display(), .companion.display())]
    MissingCompanion { path: PathBuf, companion: PathBuf },

    #[error("base map '{}' is not a shapefile: {reason}", .path.display())]
    Invalid { path: PathBuf, reason: String },

    #[error("failed to read base map '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Bounding box in layer coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Extent {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

/// A validated base layer, ready to be displayed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaseLayer {
    pub name: String,
    pub source: PathBuf,
    pub shape_type: ShapeType,
    pub extent: Extent,
}

/// Fixed fill applied to every base polygon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FillStyle {
    pub color: Rgb,
}

impl Default for FillStyle {
    fn default() -> Self {
        Self {
            color: DEFAULT_FILL,
        }
    }
}

/// What a failed base map load means for the rest of the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseMapPolicy {
    /// Report the failure and keep processing records
    #[default]
    Continue,
    /// Stop before any record is read
    Abort,
}

impl std::str::FromStr for BaseMapPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "continue" => Ok(BaseMapPolicy::Continue),
            "abort" => Ok(BaseMapPolicy::Abort),
            other => Err(format!(
                "unknown base map policy '{}', expected 'continue' or 'abort'",
                other
            )),
        }
    }
}

pub trait BaseMapLoader {
    fn load(&self, source: &Path) -> Result<BaseLayer, BaseMapError>;
}

/// Layer name derived from the resource's file stem.
pub fn layer_name(source: &Path) -> String {
    source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("base map")
        .to_string()
}
