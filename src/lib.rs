//! # occurrence-layers
//!
//! Turns a CSV of species occurrence records into one point layer per
//! genus/species, with each lineage drawn in a reproducible color.
//!
//! ## Usage
//!
//! ```bash
//! occurrence-layers run --records data/example.csv --base-map data/aust_cd66states.shp
//! occurrence-layers plan --records data/example.csv --format json
//! ```
//!
//! ## Modules
//!
//! - `records` - Header-checked streaming CSV reader and coordinate validation
//! - `grouping` - Insertion-ordered bucketing by `(genus, species)`
//! - `style` - Seeded categorical colors per lineage
//! - `basemap` - Base polygon loading behind a trait, with a shapefile checker
//! - `sink` - Rendering collaborators (GeoJSON export, text summary)
//! - `pipeline` - Drives every stage for one run
//! - `config` - TOML configuration with command-line overrides
//! - `cli` - Argument parsing and command routing
pub mod basemap;
pub mod cli;
pub mod config;
pub mod error;
pub mod grouping;
pub mod pipeline;
pub mod records;
pub mod sink;
pub mod style;

mod property_tests;

pub use error::{Error, Result};
