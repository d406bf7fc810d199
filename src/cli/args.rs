//! CLI argument structures

use crate::basemap::BaseMapPolicy;
use crate::config::ConfigOverrides;
use crate::style::Rgb;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Split occurrence records into per-species point layers with lineage colors
#[derive(Parser)]
#[command(name = "occurrence-layers")]
#[command(about = "occurrence-layers - Group occurrence records into colored species layers", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace, -vvv adds line numbers)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load the base map and records, then render every species layer
    #[command(name = "run")]
    Run {
        #[command(flatten)]
        input: InputArgs,

        /// Base polygon shapefile
        #[arg(short = 'b', long, value_name = "SHP")]
        base_map: Option<PathBuf>,

        /// Fill color for base polygons (#rrggbb)
        #[arg(long, value_name = "COLOR")]
        fill: Option<Rgb>,

        /// What to do when the base map cannot be loaded
        #[arg(long, value_name = "POLICY")]
        base_map_policy: Option<BaseMapPolicy>,

        /// Export layers as GeoJSON into this directory instead of printing a summary
        #[arg(short = 'o', long, value_name = "DIR")]
        out: Option<PathBuf>,
    },

    /// Group and style records without rendering, printing the plan
    #[command(name = "plan")]
    Plan {
        #[command(flatten)]
        input: InputArgs,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

/// Record source options shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Occurrence CSV with genus, species, lineage, decimal_latitude, decimal_longitude
    #[arg(short = 'r', long, value_name = "CSV")]
    pub records: Option<PathBuf>,

    /// Seed for lineage colors
    #[arg(long)]
    pub seed: Option<u64>,

    /// Coordinate value meaning "missing"
    #[arg(long, value_name = "TEXT")]
    pub sentinel: Option<String>,

    /// Path to configuration file
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,
}

impl InputArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            records: self.records.clone(),
            seed: self.seed,
            missing_sentinel: self.sentinel.clone(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
