//! Pipeline configuration
//!
//! Values come from an optional TOML file and are then overridden by
//! command-line flags. Relative paths in a config file are resolved against
//! the directory the file lives in.

use crate::basemap::{BaseMapPolicy, DEFAULT_FILL};
use crate::error::{Error, Result};
use crate::style::{Rgb, DEFAULT_SEED};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_SENTINEL: &str = "NA";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Occurrence CSV
    pub records: Option<PathBuf>,
    /// Base polygon shapefile; the base layer is skipped when unset
    pub base_map: Option<PathBuf>,
    pub seed: u64,
    pub missing_sentinel: String,
    pub base_map_fill: Rgb,
    pub base_map_policy: BaseMapPolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            records: None,
            base_map: None,
            seed: DEFAULT_SEED,
            missing_sentinel: DEFAULT_SENTINEL.to_string(),
            base_map_fill: DEFAULT_FILL,
            base_map_policy: BaseMapPolicy::default(),
        }
    }
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub records: Option<PathBuf>,
    pub base_map: Option<PathBuf>,
    pub seed: Option<u64>,
    pub missing_sentinel: Option<String>,
    pub base_map_fill: Option<Rgb>,
    pub base_map_policy: Option<BaseMapPolicy>,
}

impl PipelineConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading configuration from {}", path.display());
        let content = fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&content)?;
        if let Some(base) = path.parent() {
            config.records = config.records.map(|p| resolve_relative(base, p));
            config.base_map = config.base_map.map(|p| resolve_relative(base, p));
        }
        Ok(config)
    }

    /// Load the file if one is given, apply overrides, then validate.
    pub fn resolve(file: Option<&Path>, overrides: ConfigOverrides) -> Result<Self> {
        let mut config = match file {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply(overrides);
        config.missing_sentinel = config.missing_sentinel.trim().to_string();
        config.validate()?;
        Ok(config)
    }

    pub fn apply(&mut self, overrides: ConfigOverrides) {
        if let Some(records) = overrides.records {
            self.records = Some(records);
        }
        if let Some(base_map) = overrides.base_map {
            self.base_map = Some(base_map);
        }
        if let Some(seed) = overrides.seed {
            self.seed = seed;
        }
        if let Some(sentinel) = overrides.missing_sentinel {
            self.missing_sentinel = sentinel;
        }
        if let Some(fill) = overrides.base_map_fill {
            self.base_map_fill = fill;
        }
        if let Some(policy) = overrides.base_map_policy {
            self.base_map_policy = policy;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.missing_sentinel.trim().is_empty() {
            return Err(Error::Config(
                "missing_sentinel must not be empty".to_string(),
            ));
        }
        if self.records.is_none() {
            return Err(Error::Config("no record source configured".to_string()));
        }
        Ok(())
    }

    pub fn records_path(&self) -> Result<&Path> {
        self.records
            .as_deref()
            .ok_or_else(|| Error::Config("no record source configured".to_string()))
    }
}

fn resolve_relative(base: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}
