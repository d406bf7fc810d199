use serde::Serialize;
use std::fmt;

/// One CSV row with the five columns the pipeline cares about, unparsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// 1-based line in the source, for diagnostics
    pub line: u64,
    pub genus: String,
    pub species: String,
    pub lineage: String,
    pub latitude: String,
    pub longitude: String,
}

/// A record that passed coordinate validation.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub key: GroupKey,
    pub lineage: Lineage,
    pub point: Point,
}

/// Outcome of validating a raw row.
#[derive(Debug, Clone, PartialEq)]
pub enum Validated {
    Accepted(Record),
    /// A coordinate carried the missing-value sentinel
    Missing,
    Invalid(InvalidCoordinate),
}

/// A row dropped because a coordinate was neither a number nor the sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvalidCoordinate {
    pub line: u64,
    pub latitude: String,
    pub longitude: String,
}

impl fmt::Display for InvalidCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}: invalid latitude or longitude value: {}, {}",
            self.line, self.latitude, self.longitude
        )
    }
}

/// Composite grouping key. Genus and species are taken verbatim from the source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct GroupKey {
    pub genus: String,
    pub species: String,
}

impl GroupKey {
    pub fn new(genus: impl Into<String>, species: impl Into<String>) -> Self {
        Self {
            genus: genus.into(),
            species: species.into(),
        }
    }

    /// Name used for the point layer, `genus_species`
    pub fn layer_name(&self) -> String {
        format!("{}_{}", self.genus, self.species)
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.genus, self.species)
    }
}

/// Styling category within a species.
///
/// Empty cells and the missing-value sentinel collapse into `Unspecified`,
/// which is planned and colored like any named lineage. Serializes as the
/// lineage string, or `null` when unspecified.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Lineage {
    Named(String),
    Unspecified,
}

impl Lineage {
    pub fn from_raw(raw: &str, sentinel: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == sentinel.trim() {
            Lineage::Unspecified
        } else {
            Lineage::Named(trimmed.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Lineage::Named(name) => name,
            Lineage::Unspecified => "unspecified",
        }
    }
}

impl fmt::Display for Lineage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Occurrence location, x = longitude, y = latitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub longitude: f64,
    pub latitude: f64,
}

impl Point {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }
}
