use crate::basemap::BaseMapError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required column(s): {}", .missing.join(", "))]
    MissingField { missing: Vec<String> },

    #[error("Base map error: {0}")]
    BaseMapLoad(#[from] BaseMapError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_lists_every_column() {
        let err = Error::MissingField {
            missing: vec!["lineage".to_string(), "decimal_latitude".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Missing required column(s): lineage, decimal_latitude"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("gone"));
    }
}
