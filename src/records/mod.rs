//! Occurrence record source
//!
//! Reads delimited text with a header row into a lazy sequence of
//! [`RawRecord`]s. The header is checked up front: a missing required column
//! fails the whole run before any row is read.

pub mod coordinates;
pub mod types;

pub use coordinates::{is_sentinel, parse_coordinate};
pub use types::{GroupKey, InvalidCoordinate, Lineage, Point, RawRecord, Record, Validated};

use crate::error::{Error, Result};
use std::fs::File;
use std::io;
use std::path::Path;
use tracing::debug;

pub const GENUS: &str = "genus";
pub const SPECIES: &str = "species";
pub const LINEAGE: &str = "lineage";
pub const LATITUDE: &str = "decimal_latitude";
pub const LONGITUDE: &str = "decimal_longitude";

pub const REQUIRED_COLUMNS: [&str; 5] = [GENUS, SPECIES, LINEAGE, LATITUDE, LONGITUDE];

/// Positions of the required columns within a header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnIndex {
    genus: usize,
    species: usize,
    lineage: usize,
    latitude: usize,
    longitude: usize,
}

impl ColumnIndex {
    fn resolve(headers: &csv::StringRecord) -> Result<Self> {
        let position = |name: &str| headers.iter().position(|h| h.trim() == name);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|name| position(*name).is_none())
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(Error::MissingField { missing });
        }

        let lookup = |name: &str| {
            position(name).ok_or_else(|| Error::MissingField {
                missing: vec![name.to_string()],
            })
        };
        Ok(Self {
            genus: lookup(GENUS)?,
            species: lookup(SPECIES)?,
            lineage: lookup(LINEAGE)?,
            latitude: lookup(LATITUDE)?,
            longitude: lookup(LONGITUDE)?,
        })
    }
}

/// Streaming reader over an occurrence CSV.
///
/// Owns its source; the underlying file is closed when the reader is dropped,
/// whether iteration finished or stopped early on an error.
pub struct RecordReader<R: io::Read> {
    reader: csv::Reader<R>,
    columns: ColumnIndex,
    row: csv::StringRecord,
}

impl RecordReader<File> {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Opening record source {}", path.display());
        let file = File::open(path)?;
        Self::new(file)
    }
}

impl<R: io::Read> RecordReader<R> {
    pub fn new(source: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(source);
        let columns = ColumnIndex::resolve(reader.headers()?)?;

        Ok(Self {
            reader,
            columns,
            row: csv::StringRecord::new(),
        })
    }

    fn current(&self) -> RawRecord {
        let field = |index: usize| self.row.get(index).unwrap_or_default().to_string();
        RawRecord {
            line: self.row.position().map(|p| p.line()).unwrap_or_default(),
            genus: field(self.columns.genus),
            species: field(self.columns.species),
            lineage: field(self.columns.lineage),
            latitude: field(self.columns.latitude),
            longitude: field(self.columns.longitude),
        }
    }
}

impl<R: io::Read> Iterator for RecordReader<R> {
    type Item = Result<RawRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_record(&mut self.row) {
            Ok(true) => Some(Ok(self.current())),
            Ok(false) => None,
            Err(e) => Some(Err(e.into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "genus,species,lineage,decimal_latitude,decimal_longitude\n";

    fn read_all(data: &str) -> Result<Vec<RawRecord>> {
        RecordReader::new(data.as_bytes())?.collect()
    }

    #[test]
    fn test_reads_rows_in_order() {
        let data = format!("{HEADER}Ctenotus,pantherinus,L1,-20.0,130.0\nCtenotus,pantherinus,L2,-21.0,131.0\n");
        let rows = read_all(&data).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].lineage, "L1");
        assert_eq!(rows[0].line, 2);
        assert_eq!(rows[1].lineage, "L2");
        assert_eq!(rows[1].latitude, "-21.0");
        assert_eq!(rows[1].line, 3);
    }

    #[test]
    fn test_extra_columns_ignored_and_order_free() {
        let data = "id,decimal_longitude,lineage,note,species,genus,decimal_latitude\n\
                    7,135.5,north,seen,stokesii,Egernia,-25.1\n";
        let rows = read_all(data).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].genus, "Egernia");
        assert_eq!(rows[0].species, "stokesii");
        assert_eq!(rows[0].lineage, "north");
        assert_eq!(rows[0].latitude, "-25.1");
        assert_eq!(rows[0].longitude, "135.5");
    }

    #[test]
    fn test_missing_columns_fail_before_rows() {
        let data = "genus,species,decimal_latitude\nA,b,1.0\n";
        match RecordReader::new(data.as_bytes()) {
            Err(Error::MissingField { missing }) => {
                assert_eq!(missing, vec!["lineage", "decimal_longitude"]);
            }
            Err(e) => panic!("unexpected error: {e}"),
            Ok(_) => panic!("expected missing field error"),
        }
    }

    #[test]
    fn test_header_names_are_trimmed() {
        let data = " genus , species ,lineage,decimal_latitude, decimal_longitude\nA,b,,1,2\n";
        let rows = read_all(data).unwrap();
        assert_eq!(rows[0].longitude, "2");
    }

    #[test]
    fn test_short_row_yields_empty_fields() {
        let data = format!("{HEADER}A,b,L1,1.0\n");
        let rows = read_all(&data).unwrap();
        assert_eq!(rows[0].longitude, "");
    }

    #[test]
    fn test_empty_source_has_no_rows() {
        let rows = read_all(HEADER).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_from_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{HEADER}A,b,L1,1.0,2.0").unwrap();
        let rows: Vec<_> = RecordReader::from_path(file.path())
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_from_path_missing_file() {
        let result = RecordReader::from_path("/nonexistent/occurrences.csv");
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
