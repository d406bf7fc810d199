//! Coordinate validation for raw occurrence rows.

use super::types::{GroupKey, InvalidCoordinate, Lineage, Point, RawRecord, Record, Validated};

/// Parse a single coordinate cell as a finite decimal number.
pub fn parse_coordinate(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Whether a coordinate cell carries the missing-value sentinel.
pub fn is_sentinel(raw: &str, sentinel: &str) -> bool {
    raw.trim() == sentinel.trim()
}

impl RawRecord {
    /// Validate coordinates and build a [`Record`].
    ///
    /// The sentinel wins over malformed input: a row with `NA` in one
    /// coordinate and garbage in the other is `Missing`, not `Invalid`.
    pub fn validate(&self, sentinel: &str) -> Validated {
        if is_sentinel(&self.latitude, sentinel) || is_sentinel(&self.longitude, sentinel) {
            return Validated::Missing;
        }

        match (
            parse_coordinate(&self.latitude),
            parse_coordinate(&self.longitude),
        ) {
            (Some(latitude), Some(longitude)) => Validated::Accepted(Record {
                key: GroupKey::new(self.genus.clone(), self.species.clone()),
                lineage: Lineage::from_raw(&self.lineage, sentinel),
                point: Point::new(longitude, latitude),
            }),
            _ => Validated::Invalid(InvalidCoordinate {
                line: self.line,
                latitude: self.latitude.clone(),
                longitude: self.longitude.clone(),
            }),
        }
    }
}
