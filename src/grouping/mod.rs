//! Bucketing of validated records by `(genus, species)`.
//!
//! Groups are kept in first-seen order. A group is only created by a record
//! that passed coordinate validation, so a species whose rows were all
//! dropped never shows up as an empty layer.

use crate::error::Result;
use crate::records::{GroupKey, InvalidCoordinate, Lineage, Point, RawRecord, Record, Validated};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Occurrence points sharing one `(genus, species)`, in source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Group {
    entries: Vec<(Lineage, Point)>,
}

impl Group {
    pub fn push(&mut self, lineage: Lineage, point: Point) {
        self.entries.push((lineage, point));
    }

    pub fn entries(&self) -> &[(Lineage, Point)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct lineages in the order they first appear in this group.
    pub fn distinct_lineages(&self) -> Vec<&Lineage> {
        let mut seen = indexmap::IndexSet::new();
        for (lineage, _) in &self.entries {
            seen.insert(lineage);
        }
        seen.into_iter().collect()
    }
}

/// Insertion-ordered mapping from key to group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Groups {
    inner: IndexMap<GroupKey, Group>,
}

impl Groups {
    pub fn get(&self, key: &GroupKey) -> Option<&Group> {
        self.inner.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&GroupKey, &Group)> {
        self.inner.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &GroupKey> {
        self.inner.keys()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn total_points(&self) -> usize {
        self.inner.values().map(Group::len).sum()
    }
}

impl IntoIterator for Groups {
    type Item = (GroupKey, Group);
    type IntoIter = indexmap::map::IntoIter<GroupKey, Group>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

/// Row counts from one assignment pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssignmentStats {
    pub rows_read: usize,
    pub accepted: usize,
    pub missing: usize,
    pub invalid: Vec<InvalidCoordinate>,
}

/// Accumulates records into groups. Consumed by [`GroupAssigner::finish`].
#[derive(Debug, Default)]
pub struct GroupAssigner {
    sentinel: String,
    groups: IndexMap<GroupKey, Group>,
    stats: AssignmentStats,
}

impl GroupAssigner {
    pub fn new(sentinel: impl Into<String>) -> Self {
        Self {
            sentinel: sentinel.into(),
            ..Default::default()
        }
    }

    /// Validate a raw row and assign it if its coordinates are usable.
    pub fn assign_raw(&mut self, raw: &RawRecord) {
        self.stats.rows_read += 1;
        match raw.validate(&self.sentinel) {
            Validated::Accepted(record) => self.assign(record),
            Validated::Missing => {
                debug!("Skipping line {} with missing coordinates", raw.line);
                self.stats.missing += 1;
            }
            Validated::Invalid(invalid) => {
                warn!("Dropping row, {}", invalid);
                self.stats.invalid.push(invalid);
            }
        }
    }

    /// Append an already validated record to its group.
    pub fn assign(&mut self, record: Record) {
        let Record { key, lineage, point } = record;
        self.stats.accepted += 1;
        if !self.groups.contains_key(&key) {
            debug!("Creating group {}", key.layer_name());
        }
        self.groups.entry(key).or_default().push(lineage, point);
    }

    /// Drain a record stream. Stops at the first structural error.
    pub fn assign_all<I>(&mut self, rows: I) -> Result<()>
    where
        I: IntoIterator<Item = Result<RawRecord>>,
    {
        for row in rows {
            self.assign_raw(&row?);
        }
        Ok(())
    }

    pub fn finish(self) -> (Groups, AssignmentStats) {
        info!(
            "Assigned {} of {} rows to {} groups ({} missing, {} invalid)",
            self.stats.accepted,
            self.stats.rows_read,
            self.groups.len(),
            self.stats.missing,
            self.stats.invalid.len()
        );
        (Groups { inner: self.groups }, self.stats)
    }
}
