//! Categorical lineage styling
//!
//! Colors are drawn from a generator seeded once per planning pass, walking
//! groups in first-seen order and, inside each group, lineages in first-seen
//! order. Each lineage consumes three draws (red, green, blue). Given the same
//! input order and seed, the colors are identical across runs. Colors are not
//! guaranteed to be distinct.

pub mod color;

pub use color::Rgb;

use crate::grouping::{Group, Groups};
use crate::records::{GroupKey, Lineage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info};

pub const DEFAULT_SEED: u64 = 42;

/// One styled category of a layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub lineage: Lineage,
    pub color: Rgb,
}

impl Category {
    pub fn label(&self) -> &str {
        self.lineage.label()
    }
}

/// Lineage to color mapping for one group, in planning order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StylePlan {
    categories: Vec<Category>,
}

impl StylePlan {
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn color_of(&self, lineage: &Lineage) -> Option<Rgb> {
        self.categories
            .iter()
            .find(|c| &c.lineage == lineage)
            .map(|c| c.color)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// A group ready for rendering: its points and its style plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedGroup {
    pub key: GroupKey,
    pub group: Group,
    pub plan: StylePlan,
}

impl PlannedGroup {
    pub fn layer_name(&self) -> String {
        self.key.layer_name()
    }
}

pub struct StylePlanner {
    rng: StdRng,
}

impl StylePlanner {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn next_color(&mut self) -> Rgb {
        let r = self.rng.random_range(0..=255);
        let g = self.rng.random_range(0..=255);
        let b = self.rng.random_range(0..=255);
        Rgb::new(r, g, b)
    }

    /// Plan a single group. Advances the generator by three draws per
    /// distinct lineage.
    pub fn plan_group(&mut self, group: &Group) -> StylePlan {
        let categories = group
            .distinct_lineages()
            .into_iter()
            .map(|lineage| Category {
                lineage: lineage.clone(),
                color: self.next_color(),
            })
            .collect();
        StylePlan { categories }
    }

    /// Plan every group in order, consuming the grouping result.
    pub fn plan(mut self, groups: Groups) -> Vec<PlannedGroup> {
        let planned: Vec<PlannedGroup> = groups
            .into_iter()
            .map(|(key, group)| {
                let plan = self.plan_group(&group);
                debug!("Planned {} categories for {}", plan.len(), key.layer_name());
                PlannedGroup { key, group, plan }
            })
            .collect();
        info!("Planned styles for {} groups", planned.len());
        planned
    }
}

impl Default for StylePlanner {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}
