//! Property-based tests for grouping and styling

#[cfg(test)]
mod tests {
    use crate::grouping::GroupAssigner;
    use crate::records::{GroupKey, RawRecord};
    use crate::style::StylePlanner;
    use proptest::prelude::*;

    fn coordinate() -> impl Strategy<Value = String> {
        prop_oneof![
            6 => (-90.0f64..90.0).prop_map(|v| format!("{v:.4}")),
            1 => Just("NA".to_string()),
            1 => "[a-z]{1,4}",
        ]
    }

    fn row() -> impl Strategy<Value = RawRecord> {
        (
            prop::sample::select(vec!["Egernia", "Ctenotus", "Varanus"]),
            prop::sample::select(vec!["a", "b"]),
            prop::sample::select(vec!["", "L1", "L2", "L3", "NA"]),
            coordinate(),
            coordinate(),
        )
            .prop_map(|(genus, species, lineage, latitude, longitude)| RawRecord {
                line: 0,
                genus: genus.to_string(),
                species: species.to_string(),
                lineage: lineage.to_string(),
                latitude,
                longitude,
            })
    }

    // Property test: every valid row lands in exactly one group, the rest are accounted for
    proptest! {
        #[test]
        fn test_rows_are_partitioned(rows in prop::collection::vec(row(), 0..60)) {
            let mut assigner = GroupAssigner::new("NA");
            for raw in &rows {
                assigner.assign_raw(raw);
            }
            let (groups, stats) = assigner.finish();

            prop_assert_eq!(stats.rows_read, rows.len());
            prop_assert_eq!(stats.accepted + stats.missing + stats.invalid.len(), rows.len());
            prop_assert_eq!(groups.total_points(), stats.accepted);
            for (_, group) in groups.iter() {
                prop_assert!(!group.is_empty());
            }

            let keys: Vec<&GroupKey> = groups.keys().collect();
            let mut deduped = keys.clone();
            deduped.sort();
            deduped.dedup();
            prop_assert_eq!(deduped.len(), keys.len());
        }
    }

    // Property test: planning is a pure function of input order and seed
    proptest! {
        #[test]
        fn test_planning_is_deterministic(
            rows in prop::collection::vec(row(), 0..40),
            seed in any::<u64>(),
        ) {
            let plan = |rows: &[RawRecord]| {
                let mut assigner = GroupAssigner::new("NA");
                for raw in rows {
                    assigner.assign_raw(raw);
                }
                StylePlanner::new(seed).plan(assigner.finish().0)
            };
            let first = plan(&rows);
            let second = plan(&rows);
            prop_assert_eq!(&first, &second);

            for layer in &first {
                prop_assert_eq!(layer.plan.len(), layer.group.distinct_lineages().len());
                for (lineage, _) in layer.group.entries() {
                    prop_assert!(layer.plan.color_of(lineage).is_some());
                }
            }
        }
    }
}
