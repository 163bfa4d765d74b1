use std::collections::HashSet;

use cellclique::cluster::{CliqueGrouping, Clustering};
use cellclique::{Cell, ProximityGraph, SpatialIndex};
use proptest::prelude::*;

const LABELS: &[&str] = &["A", "B", "C", "D"];

/// Cells with unique ids `1..=n`, integer coordinates and a random label subset.
fn cells_strategy(max_len: usize) -> impl Strategy<Value = Vec<Cell>> {
    prop::collection::vec(
        (-30i32..30, -30i32..30, prop::collection::vec(0usize..LABELS.len(), 0..3)),
        0..max_len,
    )
    .prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(i, (x, y, labels))| {
                Cell::new(
                    i as i64 + 1,
                    f64::from(x),
                    f64::from(y),
                    labels.into_iter().map(|l| LABELS[l]),
                )
            })
            .collect()
    })
}

fn radius_strategy() -> impl Strategy<Value = f64> {
    prop::sample::select(vec![0.5, 1.0, 1.5, 2.0, 3.0, 4.5, 7.0])
}

proptest! {
    #[test]
    fn prop_index_matches_brute_force(cells in cells_strategy(60), radius in radius_strategy()) {
        let index = SpatialIndex::build(&cells, radius).unwrap();
        let indexed = ProximityGraph::build(&cells, &index, radius).unwrap();
        let oracle = ProximityGraph::brute_force(&cells, radius).unwrap();

        prop_assert!(indexed.is_symmetric());
        prop_assert_eq!(indexed.edges(), oracle.edges());
        prop_assert_eq!(indexed, oracle);
    }

    #[test]
    fn prop_groups_partition_into_cliques(
        cells in cells_strategy(60),
        radius in radius_strategy(),
        split in any::<bool>(),
    ) {
        let solution = CliqueGrouping::new(radius)
            .with_component_split(split)
            .solve(&cells)
            .unwrap();

        // Every id exactly once.
        let mut seen = HashSet::new();
        for clique in &solution.cliques {
            for &id in clique {
                prop_assert!(seen.insert(id), "id {} covered twice", id);
            }
        }
        prop_assert_eq!(seen.len(), cells.len());

        // Pairwise compatible within each clique.
        let by_id = |id: i64| &cells[(id - 1) as usize];
        for clique in &solution.cliques {
            for (i, &a) in clique.iter().enumerate() {
                for &b in &clique[i + 1..] {
                    prop_assert!(solution.graph.contains_edge(a, b));
                    prop_assert!(by_id(a).distance(by_id(b)) <= radius);
                    prop_assert!(by_id(a).shares_label(by_id(b)));
                }
            }
        }

        // Sequential numbering from 1.
        let assignment = &solution.assignment;
        prop_assert_eq!(assignment.len(), cells.len());
        prop_assert_eq!(assignment.group_count(), solution.cliques.len());
        for (k, clique) in solution.cliques.iter().enumerate() {
            for &id in clique {
                prop_assert_eq!(assignment.group_of(id), Some(k + 1));
            }
        }
    }

    #[test]
    fn prop_cliques_stay_inside_components(cells in cells_strategy(60), radius in radius_strategy()) {
        let solution = CliqueGrouping::new(radius).solve(&cells).unwrap();

        let mut component_of = std::collections::HashMap::new();
        for (c, component) in solution.components.iter().enumerate() {
            for &id in component {
                prop_assert!(component_of.insert(id, c).is_none());
            }
        }
        prop_assert_eq!(component_of.len(), cells.len());

        for clique in &solution.cliques {
            let first = component_of[&clique[0]];
            prop_assert!(clique.iter().all(|id| component_of[id] == first));
        }

        // No edge leaves a component.
        for (a, b) in solution.graph.edges() {
            prop_assert_eq!(component_of[&a], component_of[&b]);
        }
    }

    #[test]
    fn prop_deterministic(cells in cells_strategy(40), radius in radius_strategy()) {
        let grouping = CliqueGrouping::new(radius);
        let first = grouping.group(&cells).unwrap();
        let second = grouping.group(&cells).unwrap();
        prop_assert_eq!(first, second);

        // Input order does not affect the id -> group mapping.
        let mut reversed = cells.clone();
        reversed.reverse();
        prop_assert_eq!(grouping.group(&reversed).unwrap(), grouping.group(&cells).unwrap());
    }

    #[test]
    fn prop_fit_predict_agrees_with_assignment(cells in cells_strategy(40), radius in radius_strategy()) {
        let grouping = CliqueGrouping::new(radius);
        let labels = grouping.fit_predict(&cells).unwrap();
        let assignment = grouping.group(&cells).unwrap();

        prop_assert_eq!(labels.len(), cells.len());
        for (cell, &label) in cells.iter().zip(&labels) {
            prop_assert!(label >= 1);
            prop_assert_eq!(assignment.group_of(cell.id), Some(label));
        }
    }
}
