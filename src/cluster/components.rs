use std::collections::HashSet;

use super::graph::ProximityGraph;
use crate::cell::CellId;

/// Connected components of `graph`, partitioning its node set exactly.
///
/// Traversal uses an explicit stack, so deep chains cannot overflow the call
/// stack. Seeds are taken in ascending id order, each component is sorted
/// ascending, and components are ordered by their smallest id.
pub fn connected_components(graph: &ProximityGraph) -> Vec<Vec<CellId>> {
    let mut visited: HashSet<CellId> = HashSet::with_capacity(graph.len());
    let mut components = Vec::new();
    let mut stack = Vec::new();

    for seed in graph.ids() {
        if !visited.insert(seed) {
            continue;
        }

        let mut component = vec![seed];
        stack.push(seed);
        while let Some(current) = stack.pop() {
            for neighbor in graph.neighbors(current) {
                if visited.insert(neighbor) {
                    component.push(neighbor);
                    stack.push(neighbor);
                }
            }
        }

        component.sort_unstable();
        components.push(component);
    }

    components
}
