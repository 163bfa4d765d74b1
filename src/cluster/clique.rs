//! Greedy approximation of a minimum clique cover.
//!
//! Finding the fewest cliques that partition a graph is NP-hard. This module
//! grows one maximal clique at a time from the smallest unassigned id:
//!
//! 1. Take the smallest unassigned id as the seed of a new clique.
//! 2. Its unassigned neighbours inside the component form the candidate pool.
//! 3. Rank the pool by how many pool members each candidate is adjacent to,
//!    descending, ties by ascending id. Well-connected candidates go first
//!    because they are the least likely to block later admissions.
//! 4. Admit a candidate only if it is adjacent to *every* member admitted so
//!    far, not just the seed.
//! 5. Close the clique when the pool is exhausted and repeat.
//!
//! The result is always an exact partition into true cliques. The number of
//! cliques is not guaranteed to be minimal.
//!
//! Every step is ordered by id, so the cover is a pure function of the graph
//! and the component.

use std::collections::HashSet;

use super::graph::ProximityGraph;
use crate::cell::CellId;

/// Partition `component` into cliques of `graph`.
///
/// Ids in `component` that are not nodes of `graph` become singletons, as do
/// duplicates after their first occurrence is covered. Cliques are returned in
/// discovery order with members sorted ascending.
pub fn clique_cover(graph: &ProximityGraph, component: &[CellId]) -> Vec<Vec<CellId>> {
    let mut seeds = component.to_vec();
    seeds.sort_unstable();
    seeds.dedup();

    let members: HashSet<CellId> = seeds.iter().copied().collect();
    let mut assigned: HashSet<CellId> = HashSet::with_capacity(seeds.len());
    let mut cliques = Vec::new();

    for &seed in &seeds {
        if !assigned.insert(seed) {
            continue;
        }

        let pool: Vec<CellId> = graph
            .neighbors(seed)
            .filter(|n| members.contains(n) && !assigned.contains(n))
            .collect();

        let mut clique = vec![seed];
        for candidate in rank_candidates(graph, &pool) {
            if clique.iter().all(|&m| graph.contains_edge(m, candidate)) {
                assigned.insert(candidate);
                clique.push(candidate);
            }
        }

        clique.sort_unstable();
        cliques.push(clique);
    }

    cliques
}

/// Order candidates by descending adjacency within the pool, then ascending id.
fn rank_candidates(graph: &ProximityGraph, pool: &[CellId]) -> Vec<CellId> {
    let in_pool: HashSet<CellId> = pool.iter().copied().collect();
    let mut scored: Vec<(usize, CellId)> = pool
        .iter()
        .map(|&c| {
            let shared = graph.neighbors(c).filter(|n| in_pool.contains(n)).count();
            (shared, c)
        })
        .collect();

    scored.sort_unstable_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    scored.into_iter().map(|(_, c)| c).collect()
}
