//! The compatibility graph over the cells of one case.
//!
//! An undirected edge joins two cells when they are within the radius
//! (inclusive) and their label sets intersect. Adjacency is kept in ordered
//! maps so every traversal visits ids in ascending order.

use std::collections::{BTreeMap, BTreeSet};
use std::ops::Bound;

use super::grid::SpatialIndex;
use super::util;
use crate::cell::{Cell, CellId};
use crate::error::{Error, Result};

/// Symmetric adjacency without self-loops. Every cell of the case is a node,
/// isolated ones included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProximityGraph {
    adjacency: BTreeMap<CellId, BTreeSet<CellId>>,
}

impl ProximityGraph {
    /// Build the graph from grid candidates plus the exact compatibility test.
    ///
    /// `index` must have been built over the same `cells` slice.
    pub fn build(cells: &[Cell], index: &SpatialIndex, radius: f64) -> Result<Self> {
        util::validate_radius(radius)?;
        if index.len() != cells.len() {
            return Err(Error::InvalidParameter {
                name: "index",
                message: "must be built over the same cells",
            });
        }

        let mut graph = Self::with_nodes(cells)?;
        for (i, cell) in cells.iter().enumerate() {
            for j in index.candidates(i) {
                // Each unordered pair is seen from both sides; keep one.
                if j <= i {
                    continue;
                }
                if util::compatible(cell, &cells[j], radius) {
                    graph.insert_edge(cell.id, cells[j].id);
                }
            }
        }
        Ok(graph)
    }

    /// O(n²) all-pairs construction with the same predicate. Reference oracle
    /// for the indexed builder.
    pub fn brute_force(cells: &[Cell], radius: f64) -> Result<Self> {
        util::validate_radius(radius)?;

        let mut graph = Self::with_nodes(cells)?;
        for (i, a) in cells.iter().enumerate() {
            for b in &cells[i + 1..] {
                if util::compatible(a, b, radius) {
                    graph.insert_edge(a.id, b.id);
                }
            }
        }
        Ok(graph)
    }

    fn with_nodes(cells: &[Cell]) -> Result<Self> {
        let mut adjacency = BTreeMap::new();
        for cell in cells {
            if adjacency.insert(cell.id, BTreeSet::new()).is_some() {
                return Err(Error::DuplicateId { id: cell.id });
            }
        }
        Ok(Self { adjacency })
    }

    fn insert_edge(&mut self, a: CellId, b: CellId) {
        if a == b {
            return;
        }
        self.adjacency.entry(a).or_default().insert(b);
        self.adjacency.entry(b).or_default().insert(a);
    }

    /// Neighbours of `id` in ascending order (empty for unknown ids).
    pub fn neighbors(&self, id: CellId) -> impl Iterator<Item = CellId> + '_ {
        self.adjacency.get(&id).into_iter().flatten().copied()
    }

    /// Number of neighbours of `id`.
    pub fn degree(&self, id: CellId) -> usize {
        self.adjacency.get(&id).map_or(0, BTreeSet::len)
    }

    /// Whether `a` and `b` are adjacent.
    #[inline]
    pub fn contains_edge(&self, a: CellId, b: CellId) -> bool {
        self.adjacency.get(&a).is_some_and(|n| n.contains(&b))
    }

    /// Whether `id` is a node.
    pub fn contains_node(&self, id: CellId) -> bool {
        self.adjacency.contains_key(&id)
    }

    /// Node ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = CellId> + '_ {
        self.adjacency.keys().copied()
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeSet::len).sum::<usize>() / 2
    }

    /// Undirected edges as `(low, high)` pairs in ascending order.
    pub fn edges(&self) -> Vec<(CellId, CellId)> {
        self.adjacency
            .iter()
            .flat_map(|(&a, ns)| {
                ns.range((Bound::Excluded(a), Bound::Unbounded))
                    .map(move |&b| (a, b))
            })
            .collect()
    }

    /// Check the structural invariants: symmetric, no self-loops, no dangling ids.
    pub fn is_symmetric(&self) -> bool {
        self.adjacency
            .iter()
            .all(|(&a, ns)| ns.iter().all(|&b| b != a && self.contains_edge(b, a)))
    }
}
