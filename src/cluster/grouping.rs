//! Per-case orchestration: index, graph, components, cover, numbering.

use std::collections::BTreeMap;

use tracing::debug;

use super::clique::clique_cover;
use super::components::connected_components;
use super::graph::ProximityGraph;
use super::grid::SpatialIndex;
use super::traits::Clustering;
use crate::cell::{Cell, CellId};
use crate::error::Result;

/// Groups cells into cliques of the compatibility graph for a given radius.
#[derive(Debug, Clone)]
pub struct CliqueGrouping {
    /// Maximum distance (inclusive) between two cells of the same group.
    radius: f64,
    /// Cover each connected component separately.
    split_components: bool,
}

impl CliqueGrouping {
    /// Create a grouping for the given distance threshold.
    ///
    /// Component pre-segmentation is on by default.
    pub fn new(radius: f64) -> Self {
        Self {
            radius,
            split_components: true,
        }
    }

    /// Set the distance threshold.
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Enable or disable covering connected components separately.
    ///
    /// Disabling it hands the whole node set to the cover at once. The result
    /// is still a valid partition, but numbering can differ.
    pub fn with_component_split(mut self, split: bool) -> Self {
        self.split_components = split;
        self
    }

    /// The configured distance threshold.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Run the full pipeline and keep every intermediate result.
    ///
    /// Fails on a non-positive or non-finite radius, a non-finite coordinate,
    /// or a repeated id. An empty slice is not an error.
    pub fn solve(&self, cells: &[Cell]) -> Result<Solution> {
        let index = SpatialIndex::build(cells, self.radius)?;
        let graph = ProximityGraph::build(cells, &index, self.radius)?;

        let components = if self.split_components {
            connected_components(&graph)
        } else if graph.is_empty() {
            Vec::new()
        } else {
            vec![graph.ids().collect()]
        };

        let cliques: Vec<Vec<CellId>> = components
            .iter()
            .flat_map(|component| clique_cover(&graph, component))
            .collect();
        let assignment = Assignment::from_cliques(&cliques);

        debug!(
            cells = cells.len(),
            buckets = index.bucket_count(),
            edges = graph.edge_count(),
            components = components.len(),
            groups = cliques.len(),
            "grouped case"
        );

        Ok(Solution {
            graph,
            components,
            cliques,
            assignment,
        })
    }

    /// Group the cells, returning only the id → group mapping.
    pub fn group(&self, cells: &[Cell]) -> Result<Assignment> {
        Ok(self.solve(cells)?.assignment)
    }
}

impl Clustering for CliqueGrouping {
    /// Group numbers are 1-based, as in [`Assignment`].
    fn fit_predict(&self, cells: &[Cell]) -> Result<Vec<usize>> {
        let assignment = self.group(cells)?;
        Ok(cells.iter().map(|cell| assignment.groups[&cell.id]).collect())
    }
}

/// Everything computed for one case.
#[derive(Debug, Clone)]
pub struct Solution {
    /// The compatibility graph.
    pub graph: ProximityGraph,
    /// Components handed to the cover, in processing order.
    pub components: Vec<Vec<CellId>>,
    /// Cliques in production order; clique `k` is group `k + 1`.
    pub cliques: Vec<Vec<CellId>>,
    /// Final id → group mapping.
    pub assignment: Assignment,
}

/// Mapping from cell id to a 1-based group number, iterated in ascending id order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    groups: BTreeMap<CellId, usize>,
    group_count: usize,
}

impl Assignment {
    /// Number cliques sequentially from 1 in the order given.
    pub fn from_cliques(cliques: &[Vec<CellId>]) -> Self {
        let mut groups = BTreeMap::new();
        for (k, clique) in cliques.iter().enumerate() {
            for &id in clique {
                groups.insert(id, k + 1);
            }
        }
        Self {
            groups,
            group_count: cliques.len(),
        }
    }

    /// Group of `id`, if it was part of the case.
    pub fn group_of(&self, id: CellId) -> Option<usize> {
        self.groups.get(&id).copied()
    }

    /// `(id, group)` pairs in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (CellId, usize)> + '_ {
        self.groups.iter().map(|(&id, &group)| (id, group))
    }

    /// Number of assigned cells.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether no cell was assigned.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of groups.
    pub fn group_count(&self) -> usize {
        self.group_count
    }

    /// Members of each group; entry `k` holds group `k + 1`, sorted ascending.
    pub fn groups(&self) -> Vec<Vec<CellId>> {
        let mut out = vec![Vec::new(); self.group_count];
        for (id, group) in self.iter() {
            out[group - 1].push(id);
        }
        out
    }
}
