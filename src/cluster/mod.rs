//! Grouping cells into cliques of a compatibility graph.
//!
//! Two cells are *compatible* when they lie within a distance threshold of
//! each other (inclusive) and carry at least one common label. A valid
//! grouping puts only pairwise-compatible cells together, which is exactly a
//! partition of the compatibility graph into cliques. Using as few groups as
//! possible is the minimum clique cover problem; this module approximates it.
//!
//! ## Pipeline
//!
//! ### Spatial index
//!
//! Cells are hashed into a uniform grid with bucket side equal to the
//! threshold. Any compatible pair lies in neighbouring buckets, so each cell
//! only has to be compared against the 3×3 block around it.
//!
//! ### Proximity graph
//!
//! Grid candidates are confirmed with the exact Euclidean distance and a
//! label-intersection test. The resulting adjacency is symmetric and has a
//! node for every cell, isolated ones included.
//!
//! ### Connected components
//!
//! No clique can span two components, so each component is covered on its
//! own. This keeps the cover's working set small.
//!
//! ### Greedy clique cover
//!
//! Cliques are grown from the smallest unassigned id, admitting candidates in
//! order of connectivity and only when they are adjacent to every member
//! admitted so far. Groups are numbered from 1 in production order.
//!
//! ## Determinism
//!
//! Every traversal (seeds, components, candidate ranking) is ordered by id, so
//! the same input always yields the same numbering.
//!
//! ## Usage
//!
//! ```rust
//! use cellclique::cluster::{CliqueGrouping, Clustering};
//! use cellclique::Cell;
//!
//! let cells = vec![
//!     Cell::new(1, 0.0, 0.0, ["A"]),
//!     Cell::new(2, 1.0, 0.0, ["A"]),
//!     Cell::new(3, 10.0, 10.0, ["A"]),
//! ];
//!
//! let assignment = CliqueGrouping::new(1.5).group(&cells).unwrap();
//! assert_eq!(assignment.group_of(1), Some(1));
//! assert_eq!(assignment.group_of(2), Some(1));
//! assert_eq!(assignment.group_of(3), Some(2));
//!
//! // Same thing, one label per input cell.
//! let labels = CliqueGrouping::new(1.5).fit_predict(&cells).unwrap();
//! assert_eq!(labels, vec![1, 1, 2]);
//! ```

mod clique;
mod components;
mod graph;
mod grid;
mod grouping;
mod traits;
mod util;

pub use clique::clique_cover;
pub use components::connected_components;
pub use graph::ProximityGraph;
pub use grid::{GridKey, SpatialIndex};
pub use grouping::{Assignment, CliqueGrouping, Solution};
pub use traits::Clustering;
