//! Proximity-and-label clique grouping.
//!
//! `cellclique` groups labelled points in the plane ("cells") so that every
//! pair inside a group is within a distance threshold and shares a label.
//!
//! The primary public API is under [`cluster`], which provides:
//! - a uniform-grid spatial index for candidate pairs
//! - the compatibility graph and its connected components
//! - a greedy minimum-clique-cover approximation
//!
//! [`batch`] implements the line-oriented multi-case text format, and
//! [`generate`] produces random inputs in that format.

#![forbid(unsafe_code)]

pub mod batch;
pub mod cell;
pub mod cluster;
pub mod error;
pub mod generate;

pub use batch::{parse_batch, render_batch, solve_batch, write_batch, BatchOptions, Case};
pub use cell::{Cell, CellId};
pub use cluster::{
    clique_cover, connected_components, Assignment, CliqueGrouping, Clustering, GridKey,
    ProximityGraph, Solution, SpatialIndex,
};
pub use error::{Error, Result};
pub use generate::{generate_batch, GeneratorConfig};
