//! The entity being grouped: a labelled point in the plane.

use std::collections::BTreeSet;

/// Identifier of a cell, unique within a case.
pub type CellId = i64;

/// A cell: an id, a position, and the set of peptide labels it carries.
///
/// Labels are opaque tokens; two cells can only share a group when their
/// label sets intersect.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    /// Case-unique identifier.
    pub id: CellId,
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
    /// Peptide labels.
    pub labels: BTreeSet<String>,
}

impl Cell {
    /// Create a cell from any iterable of labels.
    pub fn new<I, S>(id: CellId, x: f64, y: f64, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id,
            x,
            y,
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(&self, other: &Cell) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Whether the two label sets intersect.
    #[inline]
    pub fn shares_label(&self, other: &Cell) -> bool {
        !self.labels.is_disjoint(&other.labels)
    }

    /// Whether both coordinates are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}
