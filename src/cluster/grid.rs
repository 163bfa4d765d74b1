//! Uniform-grid spatial index used to prefilter proximity candidates.
//!
//! Cells are hashed into square buckets whose side equals the query radius.
//! Two points at distance `<= radius` differ by at most one bucket along each
//! axis, so the 3×3 block around a point's bucket always contains every true
//! neighbour. The block also contains points that are too far away, so the
//! result is a superset and callers must apply the exact distance test.
//!
//! Build is O(n) expected; a full pass of queries is O(n·k) for average bucket
//! occupancy k, degrading to O(n²) when everything lands in a few buckets.

use std::collections::HashMap;

use super::util;
use crate::cell::Cell;
use crate::error::{Error, Result};

/// Integer bucket coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridKey {
    /// `floor(x / radius)`.
    pub x: i64,
    /// `floor(y / radius)`.
    pub y: i64,
}

impl GridKey {
    /// Bucket containing the position `(x, y)` for buckets of side `size`.
    #[inline]
    pub fn from_pos(x: f64, y: f64, size: f64) -> Self {
        Self {
            x: (x / size).floor() as i64,
            y: (y / size).floor() as i64,
        }
    }

    /// The 3×3 block centred on this key (itself included).
    pub fn neighbors(&self) -> impl Iterator<Item = GridKey> + '_ {
        (-1..=1).flat_map(move |dx| {
            (-1..=1).map(move |dy| GridKey {
                x: self.x.saturating_add(dx),
                y: self.y.saturating_add(dy),
            })
        })
    }
}

/// Bucket index over a slice of cells, addressed by slice position.
#[derive(Clone, Debug)]
pub struct SpatialIndex {
    buckets: HashMap<GridKey, Vec<usize>>,
    keys: Vec<GridKey>,
    radius: f64,
}

impl SpatialIndex {
    /// Bucket every cell. Fails on a degenerate radius or a non-finite coordinate.
    pub fn build(cells: &[Cell], radius: f64) -> Result<Self> {
        util::validate_radius(radius)?;

        let mut buckets: HashMap<GridKey, Vec<usize>> = HashMap::new();
        let mut keys = Vec::with_capacity(cells.len());
        for (idx, cell) in cells.iter().enumerate() {
            if !cell.is_finite() {
                return Err(Error::NonFiniteCoordinate { id: cell.id });
            }
            let key = GridKey::from_pos(cell.x, cell.y, radius);
            buckets.entry(key).or_default().push(idx);
            keys.push(key);
        }

        Ok(Self {
            buckets,
            keys,
            radius,
        })
    }

    /// Positions of every cell in the 3×3 block around cell `idx`, including `idx`.
    ///
    /// Order is deterministic: buckets in row-major offset order, and within a
    /// bucket, ascending slice position.
    pub fn candidates(&self, idx: usize) -> Vec<usize> {
        let mut out = Vec::new();
        for key in self.keys[idx].neighbors() {
            out.extend_from_slice(self.bucket(key));
        }
        out
    }

    /// Cells registered in a single bucket.
    pub fn bucket(&self, key: GridKey) -> &[usize] {
        self.buckets.get(&key).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Bucket of cell `idx`.
    #[inline]
    pub fn key_of(&self, idx: usize) -> GridKey {
        self.keys[idx]
    }

    /// Number of non-empty buckets.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Number of indexed cells.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the index holds no cells.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Bucket side length.
    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }
}
