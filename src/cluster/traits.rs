use crate::cell::Cell;
use crate::error::Result;

/// Common interface for hard groupings (one group per cell).
pub trait Clustering {
    /// Group the cells and return one group number per input cell, in input order.
    fn fit_predict(&self, cells: &[Cell]) -> Result<Vec<usize>>;
}
