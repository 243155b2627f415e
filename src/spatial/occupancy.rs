//! Occupancy tracking for claimed grid cells
//!
//! One bit per cell, row-major. Queries outside the grid report "not
//! occupied" and marks outside the grid are dropped; callers bound-check
//! before placing.

use bitvec::prelude::*;

use crate::spatial::grid::Cell;

/// Set of grid cells already claimed by a placed tile
#[derive(Clone, Debug)]
pub struct OccupancyGrid {
    bits: BitVec,
    rows: usize,
    cols: usize,
}

impl OccupancyGrid {
    /// Create a tracker with every cell unclaimed
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            bits: bitvec![0; rows * cols],
            rows,
            cols,
        }
    }

    const fn offset(&self, row: usize, col: usize) -> Option<usize> {
        if row < self.rows && col < self.cols {
            Some(row * self.cols + col)
        } else {
            None
        }
    }

    /// Test whether a cell has been claimed
    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        self.offset(row, col)
            .and_then(|offset| self.bits.get(offset).as_deref().copied())
            .unwrap_or(false)
    }

    /// Claim the `size × size` block whose top-left is `(row, col)`
    pub fn mark_occupied(&mut self, row: usize, col: usize, size: usize) {
        for cell in Cell::new(row, col).block(size) {
            if let Some(offset) = self.offset(cell.row, cell.col) {
                self.bits.set(offset, true);
            }
        }
    }

    /// Test whether a 2×2 tile fits at `(row, col)`
    ///
    /// The block must stay inside `rows × cols` and none of its four cells may
    /// be claimed yet.
    pub fn can_place_large(&self, row: usize, col: usize, rows: usize, cols: usize) -> bool {
        row + 1 < rows
            && col + 1 < cols
            && !Cell::new(row, col)
                .block(2)
                .any(|cell| self.is_occupied(cell.row, cell.col))
    }

    /// Number of claimed cells
    pub fn occupied_count(&self) -> usize {
        self.bits.count_ones()
    }
}
