//! Clustered empty cells where the background shows through
//!
//! Seed points are scattered over the interior rows, and each one spreads to
//! its immediate neighbours with a probability that falls off with distance.
//! The draw order is part of the reproducibility contract: per seed point,
//! one draw for the row, one for the column, then one draw per neighbour in
//! row-major order. Neighbours that are already empty are skipped without a
//! draw, so overlapping clusters consume fewer values.

use ndarray::Array2;

use crate::io::configuration::{
    CLUSTER_DENSITY, CLUSTER_MAX_DISTANCE, CLUSTER_RADIUS, CLUSTER_SPREAD_PROBABILITY,
};
use crate::math::random::Mulberry32;
use crate::spatial::grid::Cell;

/// Cells designated to render as bare background
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyCells {
    mask: Array2<bool>,
    count: usize,
}

impl EmptyCells {
    /// Create a set with no empty cells
    pub fn none(rows: usize, cols: usize) -> Self {
        Self {
            mask: Array2::from_elem((rows, cols), false),
            count: 0,
        }
    }

    /// Test membership; cells outside the grid are never empty
    pub fn contains(&self, cell: Cell) -> bool {
        self.mask.get([cell.row, cell.col]).copied().unwrap_or(false)
    }

    /// Test whether any cell of the `size × size` block at `cell` is empty
    pub fn intersects_block(&self, cell: Cell, size: usize) -> bool {
        cell.block(size).any(|covered| self.contains(covered))
    }

    /// Number of empty cells
    pub const fn len(&self) -> usize {
        self.count
    }

    /// Whether no cell is empty
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Empty cells in row-major order
    pub fn cells(&self) -> Vec<Cell> {
        self.mask
            .indexed_iter()
            .filter(|&(_, &empty)| empty)
            .map(|((row, col), _)| Cell::new(row, col))
            .collect()
    }

    // Returns false when the cell was already empty or lies outside the grid
    fn insert(&mut self, cell: Cell) -> bool {
        match self.mask.get_mut([cell.row, cell.col]) {
            Some(slot) if !*slot => {
                *slot = true;
                self.count += 1;
                true
            }
            _ => false,
        }
    }
}

/// Number of cluster seed points for a grid
///
/// `floor(rows * cols * density)`, evaluated in `f64`.
pub fn cluster_seed_count(rows: usize, cols: usize) -> usize {
    ((rows * cols) as f64 * CLUSTER_DENSITY).floor() as usize
}

/// Probability that a neighbour at distance `distance` from its seed becomes empty
pub fn spread_probability(distance: f64) -> f64 {
    (1.0 - distance / CLUSTER_MAX_DISTANCE).max(0.0) * CLUSTER_SPREAD_PROBABILITY
}

/// Generate the empty-cell set for one pass
///
/// Seed rows are drawn from `[1, rows - 2]` so that no cluster touches the
/// top or bottom edge. Grids with fewer than three rows have no interior row
/// and produce no clusters and consume no draws.
pub fn generate_empty_clusters(rows: usize, cols: usize, rng: &mut Mulberry32) -> EmptyCells {
    let mut empty = EmptyCells::none(rows, cols);
    if rows < 3 || cols == 0 {
        return empty;
    }

    let last_interior_row = rows - 2;
    let seeds = cluster_seed_count(rows, cols);

    for _ in 0..seeds {
        let seed_row = rng.range_inclusive(1, last_interior_row);
        let seed_col = rng.index(cols);
        let seed = Cell::new(seed_row, seed_col);
        empty.insert(seed);

        let row_span = seed_row.saturating_sub(CLUSTER_RADIUS).max(1)
            ..=(seed_row + CLUSTER_RADIUS).min(last_interior_row);
        let col_span =
            seed_col.saturating_sub(CLUSTER_RADIUS)..=(seed_col + CLUSTER_RADIUS).min(cols - 1);

        for row in row_span {
            for col in col_span.clone() {
                let neighbour = Cell::new(row, col);
                if empty.contains(neighbour) {
                    continue;
                }

                let dr = row as f64 - seed_row as f64;
                let dc = col as f64 - seed_col as f64;
                let distance = dr.mul_add(dr, dc * dc).sqrt();

                if rng.next_f64() < spread_probability(distance) {
                    empty.insert(neighbour);
                }
            }
        }
    }

    log::debug!(
        "clustered {} empty cells from {seeds} seed points on a {rows}x{cols} grid",
        empty.len()
    );

    empty
}
