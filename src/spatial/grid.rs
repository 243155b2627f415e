//! Grid dimensions, cell coordinates, and pixel geometry
//!
//! The grid is fixed for the duration of a generation pass. Cells are
//! addressed by `(row, col)` with the origin at the top-left, and every cell
//! spans `tile_unit_pixels` output pixels per side.

use serde::{Deserialize, Serialize};

use crate::io::configuration::{MAX_GRID_DIMENSION, MAX_PIXEL_EXTENT};
use crate::io::error::{Result, invalid_parameter};

/// A single grid cell coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell {
    /// Row index, 0 at the top
    pub row: usize,
    /// Column index, 0 at the left
    pub col: usize,
}

impl Cell {
    /// Create a cell coordinate
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Cells of the `size × size` block whose top-left is this cell, in row-major order
    pub fn block(self, size: usize) -> impl Iterator<Item = Self> + use<> {
        (self.row..self.row + size)
            .flat_map(move |row| (self.col..self.col + size).map(move |col| Self::new(row, col)))
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

/// Validated grid dimensions and output scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSpec {
    /// Number of cell rows (at least 1)
    pub rows: usize,
    /// Number of cell columns (at least 1)
    pub cols: usize,
    /// Output pixels spanned by one 1×1 cell
    pub tile_unit_pixels: u32,
}

impl GridSpec {
    /// Create a grid, validating every dimension
    ///
    /// # Errors
    ///
    /// Returns an error if rows or columns are zero or exceed
    /// [`MAX_GRID_DIMENSION`], if the tile unit is zero, or if either rendered
    /// extent would exceed [`MAX_PIXEL_EXTENT`].
    pub fn new(rows: usize, cols: usize, tile_unit_pixels: u32) -> Result<Self> {
        for (parameter, value) in [("rows", rows), ("cols", cols)] {
            if value == 0 {
                return Err(invalid_parameter(parameter, &value, &"must be at least 1"));
            }
            if value > MAX_GRID_DIMENSION {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &format!("must not exceed {MAX_GRID_DIMENSION}"),
                ));
            }
        }
        if tile_unit_pixels == 0 {
            return Err(invalid_parameter(
                "tile_unit_pixels",
                &tile_unit_pixels,
                &"must be greater than 0",
            ));
        }
        for (axis, cells) in [("cols", cols), ("rows", rows)] {
            let extent = u32::try_from(cells)
                .ok()
                .and_then(|count| count.checked_mul(tile_unit_pixels));
            if extent.is_none_or(|pixels| pixels > MAX_PIXEL_EXTENT) {
                return Err(invalid_parameter(
                    "tile_unit_pixels",
                    &tile_unit_pixels,
                    &format!("{cells} {axis} would exceed {MAX_PIXEL_EXTENT} px"),
                ));
            }
        }

        Ok(Self {
            rows,
            cols,
            tile_unit_pixels,
        })
    }

    /// Total number of cells
    pub const fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Whether a cell lies inside the grid
    pub const fn contains(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    /// Whether a `size × size` block anchored at `cell` lies entirely inside the grid
    pub const fn fits(&self, cell: Cell, size: usize) -> bool {
        size > 0 && cell.row + size <= self.rows && cell.col + size <= self.cols
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Cell> + use<> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |row| (0..cols).map(move |col| Cell::new(row, col)))
    }

    /// Output width in pixels
    pub const fn pixel_width(&self) -> u32 {
        (self.cols as u32).saturating_mul(self.tile_unit_pixels)
    }

    /// Output height in pixels
    pub const fn pixel_height(&self) -> u32 {
        (self.rows as u32).saturating_mul(self.tile_unit_pixels)
    }

    /// Pixel coordinates `(x, y)` of a cell's top-left corner
    pub const fn pixel_origin(&self, cell: Cell) -> (u32, u32) {
        (
            (cell.col as u32).saturating_mul(self.tile_unit_pixels),
            (cell.row as u32).saturating_mul(self.tile_unit_pixels),
        )
    }
}
