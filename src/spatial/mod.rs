//! Spatial data structures for the fixed generation grid
//!
//! This module contains spatial-related functionality including:
//! - Grid dimensions and cell coordinates
//! - Occupancy tracking for claimed cells
//! - Tile identifiers, footprints, and the catalog

/// Grid dimensions, cells, and pixel geometry
pub mod grid;
/// Claimed-cell tracking
pub mod occupancy;
/// Tile identifiers, footprints, and the ordered catalog
pub mod tiles;

pub use grid::{Cell, GridSpec};
