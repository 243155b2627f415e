//! Per-cell placement decisions and their render geometry
//!
//! The planner walks the grid in row-major order and, for every cell that is
//! neither claimed nor empty, decides footprint, tile, rotation and flip.
//! RNG draws happen in a fixed order per cell:
//!
//! 1. large-tile roll (only when a 2×2 tile could go here)
//! 2. tile index
//! 3. rotation (only when rotation is enabled)
//! 4. flip (only when flips are enabled)

use serde::{Deserialize, Serialize};
use std::fmt::Write;

use crate::algorithm::clustering::EmptyCells;
use crate::io::configuration::{FLIP_THRESHOLD, LARGE_TILE_PROBABILITY};
use crate::math::random::Mulberry32;
use crate::spatial::grid::{Cell, GridSpec};
use crate::spatial::occupancy::OccupancyGrid;
use crate::spatial::tiles::{Footprint, TileId};

/// Quarter-turn rotation applied to a placed tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
pub enum Rotation {
    /// No rotation
    #[default]
    Deg0,
    /// 90° clockwise
    Deg90,
    /// 180°
    Deg180,
    /// 270° clockwise
    Deg270,
}

impl Rotation {
    /// Angle set indexed by a uniform draw
    pub const ALL: [Self; 4] = [Self::Deg0, Self::Deg90, Self::Deg180, Self::Deg270];

    /// Rotation angle in degrees
    pub const fn degrees(self) -> u16 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }

    /// Rotation for an angle in degrees, if it is a quarter turn
    pub const fn from_degrees(degrees: u16) -> Option<Self> {
        match degrees {
            0 => Some(Self::Deg0),
            90 => Some(Self::Deg90),
            180 => Some(Self::Deg180),
            270 => Some(Self::Deg270),
            _ => None,
        }
    }

    fn draw(rng: &mut Mulberry32) -> Self {
        Self::ALL
            .get(rng.index(Self::ALL.len()))
            .copied()
            .unwrap_or_default()
    }
}

impl From<Rotation> for u16 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

impl TryFrom<u16> for Rotation {
    type Error = String;

    fn try_from(degrees: u16) -> Result<Self, Self::Error> {
        Self::from_degrees(degrees).ok_or_else(|| format!("unsupported rotation {degrees}°"))
    }
}

/// One tile placement decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    /// Top-left row
    pub row: usize,
    /// Top-left column
    pub col: usize,
    /// Footprint claimed on the grid
    pub size: Footprint,
    /// Placed tile
    pub tile_id: TileId,
    /// Rotation about the footprint centre
    pub rotation: Rotation,
    /// Whether the tile is mirrored horizontally about the footprint centre
    pub flipped_horizontally: bool,
}

impl Placement {
    /// Top-left cell
    pub const fn origin(&self) -> Cell {
        Cell::new(self.row, self.col)
    }

    /// Every cell covered by this placement, in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Cell> + use<> {
        self.origin().block(self.size.units())
    }

    /// Whether two placements share any cell
    pub const fn overlaps(&self, other: &Self) -> bool {
        let (a, b) = (self.size.units(), other.size.units());
        self.row < other.row + b
            && other.row < self.row + a
            && self.col < other.col + b
            && other.col < self.col + a
    }

    /// Pixel-space geometry for a renderer
    pub const fn transform(&self, grid: &GridSpec) -> TileTransform {
        let side = self.size.units() as u32 * grid.tile_unit_pixels;
        let (x, y) = grid.pixel_origin(self.origin());
        TileTransform {
            x,
            y,
            side,
            rotation: self.rotation,
            flipped_horizontally: self.flipped_horizontally,
        }
    }
}

/// Square pixel region of a placement plus the transform applied inside it
///
/// Tile content is anchored at the centre of the region, rotated about that
/// centre, mirrored about that centre, then re-anchored by minus half the side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileTransform {
    /// Left edge in pixels
    pub x: u32,
    /// Top edge in pixels
    pub y: u32,
    /// Side length in pixels
    pub side: u32,
    /// Rotation about the centre
    pub rotation: Rotation,
    /// Horizontal mirror about the centre
    pub flipped_horizontally: bool,
}

impl TileTransform {
    /// Centre of the region in pixels
    pub fn center(&self) -> (f64, f64) {
        let half = self.half_extent();
        (f64::from(self.x) + half, f64::from(self.y) + half)
    }

    /// Half the side length in pixels
    pub fn half_extent(&self) -> f64 {
        f64::from(self.side) / 2.0
    }

    /// SVG `transform` attribute value, applied to unit-square content
    ///
    /// Reads left to right as: translate to centre, rotate, flip, translate
    /// back by the half extent, scale the unit square to the side length.
    pub fn svg_transform(&self) -> String {
        let (cx, cy) = self.center();
        let half = self.half_extent();
        let mut transform = format!("translate({cx} {cy})");
        if self.rotation != Rotation::Deg0 {
            let _ = write!(transform, " rotate({})", self.rotation.degrees());
        }
        if self.flipped_horizontally {
            transform.push_str(" scale(-1 1)");
        }
        let _ = write!(transform, " translate({} {}) scale({})", -half, -half, self.side);
        transform
    }
}

/// Tile identifiers available to one pass
#[derive(Debug, Clone, Copy, Default)]
pub struct TileLists<'a> {
    /// 1×1 tiles in catalog order
    pub small: &'a [TileId],
    /// 2×2 tiles in catalog order
    pub large: &'a [TileId],
    /// Every tile with its declared footprint, for fallback indexing
    pub registry: &'a [(TileId, Footprint)],
}

impl TileLists<'_> {
    /// Whether there is nothing at all to place
    pub const fn is_empty(&self) -> bool {
        self.small.is_empty() && self.large.is_empty() && self.registry.is_empty()
    }
}

/// Switches controlling the per-tile transforms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformOptions {
    /// Draw a random quarter-turn rotation per tile
    pub random_rotation: bool,
    /// Draw a random horizontal flip per tile
    pub allow_flips: bool,
}

/// Row-major placement state machine
///
/// Borrows the pass-owned RNG, occupancy and empty-cell set; it never
/// outlives a single pass.
pub struct PlacementPlanner<'p, 't> {
    grid: GridSpec,
    tiles: TileLists<'t>,
    transforms: TransformOptions,
    rng: &'p mut Mulberry32,
    occupancy: &'p mut OccupancyGrid,
    empty: &'p EmptyCells,
}

impl<'p, 't> PlacementPlanner<'p, 't> {
    /// Create a planner over pass-owned state
    pub const fn new(
        grid: GridSpec,
        tiles: TileLists<'t>,
        transforms: TransformOptions,
        rng: &'p mut Mulberry32,
        occupancy: &'p mut OccupancyGrid,
        empty: &'p EmptyCells,
    ) -> Self {
        Self {
            grid,
            tiles,
            transforms,
            rng,
            occupancy,
            empty,
        }
    }

    /// Plan every cell in row-major order
    ///
    /// An entirely empty tile source yields an empty plan.
    pub fn plan(mut self) -> Vec<Placement> {
        if self.tiles.is_empty() {
            return Vec::new();
        }

        let grid = self.grid;
        let mut placements = Vec::with_capacity(grid.cell_count());
        for cell in grid.cells() {
            if let Some(placement) = self.plan_cell(cell) {
                placements.push(placement);
            }
        }
        placements
    }

    /// Decide the placement anchored at one cell, claiming its footprint
    ///
    /// Returns `None` without drawing when the cell is already claimed or empty.
    ///
    /// When neither list offers a tile, one is drawn from the full registry
    /// and keeps its declared footprint, except that a 2×2 tile which cannot
    /// fit here (bounds, claimed or empty cells) is recorded as 1×1 so the
    /// plan never overlaps or leaves the grid.
    pub fn plan_cell(&mut self, cell: Cell) -> Option<Placement> {
        if self.occupancy.is_occupied(cell.row, cell.col) || self.empty.contains(cell) {
            return None;
        }

        let large_fits = self.large_fits(cell);
        let (tile_id, size) = if !self.tiles.large.is_empty()
            && large_fits
            && self.rng.next_f64() < LARGE_TILE_PROBABILITY
        {
            (pick(self.tiles.large, self.rng)?, Footprint::Large)
        } else if !self.tiles.small.is_empty() {
            (pick(self.tiles.small, self.rng)?, Footprint::Small)
        } else {
            let (tile_id, declared) = pick(self.tiles.registry, self.rng)?;
            // A 2×2 tile that cannot fit here is shrunk to the single cell
            let size = if declared == Footprint::Large && !large_fits {
                Footprint::Small
            } else {
                declared
            };
            (tile_id, size)
        };

        self.occupancy
            .mark_occupied(cell.row, cell.col, size.units());

        let rotation = if self.transforms.random_rotation {
            Rotation::draw(self.rng)
        } else {
            Rotation::Deg0
        };
        let flipped_horizontally =
            self.transforms.allow_flips && self.rng.next_f64() > FLIP_THRESHOLD;

        Some(Placement {
            row: cell.row,
            col: cell.col,
            size,
            tile_id,
            rotation,
            flipped_horizontally,
        })
    }

    fn large_fits(&self, cell: Cell) -> bool {
        self.occupancy
            .can_place_large(cell.row, cell.col, self.grid.rows, self.grid.cols)
            && !self.empty.intersects_block(cell, Footprint::Large.units())
    }
}

fn pick<T: Clone>(items: &[T], rng: &mut Mulberry32) -> Option<T> {
    items.get(rng.index(items.len())).cloned()
}
