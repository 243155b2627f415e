//! Generation pass orchestration
//!
//! A [`GenerationPass`] owns every piece of mutable state for one run: the
//! RNG stream seeded from the seed text, the occupancy tracker, and the
//! empty-cell set. Nothing is shared between passes, so regenerating after a
//! seed or option change is just building a new pass.

use serde::{Deserialize, Serialize};

use crate::algorithm::clustering::{EmptyCells, generate_empty_clusters};
use crate::algorithm::placement::{Placement, PlacementPlanner, TileLists, TransformOptions};
use crate::math::random::{Mulberry32, hash_seed};
use crate::spatial::grid::GridSpec;
use crate::spatial::occupancy::OccupancyGrid;
use crate::spatial::tiles::{Footprint, TileCatalog, TileId};

/// User-facing switches for one pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationOptions {
    /// Rotate each tile by a random quarter turn
    pub random_rotation: bool,
    /// Mirror each tile horizontally at random
    pub allow_flips: bool,
    /// Leave clustered cells empty so the background shows through
    pub enable_clustering: bool,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            random_rotation: true,
            allow_flips: false,
            enable_clustering: true,
        }
    }
}

impl GenerationOptions {
    const fn transforms(self) -> TransformOptions {
        TransformOptions {
            random_rotation: self.random_rotation,
            allow_flips: self.allow_flips,
        }
    }
}

/// Result of one pass: the ordered plan plus the state it was built against
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOutcome {
    /// Hash of the seed text that initialised the RNG
    pub seed_hash: u32,
    /// Placements in row-major order of their top-left cell
    pub placements: Vec<Placement>,
    /// Cells left as bare background
    pub empty_cells: EmptyCells,
    /// Total RNG values consumed by the pass
    pub draws: u64,
}

impl GenerationOutcome {
    /// Number of placements with the given footprint
    pub fn count_with(&self, footprint: Footprint) -> usize {
        self.placements
            .iter()
            .filter(|placement| placement.size == footprint)
            .count()
    }
}

/// All state owned by a single generation pass
pub struct GenerationPass<'t> {
    grid: GridSpec,
    options: GenerationOptions,
    tiles: TileLists<'t>,
    seed_hash: u32,
    rng: Mulberry32,
    occupancy: OccupancyGrid,
}

impl<'t> GenerationPass<'t> {
    /// Prepare a pass with fresh RNG and occupancy state
    pub fn new(
        grid: GridSpec,
        seed_text: &str,
        options: GenerationOptions,
        tiles: TileLists<'t>,
    ) -> Self {
        let seed_hash = hash_seed(seed_text);
        Self {
            grid,
            options,
            tiles,
            seed_hash,
            rng: Mulberry32::new(seed_hash),
            occupancy: OccupancyGrid::new(grid.rows, grid.cols),
        }
    }

    /// Run clustering then placement to completion
    pub fn run(mut self) -> GenerationOutcome {
        let empty_cells = if self.options.enable_clustering {
            generate_empty_clusters(self.grid.rows, self.grid.cols, &mut self.rng)
        } else {
            EmptyCells::none(self.grid.rows, self.grid.cols)
        };

        let placements = PlacementPlanner::new(
            self.grid,
            self.tiles,
            self.options.transforms(),
            &mut self.rng,
            &mut self.occupancy,
            &empty_cells,
        )
        .plan();

        let outcome = GenerationOutcome {
            seed_hash: self.seed_hash,
            placements,
            empty_cells,
            draws: self.rng.draws(),
        };

        log::debug!(
            "pass 0x{:08x}: {} small, {} large, {} cells claimed, {} empty, {} draws",
            outcome.seed_hash,
            outcome.count_with(Footprint::Small),
            outcome.count_with(Footprint::Large),
            self.occupancy.occupied_count(),
            outcome.empty_cells.len(),
            outcome.draws
        );

        outcome
    }
}

/// Generate an ordered placement plan
///
/// Identical inputs always produce an identical plan. Empty tile lists yield
/// an empty plan rather than an error.
pub fn generate(
    grid: GridSpec,
    seed_text: &str,
    options: GenerationOptions,
    small_tiles: &[TileId],
    large_tiles: &[TileId],
    registry: &[(TileId, Footprint)],
) -> Vec<Placement> {
    let tiles = TileLists {
        small: small_tiles,
        large: large_tiles,
        registry,
    };
    GenerationPass::new(grid, seed_text, options, tiles)
        .run()
        .placements
}

/// Generate against a catalog, returning the plan with its empty cells and statistics
pub fn generate_from_catalog(
    grid: GridSpec,
    seed_text: &str,
    options: GenerationOptions,
    catalog: &TileCatalog,
) -> GenerationOutcome {
    let small = catalog.small_ids();
    let large = catalog.large_ids();
    let registry = catalog.registry();
    let tiles = TileLists {
        small: &small,
        large: &large,
        registry: &registry,
    };
    GenerationPass::new(grid, seed_text, options, tiles).run()
}
