//! Algorithm constants and runtime configuration defaults

// Cluster generation
/// Cluster seed points per grid cell
pub const CLUSTER_DENSITY: f64 = 0.12;
/// Neighbourhood radius, in cells, around each cluster seed
pub const CLUSTER_RADIUS: usize = 1;
/// Distance at which a neighbour's spread probability reaches zero
pub const CLUSTER_MAX_DISTANCE: f64 = 1.5;
/// Spread probability scale applied to the distance falloff
pub const CLUSTER_SPREAD_PROBABILITY: f64 = 0.35;

// Placement
/// Probability of committing to a 2×2 tile where one fits
pub const LARGE_TILE_PROBABILITY: f64 = 0.3;
/// Draws strictly above this value mirror the tile
pub const FLIP_THRESHOLD: f64 = 0.5;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed rows or columns
pub const MAX_GRID_DIMENSION: usize = 1_000;
/// Maximum rendered width or height in pixels
pub const MAX_PIXEL_EXTENT: u32 = 16_384;

// Default values for configurable parameters
/// Default number of grid rows
pub const DEFAULT_ROWS: usize = 5;
/// Default number of grid columns
pub const DEFAULT_COLS: usize = 8;
/// Default pixel size of a 1×1 cell
pub const DEFAULT_TILE_UNIT_PIXELS: u32 = 200;
/// Default seed text
pub const DEFAULT_SEED: &str = "pattern-2024";
/// Default background colour showing through empty cells
pub const DEFAULT_BACKGROUND: &str = "#1b1b1b";
/// Length of generated random seed strings
pub const RANDOM_SEED_LENGTH: usize = 12;

// Output settings
/// Prefix for output file names, followed by the sanitised seed
pub const OUTPUT_PREFIX: &str = "mosaic_";
/// Suffix for exported plan documents
pub const PLAN_SUFFIX: &str = "_plan.json";

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
