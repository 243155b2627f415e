//! Seeded tile mosaic generation
//!
//! A seed string drives a Mulberry32 stream that scatters clusters of empty
//! cells over a fixed grid and then fills every remaining cell with 1×1 or
//! 2×2 tiles, each with an optional quarter-turn rotation and mirror. The
//! same seed, options and catalog always produce the same ordered plan,
//! which the raster and SVG exporters turn into a composite image.

#![forbid(unsafe_code)]

/// Empty-cell clustering, placement planning, and pass orchestration
pub mod algorithm;
/// Tile loading, rendering, settings, and the command-line surface
pub mod io;
/// Seed hashing and the deterministic random stream
pub mod math;
/// Grid, occupancy, and tile catalog data structures
pub mod spatial;

pub use algorithm::executor::{GenerationOptions, GenerationOutcome, generate, generate_from_catalog};
pub use algorithm::placement::{Placement, Rotation};
pub use io::error::{MosaicError, Result};
