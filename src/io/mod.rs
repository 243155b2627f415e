/// Tile asset library backed by image files
pub mod catalog;
/// Command-line interface and batch orchestration
pub mod cli;
/// Algorithm constants and runtime defaults
pub mod configuration;
/// Error types
pub mod error;
/// Raster rendering and PNG export
pub mod image;
/// `log` backend for the command-line tool
pub mod logging;
/// Progress display for batches of seeds
pub mod progress;
/// JSON settings and plan documents
pub mod settings;
/// Vector export as self-contained SVG
pub mod svg;
