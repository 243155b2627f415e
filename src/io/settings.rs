//! Persistent generation settings and plan documents as JSON

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::algorithm::executor::{GenerationOptions, GenerationOutcome};
use crate::algorithm::placement::Placement;
use crate::io::configuration::{
    DEFAULT_BACKGROUND, DEFAULT_COLS, DEFAULT_ROWS, DEFAULT_SEED, DEFAULT_TILE_UNIT_PIXELS,
};
use crate::io::error::{MosaicError, Result, WithPath};
use crate::spatial::grid::{Cell, GridSpec};

/// Everything needed to reproduce a mosaic, apart from the tile images
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Grid rows
    pub rows: usize,
    /// Grid columns
    pub cols: usize,
    /// Pixels per grid unit
    pub tile_unit_pixels: u32,
    /// Seed text
    pub seed: String,
    /// Background colour as a hex string
    pub background: String,
    /// Generation switches
    pub options: GenerationOptions,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            tile_unit_pixels: DEFAULT_TILE_UNIT_PIXELS,
            seed: DEFAULT_SEED.to_string(),
            background: DEFAULT_BACKGROUND.to_string(),
            options: GenerationOptions::default(),
        }
    }
}

impl Settings {
    /// Validated grid described by these settings
    ///
    /// # Errors
    ///
    /// Returns an error if any grid dimension is invalid.
    pub fn grid(&self) -> Result<GridSpec> {
        GridSpec::new(self.rows, self.cols, self.tile_unit_pixels)
    }

    /// Load settings from a JSON file; missing fields take their defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).with_path(path, "read settings")?;
        serde_json::from_str(&text).map_err(|source| MosaicError::Settings {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save settings as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        write_json(self, path)
    }
}

/// Serializable snapshot of one generated plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanDocument {
    /// Seed text the plan was generated from
    pub seed: String,
    /// 32-bit hash of the seed text
    pub seed_hash: u32,
    /// Grid the plan was generated on
    pub grid: GridSpec,
    /// Cells left as bare background
    pub empty_cells: Vec<Cell>,
    /// Ordered placements
    pub placements: Vec<Placement>,
}

impl PlanDocument {
    /// Snapshot a generation outcome
    pub fn new(seed: &str, grid: GridSpec, outcome: &GenerationOutcome) -> Self {
        Self {
            seed: seed.to_string(),
            seed_hash: outcome.seed_hash,
            grid,
            empty_cells: outcome.empty_cells.cells(),
            placements: outcome.placements.clone(),
        }
    }

    /// Load a plan document from JSON
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid plan.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).with_path(path, "read plan")?;
        serde_json::from_str(&text).map_err(|source| MosaicError::Settings {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save the plan as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        write_json(self, path)
    }
}

fn write_json(value: &impl Serialize, path: &Path) -> Result<()> {
    let text = serde_json::to_string_pretty(value).map_err(|source| MosaicError::Settings {
        path: path.to_path_buf(),
        source,
    })?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_path(parent, "create directory")?;
    }
    std::fs::write(path, text).with_path(path, "write json")
}
