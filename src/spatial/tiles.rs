//! Tile identifiers, footprints, and the ordered tile catalog
//!
//! The catalog is the only long-lived input to generation. It is read-only
//! during a pass; tiles are added or removed strictly between passes.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::io::error::{MosaicError, Result};

/// Identifier of a tile in the catalog
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileId(String);

impl TileId {
    /// Create an identifier from any string-like value
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TileId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for TileId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Square block of grid cells a tile occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Footprint {
    /// Occupies a single 1×1 cell
    Small,
    /// Occupies a 2×2 block of cells
    Large,
}

impl Footprint {
    /// Cells per side
    pub const fn units(self) -> usize {
        match self {
            Self::Small => 1,
            Self::Large => 2,
        }
    }

    /// Footprint for a side length in grid units, if supported
    pub const fn from_units(units: usize) -> Option<Self> {
        match units {
            1 => Some(Self::Small),
            2 => Some(Self::Large),
            _ => None,
        }
    }

    /// Classify a tile asset by its declared pixel size
    ///
    /// Only squares of exactly one or two tile units are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError::InvalidTile`] for any other size.
    pub fn classify(
        tile: &TileId,
        width: u32,
        height: u32,
        tile_unit_pixels: u32,
    ) -> Result<Self> {
        let invalid = || MosaicError::InvalidTile {
            tile: tile.to_string(),
            width,
            height,
            tile_unit_pixels,
        };

        if width != height || tile_unit_pixels == 0 || width % tile_unit_pixels != 0 {
            return Err(invalid());
        }
        Self::from_units((width / tile_unit_pixels) as usize).ok_or_else(invalid)
    }
}

impl From<Footprint> for u8 {
    fn from(footprint: Footprint) -> Self {
        footprint.units() as Self
    }
}

impl TryFrom<u8> for Footprint {
    type Error = String;

    fn try_from(units: u8) -> std::result::Result<Self, Self::Error> {
        Self::from_units(units as usize)
            .ok_or_else(|| format!("unsupported footprint {units}, expected 1 or 2"))
    }
}

/// A catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileDescriptor {
    /// Unique identifier
    pub id: TileId,
    /// Declared footprint
    pub footprint: Footprint,
    /// Optional human-readable label
    pub label: Option<String>,
}

impl TileDescriptor {
    /// Create a descriptor without a label
    pub fn new(id: impl Into<TileId>, footprint: Footprint) -> Self {
        Self {
            id: id.into(),
            footprint,
            label: None,
        }
    }

    /// Attach a display label
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Ordered registry of available tiles
///
/// Registration order is significant: it fixes the index each RNG draw maps
/// to, so reordering the catalog changes every generated layout.
#[derive(Debug, Clone, Default)]
pub struct TileCatalog {
    tiles: Vec<TileDescriptor>,
}

impl TileCatalog {
    /// Create an empty catalog
    pub const fn new() -> Self {
        Self { tiles: Vec::new() }
    }

    /// Register a tile, replacing any existing entry with the same id in place
    pub fn insert(&mut self, descriptor: TileDescriptor) {
        match self.tiles.iter_mut().find(|tile| tile.id == descriptor.id) {
            Some(existing) => *existing = descriptor,
            None => self.tiles.push(descriptor),
        }
    }

    /// Remove a tile by id, returning it if present
    pub fn remove(&mut self, id: &TileId) -> Option<TileDescriptor> {
        let position = self.tiles.iter().position(|tile| &tile.id == id)?;
        Some(self.tiles.remove(position))
    }

    /// Look up a tile by id
    pub fn get(&self, id: &TileId) -> Option<&TileDescriptor> {
        self.tiles.iter().find(|tile| &tile.id == id)
    }

    /// All tiles in registration order
    pub fn tiles(&self) -> &[TileDescriptor] {
        &self.tiles
    }

    /// Number of registered tiles
    pub const fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether no tiles are registered
    pub const fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Ids of 1×1 tiles in registration order
    pub fn small_ids(&self) -> Vec<TileId> {
        self.ids_with(Footprint::Small)
    }

    /// Ids of 2×2 tiles in registration order
    pub fn large_ids(&self) -> Vec<TileId> {
        self.ids_with(Footprint::Large)
    }

    /// Every tile with its footprint, used for fallback indexing
    pub fn registry(&self) -> Vec<(TileId, Footprint)> {
        self.tiles
            .iter()
            .map(|tile| (tile.id.clone(), tile.footprint))
            .collect()
    }

    fn ids_with(&self, footprint: Footprint) -> Vec<TileId> {
        self.tiles
            .iter()
            .filter(|tile| tile.footprint == footprint)
            .map(|tile| tile.id.clone())
            .collect()
    }
}
