//! Tile asset library backed by image files
//!
//! Every asset is classified by its pixel size before it can reach the
//! generator. Assets that are not an exact 1×1 or 2×2 unit square are
//! rejected here and never appear in the catalog.

use image::{ImageFormat, RgbaImage};
use std::collections::HashMap;
use std::path::Path;

use crate::io::error::{MosaicError, Result, WithPath};
use crate::spatial::tiles::{Footprint, TileCatalog, TileDescriptor, TileId};

/// Tile catalog together with the decoded image of every tile
#[derive(Debug)]
pub struct TileLibrary {
    catalog: TileCatalog,
    images: HashMap<TileId, RgbaImage>,
    tile_unit_pixels: u32,
    rejected: Vec<MosaicError>,
}

impl TileLibrary {
    /// Create an empty library for the given grid unit
    pub fn new(tile_unit_pixels: u32) -> Self {
        Self {
            catalog: TileCatalog::new(),
            images: HashMap::new(),
            tile_unit_pixels,
            rejected: Vec::new(),
        }
    }

    /// Load every decodable image in a directory, in file name order
    ///
    /// Invalid assets are logged and collected in [`Self::rejected`] rather
    /// than failing the whole load.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read, or if it yields no
    /// usable tile at all.
    pub fn load_directory(directory: &Path, tile_unit_pixels: u32) -> Result<Self> {
        let mut library = Self::new(tile_unit_pixels);

        let mut paths = Vec::new();
        for entry in std::fs::read_dir(directory).with_path(directory, "read directory")? {
            let path = entry.with_path(directory, "read directory entry")?.path();
            if path.is_file() && ImageFormat::from_path(&path).is_ok() {
                paths.push(path);
            }
        }
        paths.sort();

        for path in paths {
            if let Err(error) = library.add_file(&path) {
                log::warn!("Skipping tile: {error}");
                library.rejected.push(error);
            }
        }

        if library.is_empty() {
            return Err(MosaicError::EmptyCatalog {
                directory: directory.to_path_buf(),
            });
        }

        log::info!(
            "Loaded {} tiles ({} small, {} large) from {}",
            library.catalog.len(),
            library.catalog.small_ids().len(),
            library.catalog.large_ids().len(),
            directory.display()
        );

        Ok(library)
    }

    /// Decode one image file and register it under its file stem
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be decoded or its size is not a
    /// supported footprint.
    pub fn add_file(&mut self, path: &Path) -> Result<TileId> {
        let image = image::open(path).map_err(|source| MosaicError::ImageLoad {
            path: path.to_path_buf(),
            source,
        })?;

        let id = tile_id_for(path);
        let label = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());
        self.add_image(id, image.to_rgba8(), label)
    }

    /// Register an already-decoded image
    ///
    /// An existing tile with the same id is replaced.
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError::InvalidTile`] if the image is not exactly one or
    /// two grid units square.
    pub fn add_image(
        &mut self,
        id: TileId,
        image: RgbaImage,
        label: Option<String>,
    ) -> Result<TileId> {
        let footprint = Footprint::classify(
            &id,
            image.width(),
            image.height(),
            self.tile_unit_pixels,
        )?;

        let mut descriptor = TileDescriptor::new(id.clone(), footprint);
        if let Some(label) = label {
            descriptor = descriptor.with_label(label);
        }
        self.catalog.insert(descriptor);
        self.images.insert(id.clone(), image);
        Ok(id)
    }

    /// Remove a tile and its image
    pub fn remove(&mut self, id: &TileId) -> Option<TileDescriptor> {
        self.images.remove(id);
        self.catalog.remove(id)
    }

    /// The ordered catalog handed to the generator
    pub const fn catalog(&self) -> &TileCatalog {
        &self.catalog
    }

    /// Decoded image for a tile
    pub fn image(&self, id: &TileId) -> Option<&RgbaImage> {
        self.images.get(id)
    }

    /// Decoded image for a tile, or an error naming the missing tile
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError::UnknownTile`] if no image is registered under `id`.
    pub fn require_image(&self, id: &TileId) -> Result<&RgbaImage> {
        self.image(id).ok_or_else(|| MosaicError::UnknownTile {
            tile: id.to_string(),
        })
    }

    /// Assets rejected while loading a directory
    pub fn rejected(&self) -> &[MosaicError] {
        &self.rejected
    }

    /// Whether the library holds no tiles
    pub const fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }
}

/// Tile identifier derived from a file path
pub fn tile_id_for(path: &Path) -> TileId {
    let stem = path.file_stem().unwrap_or_else(|| path.as_os_str());
    TileId::new(stem.to_string_lossy().into_owned())
}
