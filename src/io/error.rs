//! Error types for catalog loading, rendering, and settings persistence

use std::fmt;
use std::path::{Path, PathBuf};

/// Main error type for all fallible operations
///
/// The generation core itself never fails; these errors come from grid
/// validation and from the I/O collaborators around it.
#[derive(Debug)]
pub enum MosaicError {
    /// Failed to decode a tile image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image decoding error
        source: image::ImageError,
    },

    /// Failed to encode or save a rendered image
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image encoding error
        source: image::ImageError,
    },

    /// Tile asset whose size is not exactly one or two grid units square
    InvalidTile {
        /// Identifier of the rejected tile
        tile: String,
        /// Declared width in pixels
        width: u32,
        /// Declared height in pixels
        height: u32,
        /// Pixel size of one grid unit
        tile_unit_pixels: u32,
    },

    /// No usable tiles were found
    EmptyCatalog {
        /// Directory that was scanned
        directory: PathBuf,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// A placement references a tile with no loaded image
    UnknownTile {
        /// Identifier that could not be resolved
        tile: String,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Settings or plan JSON could not be read or written
    Settings {
        /// Path of the JSON document
        path: PathBuf,
        /// Underlying serialization error
        source: serde_json::Error,
    },
}

impl fmt::Display for MosaicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::InvalidTile {
                tile,
                width,
                height,
                tile_unit_pixels,
            } => {
                write!(
                    f,
                    "Tile '{tile}' is {width}x{height} px; expected a square of {tile_unit_pixels} or {} px",
                    u64::from(*tile_unit_pixels) * 2
                )
            }
            Self::EmptyCatalog { directory } => {
                write!(f, "No usable tiles found in '{}'", directory.display())
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::UnknownTile { tile } => {
                write!(f, "No image loaded for tile '{tile}'")
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::Settings { path, source } => {
                write!(f, "Invalid JSON in '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for MosaicError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            Self::Settings { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for fallible results
pub type Result<T> = std::result::Result<T, MosaicError>;

/// Attaches the path and operation to a bare I/O failure
pub trait WithPath<T> {
    /// Convert an I/O error into [`MosaicError::FileSystem`]
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path and operation applied
    fn with_path(self, path: &Path, operation: &'static str) -> Result<T>;
}

impl<T> WithPath<T> for std::io::Result<T> {
    fn with_path(self, path: &Path, operation: &'static str) -> Result<T> {
        self.map_err(|source| MosaicError::FileSystem {
            path: path.to_path_buf(),
            operation,
            source,
        })
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> MosaicError {
    MosaicError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
