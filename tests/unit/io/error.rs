//! Tests for error formatting and source chaining

#[cfg(test)]
mod tests {
    use seedmosaic::io::error::{MosaicError, WithPath, invalid_parameter};
    use std::error::Error;
    use std::path::{Path, PathBuf};

    // Tests parameter errors name the parameter, value, and reason
    // Verified by dropping the value from the message
    #[test]
    fn test_invalid_parameter_display() {
        let error = invalid_parameter("rows", &0, &"must be at least 1");
        assert_eq!(
            error.to_string(),
            "Invalid parameter 'rows' = '0': must be at least 1"
        );
        assert!(error.source().is_none());
    }

    #[test]
    fn test_invalid_tile_display() {
        let error = MosaicError::InvalidTile {
            tile: "odd".to_string(),
            width: 30,
            height: 20,
            tile_unit_pixels: 20,
        };
        assert_eq!(
            error.to_string(),
            "Tile 'odd' is 30x20 px; expected a square of 20 or 40 px"
        );
    }

    #[test]
    fn test_catalog_and_tile_display() {
        let empty = MosaicError::EmptyCatalog {
            directory: PathBuf::from("tiles"),
        };
        assert_eq!(empty.to_string(), "No usable tiles found in 'tiles'");

        let unknown = MosaicError::UnknownTile {
            tile: "ghost".to_string(),
        };
        assert_eq!(unknown.to_string(), "No image loaded for tile 'ghost'");
    }

    // Tests I/O failures keep the path, operation, and source
    // Verified by discarding the source error
    #[test]
    fn test_with_path_wraps_io_errors() {
        let result: std::io::Result<()> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "gone",
        ));
        let Err(error) = result.with_path(Path::new("out/a.png"), "write png") else {
            unreachable!("error expected");
        };

        let message = error.to_string();
        assert!(message.contains("write png"));
        assert!(message.contains("out/a.png"));
        assert!(message.contains("gone"));
        assert!(error.source().is_some());
        assert!(matches!(error, MosaicError::FileSystem { .. }));
    }

    #[test]
    fn test_settings_error_has_source() {
        let Err(source) = serde_json::from_str::<u32>("nope") else {
            unreachable!("parse should fail");
        };
        let error = MosaicError::Settings {
            path: PathBuf::from("s.json"),
            source,
        };
        assert!(error.to_string().starts_with("Invalid JSON in 's.json'"));
        assert!(error.source().is_some());
    }

    #[test]
    fn test_with_path_passes_success_through() {
        let result: std::io::Result<u8> = Ok(7);
        assert_eq!(result.with_path(Path::new("x"), "read").ok(), Some(7));
    }
}
