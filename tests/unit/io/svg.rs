//! Tests for SVG serialization of placement plans

#[cfg(test)]
mod tests {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use image::{Rgba, RgbaImage};
    use seedmosaic::MosaicError;
    use seedmosaic::algorithm::placement::{Placement, Rotation};
    use seedmosaic::io::catalog::TileLibrary;
    use seedmosaic::io::svg::{export_svg, png_data_uri, render_svg};
    use seedmosaic::spatial::grid::GridSpec;
    use seedmosaic::spatial::tiles::{Footprint, TileId};
    use tempfile::TempDir;

    const BACKGROUND: Rgba<u8> = Rgba([0x1b, 0x1b, 0x1b, 255]);

    fn library() -> TileLibrary {
        let mut library = TileLibrary::new(10);
        for (name, side) in [("wave", 10), ("dot", 10), ("arch", 20)] {
            let image = RgbaImage::from_pixel(side, side, Rgba([200, 100, 50, 255]));
            assert!(library.add_image(TileId::new(name), image, None).is_ok());
        }
        library
    }

    fn placement(
        row: usize,
        col: usize,
        size: Footprint,
        tile: &str,
        rotation: Rotation,
        flipped_horizontally: bool,
    ) -> Placement {
        Placement {
            row,
            col,
            size,
            tile_id: TileId::new(tile),
            rotation,
            flipped_horizontally,
        }
    }

    fn grid() -> GridSpec {
        GridSpec::new(3, 4, 10).unwrap_or_else(|_| unreachable!("valid grid"))
    }

    // Tests the data URI decodes back to a PNG of the same size
    // Verified by encoding raw pixels instead of PNG
    #[test]
    fn test_png_data_uri_round_trips() {
        let image = RgbaImage::from_pixel(3, 2, Rgba([1, 2, 3, 4]));
        let Ok(uri) = png_data_uri(&image) else {
            unreachable!("encoding should succeed");
        };
        let payload = uri.strip_prefix("data:image/png;base64,");
        assert!(payload.is_some());

        let decoded = payload
            .and_then(|text| STANDARD.decode(text).ok())
            .and_then(|bytes| image::load_from_memory(&bytes).ok())
            .map(|image| image.to_rgba8());
        assert_eq!(decoded, Some(image));
    }

    // Tests each tile is embedded once and referenced per placement
    // Verified by embedding the image in every use element
    #[test]
    fn test_render_svg_structure() {
        let plan = vec![
            placement(0, 0, Footprint::Small, "wave", Rotation::Deg0, false),
            placement(0, 1, Footprint::Large, "arch", Rotation::Deg90, true),
            placement(0, 3, Footprint::Small, "wave", Rotation::Deg180, false),
        ];
        let Ok(svg) = render_svg(&plan, &grid(), &library(), BACKGROUND) else {
            unreachable!("render should succeed");
        };

        assert!(svg.starts_with("<svg "));
        assert!(svg.contains(r#"width="40" height="30" viewBox="0 0 40 30""#));
        assert!(svg.contains(r##"fill="#1b1b1b""##));
        assert_eq!(svg.matches("<image ").count(), 2);
        assert_eq!(svg.matches("<use ").count(), 3);
        assert!(svg.contains(r#"id="tile-0" data-tile="wave""#));
        assert!(svg.contains(r#"id="tile-1" data-tile="arch""#));
        assert!(!svg.contains("data-tile=\"dot\""));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    // Tests transforms compose translate, rotate, mirror, and unit scale
    // Verified by swapping the rotate and scale order
    #[test]
    fn test_render_svg_transforms() {
        let plan = vec![
            placement(0, 0, Footprint::Small, "wave", Rotation::Deg0, false),
            placement(1, 2, Footprint::Large, "arch", Rotation::Deg270, true),
        ];
        let Ok(svg) = render_svg(&plan, &grid(), &library(), BACKGROUND) else {
            unreachable!("render should succeed");
        };

        assert!(svg.contains(
            r##"<use href="#tile-0" transform="translate(5 5) translate(-5 -5) scale(10)"/>"##
        ));
        assert!(svg.contains(
            r##"<use href="#tile-1" transform="translate(30 20) rotate(270) scale(-1 1) translate(-10 -10) scale(20)"/>"##
        ));
    }

    #[test]
    fn test_render_svg_translucent_background() {
        let Ok(svg) = render_svg(&[], &grid(), &library(), Rgba([255, 0, 0, 0])) else {
            unreachable!("render should succeed");
        };
        assert!(svg.contains(r#"fill="rgba(255,0,0,0.000)""#));
        assert!(!svg.contains("<defs>"));
    }

    #[test]
    fn test_render_svg_unknown_tile() {
        let plan = vec![placement(0, 0, Footprint::Small, "ghost", Rotation::Deg0, false)];
        let result = render_svg(&plan, &grid(), &library(), BACKGROUND);
        assert!(matches!(result, Err(MosaicError::UnknownTile { .. })));
    }

    #[test]
    fn test_export_svg_writes_document() {
        let Ok(dir) = TempDir::new() else {
            unreachable!("temp dir");
        };
        let path = dir.path().join("out/mosaic.svg");
        assert!(export_svg("<svg/>", &path).is_ok());
        assert_eq!(std::fs::read_to_string(&path).ok().as_deref(), Some("<svg/>"));
    }
}
