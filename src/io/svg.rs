//! Self-contained SVG export of a placement plan
//!
//! Each distinct tile is embedded once as a base64 PNG inside `<defs>`,
//! normalised to a unit square, and every placement references it through a
//! `<use>` element carrying the placement's transform.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::{ImageFormat, Rgba, RgbaImage};
use std::collections::BTreeMap;
use std::fmt::Write;
use std::io::Cursor;
use std::path::Path;

use crate::algorithm::placement::Placement;
use crate::io::catalog::TileLibrary;
use crate::io::error::{MosaicError, Result, WithPath};
use crate::spatial::grid::GridSpec;
use crate::spatial::tiles::TileId;

/// Encode an image as a `data:` URI holding a base64 PNG
///
/// # Errors
///
/// Returns an error if PNG encoding fails.
pub fn png_data_uri(image: &RgbaImage) -> Result<String> {
    let mut bytes = Cursor::new(Vec::new());
    image
        .write_to(&mut bytes, ImageFormat::Png)
        .map_err(|source| MosaicError::ImageExport {
            path: "<memory>".into(),
            source,
        })?;
    Ok(format!(
        "data:image/png;base64,{}",
        STANDARD.encode(bytes.into_inner())
    ))
}

fn css_color(color: Rgba<u8>) -> String {
    let [r, g, b, a] = color.0;
    if a == u8::MAX {
        format!("#{r:02x}{g:02x}{b:02x}")
    } else {
        format!("rgba({r},{g},{b},{:.3})", f64::from(a) / 255.0)
    }
}

fn escape_attribute(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Serialize a plan as a standalone SVG document
///
/// # Errors
///
/// Returns an error if a placement references a tile missing from the
/// library or a tile image cannot be encoded.
pub fn render_svg(
    placements: &[Placement],
    grid: &GridSpec,
    library: &TileLibrary,
    background: Rgba<u8>,
) -> Result<String> {
    let width = grid.pixel_width();
    let height = grid.pixel_height();

    // Stable element ids in order of first use
    let mut symbols: BTreeMap<&TileId, usize> = BTreeMap::new();
    let mut defs = String::new();
    for placement in placements {
        if symbols.contains_key(&placement.tile_id) {
            continue;
        }
        let index = symbols.len();
        let uri = png_data_uri(library.require_image(&placement.tile_id)?)?;
        let _ = writeln!(
            defs,
            r#"    <image id="tile-{index}" data-tile="{}" width="1" height="1" preserveAspectRatio="none" href="{uri}"/>"#,
            escape_attribute(placement.tile_id.as_str())
        );
        symbols.insert(&placement.tile_id, index);
    }

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    );
    let _ = writeln!(
        svg,
        r#"  <rect width="{width}" height="{height}" fill="{}"/>"#,
        css_color(background)
    );
    if !defs.is_empty() {
        svg.push_str("  <defs>\n");
        svg.push_str(&defs);
        svg.push_str("  </defs>\n");
    }

    for placement in placements {
        let Some(index) = symbols.get(&placement.tile_id) else {
            continue;
        };
        let _ = writeln!(
            svg,
            r##"  <use href="#tile-{index}" transform="{}"/>"##,
            placement.transform(grid).svg_transform()
        );
    }

    svg.push_str("</svg>\n");
    Ok(svg)
}

/// Write an SVG document, creating parent directories
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub fn export_svg(document: &str, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).with_path(parent, "create directory")?;
    }
    std::fs::write(output_path, document).with_path(output_path, "write svg")?;
    log::info!("Wrote {}", output_path.display());
    Ok(())
}
