//! Raster rendering of a placement plan and PNG export

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use std::path::Path;

use crate::algorithm::placement::{Placement, Rotation, TileTransform};
use crate::io::catalog::TileLibrary;
use crate::io::error::{MosaicError, Result, WithPath, invalid_parameter};
use crate::spatial::grid::GridSpec;

/// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` into an RGBA colour
///
/// # Errors
///
/// Returns an error if the text is not one of the supported hex forms.
pub fn parse_hex_color(text: &str) -> Result<Rgba<u8>> {
    let invalid = || invalid_parameter("background", &text, &"expected #rgb, #rrggbb or #rrggbbaa");
    let hex = text.strip_prefix('#').unwrap_or(text);
    if !hex.is_ascii() {
        return Err(invalid());
    }

    let channel = |range: std::ops::Range<usize>| {
        hex.get(range)
            .and_then(|digits| u8::from_str_radix(digits, 16).ok())
    };

    let rgba = match hex.len() {
        3 => {
            let mut rgba = [255u8; 4];
            for (index, slot) in rgba.iter_mut().take(3).enumerate() {
                *slot = channel(index..index + 1).ok_or_else(invalid)? * 17;
            }
            rgba
        }
        6 | 8 => {
            let mut rgba = [255u8; 4];
            for (index, slot) in rgba.iter_mut().take(hex.len() / 2).enumerate() {
                *slot = channel(index * 2..index * 2 + 2).ok_or_else(invalid)?;
            }
            rgba
        }
        _ => return Err(invalid()),
    };

    Ok(Rgba(rgba))
}

/// Render a tile image into its placement's square
///
/// The image is scaled to the footprint side if needed, mirrored, then
/// rotated clockwise. Mirroring before rotating in image space is the same
/// composition as rotating then flipping the content's local frame.
pub fn transform_tile(image: &RgbaImage, transform: &TileTransform) -> RgbaImage {
    let mut tile = if image.width() == transform.side && image.height() == transform.side {
        image.clone()
    } else {
        imageops::resize(image, transform.side, transform.side, FilterType::Lanczos3)
    };

    if transform.flipped_horizontally {
        imageops::flip_horizontal_in_place(&mut tile);
    }

    match transform.rotation {
        Rotation::Deg0 => tile,
        Rotation::Deg90 => imageops::rotate90(&tile),
        Rotation::Deg180 => imageops::rotate180(&tile),
        Rotation::Deg270 => imageops::rotate270(&tile),
    }
}

/// Compose a plan onto a background-filled canvas
///
/// `on_placement` is called with the number of placements drawn so far.
///
/// # Errors
///
/// Returns an error if a placement references a tile missing from the library.
pub fn render_plan_with(
    placements: &[Placement],
    grid: &GridSpec,
    library: &TileLibrary,
    background: Rgba<u8>,
    mut on_placement: impl FnMut(usize),
) -> Result<RgbaImage> {
    let mut canvas = RgbaImage::from_pixel(grid.pixel_width(), grid.pixel_height(), background);

    for (index, placement) in placements.iter().enumerate() {
        let source = library.require_image(&placement.tile_id)?;
        let transform = placement.transform(grid);
        let tile = transform_tile(source, &transform);
        imageops::overlay(
            &mut canvas,
            &tile,
            i64::from(transform.x),
            i64::from(transform.y),
        );
        on_placement(index + 1);
    }

    Ok(canvas)
}

/// Compose a plan onto a background-filled canvas
///
/// # Errors
///
/// Returns an error if a placement references a tile missing from the library.
pub fn render_plan(
    placements: &[Placement],
    grid: &GridSpec,
    library: &TileLibrary,
    background: Rgba<u8>,
) -> Result<RgbaImage> {
    render_plan_with(placements, grid, library, background, |_| {})
}

/// Save a rendered image as PNG, creating parent directories
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created or the image
/// cannot be encoded and written.
pub fn export_png(image: &RgbaImage, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).with_path(parent, "create directory")?;
    }

    image
        .save_with_format(output_path, image::ImageFormat::Png)
        .map_err(|source| MosaicError::ImageExport {
            path: output_path.to_path_buf(),
            source,
        })?;

    log::info!("Wrote {}", output_path.display());
    Ok(())
}
