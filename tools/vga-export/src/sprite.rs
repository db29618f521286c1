//! Sprite converter (PNG/JPG/BMP/GIF -> sprite_item_<name>.h)
//!
//! Pixels are quantized to the 6x6x6 VGA palette: each 8-bit channel is
//! divided by the palette step and rounded, giving a level in `0..=5`.

use anyhow::Result;
use image::RgbImage;
use std::path::Path;
use vgakit_shared::VGA_HEADER_FORMAT;
use vgakit_shared::fs::{MAX_IMAGE_BYTES, read_file_with_limit, write_text};

use crate::header::generate_sprite_header;
use crate::outcome::{ExportOutcome, SkipReason};

/// Quantized sprite, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    pub width: u32,
    pub height: u32,
    /// Palette levels per pixel, `width * height` entries
    pub pixels: Vec<[u8; 3]>,
}

/// Map one 8-bit channel onto a palette level (`round(c / 51)`).
pub fn quantize_channel(value: u8) -> u8 {
    let step = VGA_HEADER_FORMAT.palette_step as u16;
    ((value as u16 + step / 2) / step) as u8
}

pub fn quantize_pixel([r, g, b]: [u8; 3]) -> [u8; 3] {
    [quantize_channel(r), quantize_channel(g), quantize_channel(b)]
}

/// Quantize a raster in the order the renderer indexes it (`y * width + x`).
pub fn quantize_image(img: &RgbImage) -> Sprite {
    let (width, height) = img.dimensions();
    let pixels = img.pixels().map(|px| quantize_pixel(px.0)).collect();

    Sprite {
        width,
        height,
        pixels,
    }
}

/// Convert an image file to a sprite header.
///
/// Undecodable or empty images yield [`ExportOutcome::Skipped`]. I/O failures
/// are returned as errors.
pub fn convert_image(input: &Path, output: &Path, ident: &str) -> Result<ExportOutcome> {
    let bytes = read_file_with_limit(input, MAX_IMAGE_BYTES)?;

    let img = match image::load_from_memory(&bytes) {
        Ok(img) => img.to_rgb8(),
        Err(e) => return Ok(ExportOutcome::Skipped(SkipReason::Image(e))),
    };
    if img.width() == 0 || img.height() == 0 {
        return Ok(ExportOutcome::Skipped(SkipReason::EmptyImage));
    }

    let sprite = quantize_image(&img);
    let header = generate_sprite_header(ident, &sprite)?;
    write_text(output, &header)?;

    tracing::info!(
        "Converted sprite: {}x{}, {} pixels",
        sprite.width,
        sprite.height,
        sprite.pixels.len()
    );

    Ok(ExportOutcome::Written(output.to_path_buf()))
}
