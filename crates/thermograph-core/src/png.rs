// File: crates/thermograph-core/src/png.rs
// Summary: PNG encoding of unpremultiplied RGBA8 frames.

use anyhow::{anyhow, Result};
use image::{ImageFormat, RgbaImage};
use std::io::Cursor;

/// Encode a tightly packed RGBA8 buffer (`width * 4` bytes per row) as PNG.
pub fn encode_rgba8(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    let img = RgbaImage::from_raw(width, height, pixels.to_vec())
        .ok_or_else(|| anyhow!("pixel buffer of {} bytes does not fit {width}x{height}", pixels.len()))?;
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png)?;
    Ok(out.into_inner())
}
