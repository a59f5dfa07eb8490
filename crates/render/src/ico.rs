//! ICO container encoding

use anyhow::{Context, Result};
use image::codecs::ico::{IcoEncoder, IcoFrame};
use image::ExtendedColorType;

/// Pack square RGBA8 frames, given as `(size, pixels)`, into an ICO file
///
/// Frames are stored PNG-compressed, in the order given.
pub fn encode_icon(frames: &[(u32, Vec<u8>)]) -> Result<Vec<u8>> {
    let frames = frames
        .iter()
        .map(|(size, rgba)| {
            IcoFrame::as_png(rgba, *size, *size, ExtendedColorType::Rgba8)
                .with_context(|| format!("failed to encode {0}x{0} frame", size))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut icon = Vec::new();
    IcoEncoder::new(&mut icon)
        .encode_images(&frames)
        .context("failed to write ICO container")?;

    Ok(icon)
}
