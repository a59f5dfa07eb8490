//! SVG rasterization

use anyhow::{anyhow, Context, Result};
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{Options, Tree};

/// Parse SVG source bytes
pub fn parse_svg(data: &[u8]) -> Result<Tree> {
    Tree::from_data(data, &Options::default()).context("failed to parse SVG")
}

/// Render `tree` onto a transparent `size`x`size` canvas
///
/// The drawing keeps its aspect ratio: it is scaled so its longer side
/// fills the canvas and centered along the shorter one. Returns straight
/// (non-premultiplied) RGBA8 pixels, row-major.
pub fn render_square(tree: &Tree, size: u32) -> Result<Vec<u8>> {
    let mut pixmap =
        Pixmap::new(size, size).ok_or_else(|| anyhow!("invalid icon size {}", size))?;

    let svg_size = tree.size();
    let (width, height) = (svg_size.width(), svg_size.height());
    let scale = size as f32 / width.max(height);
    let offset_x = (size as f32 - width * scale) / 2.0;
    let offset_y = (size as f32 - height * scale) / 2.0;

    let transform = Transform::from_scale(scale, scale).post_translate(offset_x, offset_y);
    resvg::render(tree, transform, &mut pixmap.as_mut());

    let mut rgba = Vec::with_capacity((size * size * 4) as usize);
    for pixel in pixmap.pixels() {
        let color = pixel.demultiply();
        rgba.extend_from_slice(&[color.red(), color.green(), color.blue(), color.alpha()]);
    }

    Ok(rgba)
}
