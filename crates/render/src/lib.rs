//! SVG to ICO conversion for icowatch
//!
//! Implements the core `Converter` port:
//! - rasterize the SVG at each icon size, scaled to fit and centered on a
//!   transparent square
//! - pack the frames (PNG-compressed) into one ICO container
//! - write it next to the source with the `.ico` extension

pub mod ico;
pub mod raster;

use anyhow::Context;
use iconwatch_core::{derive_output_path, ConvertError, Converter};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Icon sizes written into every artifact, largest first
pub const ICON_SIZES: [u32; 6] = [256, 128, 64, 48, 32, 16];

/// Converts SVG files into multi-resolution ICO files
#[derive(Debug, Clone)]
pub struct IcoConverter {
    sizes: Vec<u32>,
}

impl Default for IcoConverter {
    fn default() -> Self {
        Self {
            sizes: ICON_SIZES.to_vec(),
        }
    }
}

impl IcoConverter {
    /// Converter producing the standard icon sizes
    pub fn new() -> Self {
        Self::default()
    }

    /// Render SVG bytes into an encoded ICO container
    pub fn render_icon(&self, svg: &[u8]) -> anyhow::Result<Vec<u8>> {
        let tree = raster::parse_svg(svg)?;

        let frames = self
            .sizes
            .iter()
            .map(|&size| raster::render_square(&tree, size).map(|rgba| (size, rgba)))
            .collect::<anyhow::Result<Vec<_>>>()?;

        ico::encode_icon(&frames)
    }
}

impl Converter for IcoConverter {
    fn convert(&self, source: &Path) -> Result<PathBuf, ConvertError> {
        let svg = fs::read(source).map_err(|err| ConvertError::from_io(source, err))?;

        let icon = self
            .render_icon(&svg)
            .with_context(|| format!("failed to convert {}", source.display()))?;

        let output = derive_output_path(source);
        fs::write(&output, &icon).map_err(|err| ConvertError::from_io(&output, err))?;

        debug!(
            "Wrote {} ({} bytes, {} sizes)",
            output.display(),
            icon.len(),
            self.sizes.len()
        );
        Ok(output)
    }
}
