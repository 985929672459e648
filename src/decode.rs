//! Image decoding seam.
//!
//! The engine never parses image containers itself; it asks a `LumaDecoder`
//! for a single-channel luminance grid and treats any failure as a per-frame
//! decode error. The production decoder delegates to the `image` crate.

use anyhow::{anyhow, Context, Result};

use crate::grid::Grid;

/// Decodes an encoded raster image into a luminance grid.
///
/// Implementations must be deterministic: the same bytes always produce the
/// same grid. Values are in the 0.0-255.0 luma range.
pub trait LumaDecoder {
    fn decode_luminance(&self, bytes: &[u8]) -> Result<Grid<f32>>;
}

/// Production decoder backed by the `image` crate (PNG/JPEG).
///
/// Color inputs are reduced to luminance with the crate's luma weighting;
/// the engine only ever sees the single-channel result.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImageLumaDecoder;

impl LumaDecoder for ImageLumaDecoder {
    fn decode_luminance(&self, bytes: &[u8]) -> Result<Grid<f32>> {
        if bytes.is_empty() {
            return Err(anyhow!("empty image buffer"));
        }
        let image = image::load_from_memory(bytes).context("decode image")?;
        let luma = image.to_luma8();
        let (width, height) = luma.dimensions();
        let data = luma.into_raw().into_iter().map(f32::from).collect();
        Grid::new(width, height, data)
    }
}
