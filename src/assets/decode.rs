use std::sync::Arc;

use crate::foundation::{
    core::{ALPHA_THRESHOLD, Rgb},
    error::{PixmorphError, PixmorphResult},
};

/// Default cap on the longer side of a sampled image, in pixels.
pub const DEFAULT_MAX_SAMPLE_DIMENSION: u32 = 256;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Options for [`sample_image`].
pub struct SamplerOpts {
    /// Longer side of the sampled raster is scaled down to at most this many pixels.
    pub max_dimension: u32,
}

impl Default for SamplerOpts {
    fn default() -> Self {
        Self {
            max_dimension: DEFAULT_MAX_SAMPLE_DIMENSION,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
/// Downscaled raster of one source image, immutable once built.
pub struct SourceImageSample {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Straight-alpha RGBA8, row-major, tightly packed.
    pub rgba8: Arc<Vec<u8>>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Pixel whose alpha exceeds [`ALPHA_THRESHOLD`].
pub struct ValidPixel {
    /// Column.
    pub x: u32,
    /// Row.
    pub y: u32,
    /// Normalized color.
    pub color: Rgb,
}

impl SourceImageSample {
    /// Wrap already-decoded straight RGBA8 pixels.
    pub fn from_rgba8(width: u32, height: u32, rgba8: Vec<u8>) -> PixmorphResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|px| px.checked_mul(4))
            .ok_or_else(|| PixmorphError::decode("image dimensions overflow"))?;
        if rgba8.len() != expected {
            return Err(PixmorphError::decode(format!(
                "rgba8 length {} does not match {width}x{height}",
                rgba8.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8: Arc::new(rgba8),
        })
    }

    /// Collect sampleable pixels in row-major order.
    pub fn valid_pixels(&self) -> Vec<ValidPixel> {
        let w = self.width as usize;
        self.rgba8
            .chunks_exact(4)
            .enumerate()
            .filter(|(_, px)| f32::from(px[3]) / 255.0 > ALPHA_THRESHOLD)
            .map(|(idx, px)| ValidPixel {
                x: (idx % w) as u32,
                y: (idx / w) as u32,
                color: Rgb::from_rgb8(px[0], px[1], px[2]),
            })
            .collect()
    }
}

/// Decode encoded image bytes into a bounded [`SourceImageSample`].
///
/// The image is scaled (aspect preserved) so its longer side is at most `opts.max_dimension`.
#[tracing::instrument(skip(bytes), fields(len = bytes.len()))]
pub fn sample_image(bytes: &[u8], opts: &SamplerOpts) -> PixmorphResult<SourceImageSample> {
    if opts.max_dimension == 0 {
        return Err(PixmorphError::configuration(
            "max sample dimension must be >= 1",
        ));
    }
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| PixmorphError::decode(format!("decode image from memory: {e}")))?;

    let (w, h) = (dyn_img.width(), dyn_img.height());
    if w == 0 || h == 0 {
        return Err(PixmorphError::decode("image has zero area"));
    }
    let (sw, sh) = bounded_dimensions(w, h, opts.max_dimension);
    let rgba = if (sw, sh) == (w, h) {
        dyn_img.to_rgba8()
    } else {
        dyn_img
            .resize_exact(sw, sh, image::imageops::FilterType::Triangle)
            .to_rgba8()
    };

    let (width, height) = rgba.dimensions();
    tracing::debug!(src_w = w, src_h = h, width, height, "sampled image");
    SourceImageSample::from_rgba8(width, height, rgba.into_raw())
}

/// Largest size with the same aspect ratio whose longer side is `<= max_dim` (never upscales).
pub fn bounded_dimensions(width: u32, height: u32, max_dim: u32) -> (u32, u32) {
    let longer = width.max(height);
    if longer <= max_dim {
        return (width, height);
    }
    let scale = f64::from(max_dim) / f64::from(longer);
    let sw = ((f64::from(width) * scale).round() as u32).clamp(1, max_dim);
    let sh = ((f64::from(height) * scale).round() as u32).clamp(1, max_dim);
    (sw, sh)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
