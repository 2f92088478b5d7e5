use glam::Mat3;

use crate::{
    config::settings::Settings,
    foundation::{
        core::OBJECT_HEIGHT,
        error::{PixmorphError, PixmorphResult},
    },
    particles::buffer::ParticleBuffer,
};

/// Object-space height visible in a rasterized frame; leaves a margin around the image window.
pub const DEFAULT_VIEW_HEIGHT: f32 = OBJECT_HEIGHT * 1.25;

#[derive(Clone, Debug, PartialEq, Eq)]
/// A rasterized frame.
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Straight-alpha RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
}

impl FrameRGBA {
    /// RGBA of pixel `(x, y)`. Panics if out of range.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let o = (y as usize * self.width as usize + x as usize) * 4;
        [
            self.data[o],
            self.data[o + 1],
            self.data[o + 2],
            self.data[o + 3],
        ]
    }
}

#[derive(Clone, Debug, PartialEq)]
/// Orthographic point rasterizer settings.
pub struct RasterOpts {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Point size in object units.
    pub particle_size: f32,
    /// Object-space height mapped to the full output height.
    pub view_height: f32,
    /// Straight-alpha background fill.
    pub background: [u8; 4],
    /// Rotate the particles around the vertical axis over time.
    pub auto_rotate: bool,
    /// Rotation speed in radians per second.
    pub auto_rotate_speed: f32,
}

impl RasterOpts {
    /// Rasterizer options for a `width`×`height` output derived from `settings`.
    pub fn from_settings(settings: &Settings, width: u32, height: u32) -> PixmorphResult<Self> {
        Ok(Self {
            width,
            height,
            particle_size: settings.particle_size,
            view_height: DEFAULT_VIEW_HEIGHT,
            background: settings.background_rgba()?,
            auto_rotate: settings.auto_rotate,
            auto_rotate_speed: settings.auto_rotate_speed,
        })
    }

    /// Rotation about the vertical axis at `time`, in radians.
    pub fn rotation_at(&self, time: f64) -> f32 {
        if self.auto_rotate {
            (time * f64::from(self.auto_rotate_speed)) as f32
        } else {
            0.0
        }
    }

    fn validate(&self) -> PixmorphResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(PixmorphError::configuration(format!(
                "raster size must be non-zero (got {}x{})",
                self.width, self.height
            )));
        }
        if !(self.view_height.is_finite() && self.view_height > 0.0) {
            return Err(PixmorphError::configuration(
                "view_height must be finite and > 0",
            ));
        }
        Ok(())
    }
}

/// Draw `frame` as square points over the background, far points first.
#[tracing::instrument(level = "trace", skip(frame, opts), fields(n = frame.len()))]
pub fn rasterize(frame: &ParticleBuffer, time: f64, opts: &RasterOpts) -> PixmorphResult<FrameRGBA> {
    opts.validate()?;
    let (w, h) = (opts.width as usize, opts.height as usize);
    let mut data = opts.background.repeat(w * h);

    let rot = Mat3::from_rotation_y(opts.rotation_at(time));
    let scale = opts.height as f32 / opts.view_height;
    let side = (opts.particle_size * scale).round().max(1.0) as i64;
    let half = side / 2;
    let (cx, cy) = (w as f32 * 0.5, h as f32 * 0.5);

    let mut points: Vec<(f32, i64, i64, usize)> = (0..frame.len())
        .map(|i| {
            let p = rot * frame.position(i);
            let sx = (cx + p.x * scale).floor() as i64;
            let sy = (cy - p.y * scale).floor() as i64;
            (p.z, sx, sy, i)
        })
        .collect();
    points.sort_by(|a, b| a.0.total_cmp(&b.0));

    for (_, sx, sy, i) in points {
        let [r, g, b] = frame.color(i).to_rgb8();
        let (x0, y0) = ((sx - half).max(0), (sy - half).max(0));
        let (x1, y1) = ((sx - half + side).min(w as i64), (sy - half + side).min(h as i64));
        for y in y0..y1 {
            for x in x0..x1 {
                let o = (y as usize * w + x as usize) * 4;
                data[o..o + 4].copy_from_slice(&[r, g, b, 255]);
            }
        }
    }

    Ok(FrameRGBA {
        width: opts.width,
        height: opts.height,
        data,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
