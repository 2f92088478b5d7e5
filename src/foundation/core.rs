pub use glam::Vec3;

/// Height of the shared object-space window every image is mapped into.
pub const OBJECT_HEIGHT: f32 = 4.0;

/// Pixels with normalized alpha at or below this value are not sampled.
pub const ALPHA_THRESHOLD: f32 = 0.1;

/// Linear RGB triple with channels nominally in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rgb {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
}

impl Rgb {
    /// Color used for particles of an image with no valid pixels.
    pub const NEUTRAL_GRAY: Self = Self::new(0.5, 0.5, 0.5);

    /// Construct from channels.
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Construct from straight (non-premultiplied) 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
        )
    }

    /// Channel-wise linear interpolation.
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
        )
    }

    /// Rec. 601 luma (`0.299r + 0.587g + 0.114b`).
    pub fn luma(self) -> f32 {
        0.299 * self.r + 0.587 * self.g + 0.114 * self.b
    }

    /// Unweighted channel average.
    pub fn mean(self) -> f32 {
        (self.r + self.g + self.b) / 3.0
    }

    /// Clamp every channel into `[0, 1]`.
    pub fn clamp01(self) -> Self {
        Self::new(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
        )
    }

    /// Quantize to 8-bit channels after clamping.
    pub fn to_rgb8(self) -> [u8; 3] {
        let c = self.clamp01();
        [
            (c.r * 255.0).round() as u8,
            (c.g * 255.0).round() as u8,
            (c.b * 255.0).round() as u8,
        ]
    }
}

/// Axis-aligned object-space rectangle an image of a given aspect ratio maps onto.
///
/// The height is always [`OBJECT_HEIGHT`]; the width scales with the aspect ratio so images of
/// different native resolutions share one coordinate space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObjectWindow {
    /// Full width in object units.
    pub width: f32,
    /// Full height in object units.
    pub height: f32,
}

impl ObjectWindow {
    /// Window for a `width x height` pixel image. Degenerate sizes map to a square window.
    pub fn for_image(width: u32, height: u32) -> Self {
        let aspect = if width == 0 || height == 0 {
            1.0
        } else {
            width as f32 / height as f32
        };
        Self {
            width: OBJECT_HEIGHT * aspect,
            height: OBJECT_HEIGHT,
        }
    }

    /// Map pixel `(x, y)` (row-major, y down) of a `w x h` image into object space (y up).
    pub fn map_pixel(self, x: u32, y: u32, w: u32, h: u32) -> (f32, f32) {
        let u = x as f32 / w.max(1) as f32 - 0.5;
        let v = y as f32 / h.max(1) as f32 - 0.5;
        (u * self.width, -v * self.height)
    }

    /// Map a unit-square coordinate `(u, v)` in `[0, 1)` into the window, centered on the origin.
    pub fn map_unit(self, u: f32, v: f32) -> (f32, f32) {
        ((u - 0.5) * self.width, (v - 0.5) * self.height)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
