use crate::foundation::core::Rgb;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Brightness/contrast/saturation multipliers applied to every displayed particle color.
pub struct ColorGrading {
    /// Contrast around mid-gray; `1.0` is neutral.
    pub contrast: f32,
    /// Saturation relative to Rec. 601 luma; `1.0` is neutral, `0.0` is grayscale.
    pub saturation: f32,
    /// Channel multiplier; `1.0` is neutral.
    pub brightness: f32,
}

impl Default for ColorGrading {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl ColorGrading {
    /// Identity grading.
    pub const NEUTRAL: Self = Self {
        contrast: 1.0,
        saturation: 1.0,
        brightness: 1.0,
    };

    /// Apply brightness, then contrast, then saturation, and clamp to `[0, 1]`.
    pub fn apply(self, c: Rgb) -> Rgb {
        if self == Self::NEUTRAL {
            return c.clamp01();
        }
        let b = self.brightness;
        let c = Rgb::new(c.r * b, c.g * b, c.b * b);

        let k = self.contrast;
        let contrast = |v: f32| (v - 0.5) * k + 0.5;
        let c = Rgb::new(contrast(c.r), contrast(c.g), contrast(c.b));

        let gray = c.luma();
        let s = self.saturation;
        let saturate = |v: f32| gray + (v - gray) * s;
        Rgb::new(saturate(c.r), saturate(c.g), saturate(c.b)).clamp01()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/color.rs"]
mod tests;
