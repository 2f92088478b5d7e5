use std::path::Path;

use crate::{
    animation::ease::Ease,
    assets::decode::{DEFAULT_MAX_SAMPLE_DIMENSION, SamplerOpts},
    effects::{
        color::ColorGrading,
        transitions::{JitterMode, TransitionStyle},
    },
    eval::evaluator::TransitionParams,
    foundation::error::{PixmorphError, PixmorphResult},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// How the frame background is filled.
pub enum BackgroundType {
    /// Opaque fill with `background_color`.
    #[default]
    Solid,
    /// Fully transparent background.
    Transparent,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Flat engine configuration supplied by the host application.
///
/// The engine treats settings as read-only input. Call [`Settings::validate`] before handing them
/// to a [`FrameDriver`](crate::FrameDriver); the engine itself assumes validated values.
pub struct Settings {
    /// Particles per image buffer.
    pub particle_count: usize,
    /// Rendered point diameter in object units.
    pub particle_size: f32,
    /// Transition algorithm.
    pub transition_style: TransitionStyle,
    /// Easing applied to transition progress.
    pub easing: Ease,
    /// Total timeline length in seconds, shared by all transitions.
    pub duration: f64,
    /// Export/playback frame rate.
    pub fps: u32,
    /// Contrast multiplier.
    pub color_contrast: f32,
    /// Saturation multiplier.
    pub color_saturation: f32,
    /// Brightness multiplier.
    pub color_brightness: f32,
    /// Offset depth by particle brightness.
    pub depth_enabled: bool,
    /// Spin the camera around the vertical axis while rendering.
    pub auto_rotate: bool,
    /// Auto-rotate speed in radians per second.
    pub auto_rotate_speed: f32,
    /// Background color as `#rrggbb` or `#rrggbbaa`.
    pub background_color: String,
    /// Background fill mode.
    pub background_type: BackgroundType,
    /// Keying of per-particle random sub-terms.
    pub jitter_mode: JitterMode,
    /// Longer-side cap applied when sampling images. A library created earlier picks up a change
    /// through [`AssetLibrary::set_sampler_opts`](crate::AssetLibrary::set_sampler_opts).
    pub max_sample_dimension: u32,
    /// Seed for particle jitter and per-particle random terms.
    pub seed: u64,
    /// Wrap the playhead to the start when it reaches `duration`.
    pub looping: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            particle_count: 20_000,
            particle_size: 0.02,
            transition_style: TransitionStyle::Morph,
            easing: Ease::InOutCubic,
            duration: 10.0,
            fps: 60,
            color_contrast: 1.0,
            color_saturation: 1.0,
            color_brightness: 1.0,
            depth_enabled: false,
            auto_rotate: false,
            auto_rotate_speed: 0.5,
            background_color: "#000000".to_string(),
            background_type: BackgroundType::Solid,
            jitter_mode: JitterMode::Stable,
            max_sample_dimension: DEFAULT_MAX_SAMPLE_DIMENSION,
            seed: 0,
            looping: true,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON string. Missing fields take their defaults.
    pub fn from_json_str(s: &str) -> PixmorphResult<Self> {
        serde_json::from_str(s).map_err(|e| PixmorphError::serde(e.to_string()))
    }

    /// Read and parse a JSON settings file.
    pub fn from_path(path: impl AsRef<Path>) -> PixmorphResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| PixmorphError::io(format!("read '{}': {e}", path.display())))?;
        Self::from_json_str(&text)
    }

    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> PixmorphResult<()> {
        if self.particle_count == 0 {
            return Err(PixmorphError::configuration("particle_count must be > 0"));
        }
        if !(self.particle_size.is_finite() && self.particle_size > 0.0) {
            return Err(PixmorphError::configuration(
                "particle_size must be finite and > 0",
            ));
        }
        if !(self.duration.is_finite() && self.duration > 0.0) {
            return Err(PixmorphError::configuration(
                "duration must be finite and > 0",
            ));
        }
        if self.fps == 0 {
            return Err(PixmorphError::configuration("fps must be > 0"));
        }
        for (name, v) in [
            ("color_contrast", self.color_contrast),
            ("color_saturation", self.color_saturation),
            ("color_brightness", self.color_brightness),
        ] {
            if !(v.is_finite() && v >= 0.0) {
                return Err(PixmorphError::configuration(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        if !self.auto_rotate_speed.is_finite() {
            return Err(PixmorphError::configuration(
                "auto_rotate_speed must be finite",
            ));
        }
        if self.max_sample_dimension == 0 {
            return Err(PixmorphError::configuration(
                "max_sample_dimension must be >= 1",
            ));
        }
        self.background_rgba()?;
        Ok(())
    }

    /// Evaluator parameters derived from these settings.
    pub fn transition_params(&self) -> TransitionParams {
        TransitionParams {
            style: self.transition_style,
            easing: self.easing,
            grading: ColorGrading {
                contrast: self.color_contrast,
                saturation: self.color_saturation,
                brightness: self.color_brightness,
            },
            depth_enabled: self.depth_enabled,
            jitter_mode: self.jitter_mode,
            seed: self.seed,
        }
    }

    /// Sampler options derived from these settings.
    pub fn sampler_opts(&self) -> SamplerOpts {
        SamplerOpts {
            max_dimension: self.max_sample_dimension,
        }
    }

    /// Straight-alpha RGBA8 background, honoring [`BackgroundType`].
    pub fn background_rgba(&self) -> PixmorphResult<[u8; 4]> {
        let rgba = parse_hex_color(&self.background_color)?;
        Ok(match self.background_type {
            BackgroundType::Solid => rgba,
            BackgroundType::Transparent => [rgba[0], rgba[1], rgba[2], 0],
        })
    }
}

/// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` (leading `#` optional).
pub fn parse_hex_color(s: &str) -> PixmorphResult<[u8; 4]> {
    let hex = s.trim().trim_start_matches('#');
    let bad = || PixmorphError::configuration(format!("invalid color '{s}'"));
    if !hex.is_ascii() {
        return Err(bad());
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| bad());
    match hex.len() {
        3 => {
            let nib = |i: usize| {
                u8::from_str_radix(&hex[i..i + 1], 16)
                    .map(|v| v * 17)
                    .map_err(|_| bad())
            };
            Ok([nib(0)?, nib(1)?, nib(2)?, 255])
        }
        6 => Ok([byte(0)?, byte(2)?, byte(4)?, 255]),
        8 => Ok([byte(0)?, byte(2)?, byte(4)?, byte(6)?]),
        _ => Err(bad()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/settings.rs"]
mod tests;
