use std::fmt;

/// Named particle transition algorithm.
///
/// Deserialization never fails: unknown names resolve to [`TransitionStyle::Morph`] so settings
/// saved by a newer engine still load.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum TransitionStyle {
    /// Straight linear interpolation.
    #[default]
    Morph,
    /// Radial burst away from the source, then a decaying pull into the target.
    Explode,
    /// Rotating offset around the interpolated path.
    Swirl,
    /// Position-keyed sinusoidal ripple in y and z.
    Wave,
    /// Z-only recede and return.
    Depth,
    /// Per-particle staggered drift.
    Dissolve,
    /// Rotation about the view axis with radial expansion.
    Spiral,
    /// Parabolic fall with a damped bounce.
    Gravity,
    /// Tunnel rotation with a shrinking radius.
    Vortex,
    /// Grid-snapped interpolation.
    Pixelate,
    /// Glass-shatter radial scatter.
    Shatter,
    /// Attract or repel depending on distance from the center.
    Magnetic,
    /// Distance-keyed ripple wave.
    Ripple,
    /// Detour through a random point of the object window.
    Scatter,
    /// Helical funnel.
    Tornado,
}

impl TransitionStyle {
    /// All styles, in declaration order.
    pub const ALL: [TransitionStyle; 15] = [
        Self::Morph,
        Self::Explode,
        Self::Swirl,
        Self::Wave,
        Self::Depth,
        Self::Dissolve,
        Self::Spiral,
        Self::Gravity,
        Self::Vortex,
        Self::Pixelate,
        Self::Shatter,
        Self::Magnetic,
        Self::Ripple,
        Self::Scatter,
        Self::Tornado,
    ];

    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Morph => "morph",
            Self::Explode => "explode",
            Self::Swirl => "swirl",
            Self::Wave => "wave",
            Self::Depth => "depth",
            Self::Dissolve => "dissolve",
            Self::Spiral => "spiral",
            Self::Gravity => "gravity",
            Self::Vortex => "vortex",
            Self::Pixelate => "pixelate",
            Self::Shatter => "shatter",
            Self::Magnetic => "magnetic",
            Self::Ripple => "ripple",
            Self::Scatter => "scatter",
            Self::Tornado => "tornado",
        }
    }

    /// Resolve a style name, case- and whitespace-insensitively. Unknown names yield `Morph`.
    pub fn parse_lenient(name: &str) -> Self {
        let key = name.trim().to_ascii_lowercase();
        match Self::ALL.iter().find(|s| s.name() == key) {
            Some(style) => *style,
            None => {
                tracing::debug!(name, "unknown transition style, using morph");
                Self::Morph
            }
        }
    }
}

impl From<String> for TransitionStyle {
    fn from(value: String) -> Self {
        Self::parse_lenient(&value)
    }
}

impl fmt::Display for TransitionStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How random sub-terms of `explode`, `gravity` and `shatter` are keyed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JitterMode {
    /// Keyed on particle index only: a frame at a given progress always looks the same.
    #[default]
    Stable,
    /// Additionally keyed on the frame time, so consecutive frames flicker.
    PerFrame,
}

#[cfg(test)]
#[path = "../../tests/unit/effects/transitions.rs"]
mod tests;
