#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// Active image pair and progress for one playhead position.
pub struct TimelinePosition {
    /// Index of the image being transitioned away from.
    pub current: usize,
    /// Index of the image being transitioned into.
    pub next: usize,
    /// Linear progress through the current transition, in `[0, 1]`.
    pub progress: f64,
}

impl TimelinePosition {
    /// Position used whenever there is nothing to transition between.
    pub const STATIC: Self = Self {
        current: 0,
        next: 0,
        progress: 0.0,
    };
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// Playhead state owned by the frame driver.
pub struct TimelineState {
    /// Total timeline length in seconds. Must be positive.
    pub duration: f64,
    /// Playhead in `[0, duration]`.
    pub current_time: f64,
    /// Number of images on the timeline.
    pub image_count: usize,
}

impl TimelineState {
    /// Number of transitions between consecutive images.
    pub fn transition_count(&self) -> usize {
        self.image_count.saturating_sub(1)
    }

    /// Length of one transition; the whole duration when there is at most one image.
    pub fn transition_duration(&self) -> f64 {
        match self.transition_count() {
            0 => self.duration,
            n => self.duration / n as f64,
        }
    }

    /// Map the playhead to its active pair.
    pub fn position(&self) -> TimelinePosition {
        map_timeline(self.current_time, self.duration, self.image_count)
    }
}

/// Map `time` on a `duration`-second timeline of `image_count` images to the active pair.
///
/// With one image or none the result is always [`TimelinePosition::STATIC`]. `duration` is
/// assumed positive (validated by [`Settings::validate`](crate::Settings::validate)).
pub fn map_timeline(time: f64, duration: f64, image_count: usize) -> TimelinePosition {
    if image_count <= 1 {
        return TimelinePosition::STATIC;
    }

    let transitions = image_count - 1;
    let span = duration / transitions as f64;
    let slot = (time / span).floor();
    let current = if slot.is_finite() && slot > 0.0 {
        (slot as usize).min(transitions - 1)
    } else {
        0
    };
    let progress = ((time - current as f64 * span) / span).clamp(0.0, 1.0);
    let progress = if progress.is_nan() { 0.0 } else { progress };

    TimelinePosition {
        current,
        next: (current + 1) % image_count,
        progress,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/timeline.rs"]
mod tests;
