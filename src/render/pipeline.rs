use crate::{
    config::settings::Settings,
    encode::sink::{FrameSink, SinkConfig},
    foundation::error::{PixmorphError, PixmorphResult},
    render::driver::FrameDriver,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Frame range of an export; `end = None` runs to the end of the timeline.
pub struct ExportRange {
    /// First frame index (inclusive).
    pub start: u64,
    /// Last frame index (exclusive).
    pub end: Option<u64>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Export counters.
pub struct ExportStats {
    /// Frames pushed to the sink.
    pub frames_rendered: u64,
}

/// Frames on the timeline at `settings.fps`.
pub fn timeline_frame_count(settings: &Settings) -> u64 {
    (settings.duration * f64::from(settings.fps)).ceil().max(1.0) as u64
}

/// Playhead of frame `idx` at `fps`.
pub fn frame_time(idx: u64, fps: u32) -> f64 {
    idx as f64 / f64::from(fps)
}

/// Replay the timeline frame by frame into `sink`.
///
/// Frame `k` is evaluated at `k / fps` with playback considered running, independent of wall
/// clock, so two exports with the same settings and images push identical frames. The driver's
/// playhead and play state are restored afterwards.
#[tracing::instrument(skip(driver, sink))]
pub fn render_sequence(
    driver: &mut FrameDriver,
    sink: &mut dyn FrameSink,
    range: ExportRange,
) -> PixmorphResult<ExportStats> {
    let total = timeline_frame_count(driver.settings());
    let end = range.end.unwrap_or(total).min(total);
    if range.start >= end {
        return Err(PixmorphError::configuration(format!(
            "export range [{}, {end}) is empty (timeline has {total} frames)",
            range.start
        )));
    }

    let saved_time = driver.time();
    let was_playing = driver.is_playing();
    driver.play();
    let result = replay(driver, sink, range.start, end);
    driver.seek(saved_time);
    if !was_playing {
        driver.pause();
    }

    let stats = result?;
    tracing::debug!(frames = stats.frames_rendered, "export finished");
    Ok(stats)
}

fn replay(
    driver: &mut FrameDriver,
    sink: &mut dyn FrameSink,
    start: u64,
    end: u64,
) -> PixmorphResult<ExportStats> {
    let fps = driver.settings().fps;
    sink.begin(SinkConfig {
        particle_count: driver.settings().particle_count,
        fps,
        frame_count: end - start,
    })?;

    let mut stats = ExportStats::default();
    for idx in start..end {
        let time = frame_time(idx, fps);
        driver.seek(time);
        let frame = driver.render_current()?;
        sink.push_frame(idx, time, frame)?;
        stats.frames_rendered += 1;
    }

    sink.end()?;
    Ok(stats)
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
