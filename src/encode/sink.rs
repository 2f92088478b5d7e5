use crate::{foundation::error::PixmorphResult, particles::buffer::ParticleBuffer};

/// Configuration provided to a [`FrameSink`] at the start of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    /// Particles per frame.
    pub particle_count: usize,
    /// Export frames-per-second.
    pub fps: u32,
    /// Number of frames that will be pushed.
    pub frame_count: u64,
}

/// Sink contract for consuming evaluated frames in timeline order.
///
/// Ordering contract: `push_frame` is called in strictly increasing frame index order within the
/// exported range.
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> PixmorphResult<()>;
    /// Push one frame evaluated at `time` seconds.
    fn push_frame(&mut self, idx: u64, time: f64, frame: &ParticleBuffer) -> PixmorphResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> PixmorphResult<()>;
}

/// One frame captured by [`InMemorySink`].
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedFrame {
    /// Frame index within the export.
    pub idx: u64,
    /// Playhead the frame was evaluated at.
    pub time: f64,
    /// Evaluated particles.
    pub particles: ParticleBuffer,
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<CapturedFrame>,
    finished: bool,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[CapturedFrame] {
        &self.frames
    }

    /// `true` once `end` has been called for the current export.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> PixmorphResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.finished = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: u64, time: f64, frame: &ParticleBuffer) -> PixmorphResult<()> {
        self.frames.push(CapturedFrame {
            idx,
            time,
            particles: frame.clone(),
        });
        Ok(())
    }

    fn end(&mut self) -> PixmorphResult<()> {
        self.finished = true;
        Ok(())
    }
}
