use std::sync::Arc;

use rayon::prelude::*;

use crate::{
    assets::{decode::SourceImageSample, store::AssetLibrary},
    config::settings::Settings,
    eval::{
        evaluator::{EvalThreading, FrameInputs, TransitionParams, evaluate_frame_into},
        timeline::{TimelinePosition, TimelineState},
    },
    foundation::error::{PixmorphError, PixmorphResult},
    particles::{
        buffer::ParticleBuffer,
        generate::{generate_particles_seeded, seed_for_asset},
    },
};

#[derive(Clone, Debug)]
/// Particle buffer generated for one timeline image.
pub struct ImageParticles {
    /// Asset id the buffer was generated from.
    pub id: String,
    /// Sample the buffer was generated from.
    pub sample: Arc<SourceImageSample>,
    /// Generated particles; never mutated after creation.
    pub particles: Arc<ParticleBuffer>,
}

/// Owns playback time and the per-image buffers, and produces one displayed frame per tick.
///
/// Evaluation writes into a back buffer that is swapped with the front buffer once complete, so
/// [`frame`](Self::frame) always exposes a fully evaluated frame.
pub struct FrameDriver {
    settings: Settings,
    params: TransitionParams,
    threading: EvalThreading,
    pool: Option<rayon::ThreadPool>,

    images: Vec<ImageParticles>,
    placeholder: Arc<ParticleBuffer>,
    library_revision: Option<u64>,

    time: f64,
    playing: bool,

    front: ParticleBuffer,
    back: ParticleBuffer,
}

impl FrameDriver {
    /// Create a driver with no images. `settings` are validated first.
    pub fn new(settings: Settings) -> PixmorphResult<Self> {
        settings.validate()?;
        let placeholder = Arc::new(placeholder_buffer(&settings));
        Ok(Self {
            params: settings.transition_params(),
            settings,
            threading: EvalThreading::default(),
            pool: None,
            images: Vec::new(),
            placeholder,
            library_revision: None,
            time: 0.0,
            playing: false,
            front: ParticleBuffer::default(),
            back: ParticleBuffer::default(),
        })
    }

    /// Override evaluation scheduling. `threads` builds a dedicated rayon pool when set.
    pub fn with_threading(
        mut self,
        threading: EvalThreading,
        threads: Option<usize>,
    ) -> PixmorphResult<Self> {
        self.threading = threading;
        self.pool = match threads {
            Some(n) => Some(build_thread_pool(n)?),
            None => None,
        };
        Ok(self)
    }

    /// Current settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace the settings. Buffers are regenerated when the particle count or seed changes.
    #[tracing::instrument(skip(self, settings))]
    pub fn update_settings(&mut self, settings: Settings) -> PixmorphResult<()> {
        settings.validate()?;
        let regenerate = settings.particle_count != self.settings.particle_count
            || settings.seed != self.settings.seed;
        self.params = settings.transition_params();
        self.settings = settings;
        self.time = self.time.clamp(0.0, self.settings.duration);
        if regenerate {
            self.regenerate_all();
        }
        Ok(())
    }

    /// Change the particle count, regenerating every buffer.
    pub fn set_particle_count(&mut self, count: usize) -> PixmorphResult<()> {
        let settings = Settings {
            particle_count: count,
            ..self.settings.clone()
        };
        self.update_settings(settings)
    }

    /// Replace the ordered image set.
    ///
    /// Buffers already generated for the same id and sample are reused; everything else is
    /// generated fresh.
    #[tracing::instrument(skip(self, samples), fields(n = samples.len()))]
    pub fn set_samples(&mut self, samples: Vec<(String, Arc<SourceImageSample>)>) {
        let count = self.settings.particle_count;
        let seed = self.settings.seed;
        let previous = std::mem::take(&mut self.images);
        self.images = samples
            .into_par_iter()
            .map(|(id, sample)| {
                let reusable = previous.iter().find(|p| {
                    p.id == id && Arc::ptr_eq(&p.sample, &sample) && p.particles.len() == count
                });
                match reusable {
                    Some(p) => p.clone(),
                    None => generate_image(id, sample, count, seed),
                }
            })
            .collect();
    }

    /// Pull the library's ready samples if it changed since the last sync. Returns `true` when the
    /// image set was rebuilt.
    pub fn sync_library(&mut self, library: &AssetLibrary) -> bool {
        if self.library_revision == Some(library.revision()) {
            return false;
        }
        self.library_revision = Some(library.revision());
        self.set_samples(library.ready_samples());
        true
    }

    /// Images on the timeline, in order.
    pub fn images(&self) -> &[ImageParticles] {
        &self.images
    }

    /// Start or resume playback.
    pub fn play(&mut self) {
        self.playing = true;
    }

    /// Pause playback; time stops advancing.
    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Whether time advances on [`tick`](Self::tick).
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Playhead in seconds.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Move the playhead, clamped to `[0, duration]`.
    pub fn seek(&mut self, time: f64) {
        self.time = if time.is_finite() {
            time.clamp(0.0, self.settings.duration)
        } else {
            0.0
        };
    }

    /// Timeline snapshot for the current playhead.
    pub fn timeline(&self) -> TimelineState {
        TimelineState {
            duration: self.settings.duration,
            current_time: self.time,
            image_count: self.images.len(),
        }
    }

    /// Active pair and progress for the current playhead.
    pub fn position(&self) -> TimelinePosition {
        self.timeline().position()
    }

    /// Most recently evaluated frame.
    pub fn frame(&self) -> &ParticleBuffer {
        &self.front
    }

    /// Advance time by `delta` seconds (only while playing) and evaluate the next frame.
    pub fn tick(&mut self, delta: f64) -> PixmorphResult<&ParticleBuffer> {
        self.advance(delta);
        self.render_current()
    }

    /// Evaluate the frame for the current playhead without advancing time.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn render_current(&mut self) -> PixmorphResult<&ParticleBuffer> {
        let pos = self.position();
        let (source, target) = match (self.images.get(pos.current), self.images.get(pos.next)) {
            (Some(a), Some(b)) => (Arc::clone(&a.particles), Arc::clone(&b.particles)),
            _ => (Arc::clone(&self.placeholder), Arc::clone(&self.placeholder)),
        };
        let inputs = FrameInputs {
            progress: pos.progress,
            time: self.time,
            playing: self.playing,
            image_count: self.images.len(),
        };

        let params = &self.params;
        let threading = &self.threading;
        let back = &mut self.back;
        match &self.pool {
            Some(pool) => pool.install(|| {
                evaluate_frame_into(&source, &target, params, &inputs, threading, back)
            })?,
            None => evaluate_frame_into(&source, &target, params, &inputs, threading, back)?,
        }
        std::mem::swap(&mut self.front, &mut self.back);
        Ok(&self.front)
    }

    fn advance(&mut self, delta: f64) {
        if !self.playing || !delta.is_finite() || delta <= 0.0 {
            return;
        }
        let duration = self.settings.duration;
        self.time += delta;
        if self.time >= duration {
            if self.settings.looping {
                self.time = self.time.rem_euclid(duration);
            } else {
                self.time = duration;
                self.playing = false;
            }
        }
    }

    fn regenerate_all(&mut self) {
        tracing::debug!(
            count = self.settings.particle_count,
            images = self.images.len(),
            "regenerating particle buffers"
        );
        self.placeholder = Arc::new(placeholder_buffer(&self.settings));
        let samples = self
            .images
            .drain(..)
            .map(|img| (img.id, img.sample))
            .collect();
        self.set_samples(samples);
        self.front = ParticleBuffer::default();
        self.back = ParticleBuffer::default();
    }
}

fn generate_image(
    id: String,
    sample: Arc<SourceImageSample>,
    count: usize,
    seed: u64,
) -> ImageParticles {
    let particles = generate_particles_seeded(&sample, count, seed_for_asset(seed, &id));
    ImageParticles {
        id,
        sample,
        particles: Arc::new(particles),
    }
}

/// Gray cloud displayed while no image is ready.
fn placeholder_buffer(settings: &Settings) -> ParticleBuffer {
    let empty = SourceImageSample {
        width: 0,
        height: 0,
        rgba8: Arc::new(Vec::new()),
    };
    generate_particles_seeded(&empty, settings.particle_count, settings.seed)
}

fn build_thread_pool(threads: usize) -> PixmorphResult<rayon::ThreadPool> {
    if threads == 0 {
        return Err(PixmorphError::configuration(
            "evaluation threads must be >= 1 when set",
        ));
    }
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|e| PixmorphError::evaluation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/driver.rs"]
mod tests;
