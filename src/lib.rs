//! Pixmorph turns a sequence of images into particle clouds and animates transitions between them.
//!
//! Each image is sampled into a fixed-length [`ParticleBuffer`]; a [`FrameDriver`] owns playback
//! time and evaluates one displayed buffer per tick by blending the active image pair with the
//! configured [`TransitionStyle`]:
//!
//! - Register encoded images in an [`AssetLibrary`] and sample them (optionally in the background)
//! - Create a [`FrameDriver`] from validated [`Settings`] and sync it with the library
//! - Tick the driver for live playback, or stream a deterministic replay into a [`FrameSink`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Easing curves.
pub mod animation;
/// Image decoding and the image library.
pub mod assets;
/// Engine settings.
pub mod config;
/// Transition styles and color grading.
pub mod effects;
/// Export sinks.
pub mod encode;
/// Timeline mapping and frame evaluation.
pub mod eval;
/// Shared primitives.
pub mod foundation;
/// Particle buffers and generation.
pub mod particles;
/// Frame driving, rasterization and export.
pub mod render;

pub use crate::animation::ease::Ease;
pub use crate::assets::decode::{SamplerOpts, SourceImageSample, sample_image};
pub use crate::assets::store::{
    ApplyOutcome, AssetLibrary, AssetSource, SampleRequest, SampledAsset, SamplingBatch,
};
pub use crate::config::settings::{BackgroundType, Settings};
pub use crate::effects::color::ColorGrading;
pub use crate::effects::transitions::{JitterMode, TransitionStyle};
pub use crate::encode::png::{PngSequenceOpts, PngSequenceSink};
pub use crate::encode::sink::{CapturedFrame, FrameSink, InMemorySink, SinkConfig};
pub use crate::eval::evaluator::{
    EvalThreading, FrameInputs, TransitionParams, evaluate_frame, evaluate_frame_into,
};
pub use crate::eval::timeline::{TimelinePosition, TimelineState, map_timeline};
pub use crate::foundation::core::{Rgb, Vec3};
pub use crate::foundation::error::{PixmorphError, PixmorphResult};
pub use crate::particles::buffer::ParticleBuffer;
pub use crate::particles::generate::{generate_particles, generate_particles_seeded};
pub use crate::render::driver::{FrameDriver, ImageParticles};
pub use crate::render::pipeline::{ExportRange, ExportStats, render_sequence};
pub use crate::render::raster::{FrameRGBA, RasterOpts, rasterize};
