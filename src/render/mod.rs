//! Frame driving, point rasterization and deterministic export.

/// Playback state and double-buffered frame evaluation.
pub mod driver;
/// Export replay into a [`FrameSink`](crate::FrameSink).
pub mod pipeline;
/// Orthographic point rasterizer.
pub mod raster;
