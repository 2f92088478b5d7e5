//! Timeline mapping and per-frame particle evaluation.

/// Per-particle transition evaluator.
pub mod evaluator;
/// Playhead to image-pair mapping.
pub mod timeline;
