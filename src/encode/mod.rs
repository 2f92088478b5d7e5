//! Export sinks.
//!
//! Sinks consume evaluated frames in timeline order and are fed by
//! [`render_sequence`](crate::render_sequence).

/// PNG sequence output.
pub mod png;
/// Generic frame sink trait and built-in sinks.
pub mod sink;
