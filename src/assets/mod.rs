//! Image decoding, sampling and the ordered image library.

/// Decode and downsample encoded images.
pub mod decode;
/// Ordered image set with background sampling.
pub mod store;
