//! Shared primitives: colors, object-space mapping, errors and hashing.

/// Colors, vectors and the object-space window.
pub mod core;
/// Error type and result alias.
pub mod error;
pub(crate) mod math;
