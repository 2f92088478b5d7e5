/// Result alias used throughout the crate.
pub type PixmorphResult<T> = Result<T, PixmorphError>;

#[derive(thiserror::Error, Debug)]
/// Error type shared by the sampler, configuration layer, and frame pipeline.
pub enum PixmorphError {
    /// Image bytes could not be decoded into pixels.
    #[error("decode error: {0}")]
    Decode(String),

    /// Settings rejected at the validation boundary.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Evaluation inputs were inconsistent (for example mismatched buffer lengths).
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// JSON (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Filesystem failure while reading inputs or writing exports.
    #[error("io error: {0}")]
    Io(String),

    /// Any other error, preserving its source chain.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PixmorphError {
    /// Build a [`PixmorphError::Decode`].
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`PixmorphError::Configuration`].
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`PixmorphError::Evaluation`].
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`PixmorphError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build a [`PixmorphError::Io`].
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
