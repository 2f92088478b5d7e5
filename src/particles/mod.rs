/// Flat particle storage.
pub mod buffer;
/// Image-to-particle generation.
pub mod generate;
