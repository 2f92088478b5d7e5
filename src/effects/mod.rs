/// Color grading.
pub mod color;
/// Per-style displacement functions.
pub mod styles;
/// Transition style catalogue.
pub mod transitions;
