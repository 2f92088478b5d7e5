/// Easing curves applied to transition progress.
pub mod ease;
