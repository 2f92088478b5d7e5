/// Host-facing engine settings.
pub mod settings;
