mod color;
mod settings;

pub use color::Color;
pub use settings::{DEFAULT_SETTINGS_YAML, Settings};
