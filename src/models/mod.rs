pub mod config;
pub mod window;

pub use config::{AppConfig, Keyframe, CONFIG_ENV};
pub use window::parse_window;
