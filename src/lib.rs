// Moncord Library - Public API

// Re-export error types
pub mod error;
pub use error::{MoncordError, Result};

// Module declarations
pub mod core;

// Re-export commonly used types
pub use core::config::Config;

// Initialize logging
pub fn init_logging() {
    let level = std::env::var("LOG_LEVEL")
        .ok()
        .and_then(|value| value.parse::<log::LevelFilter>().ok())
        .unwrap_or(log::LevelFilter::Info);

    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}
