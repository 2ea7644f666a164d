//! Utility modules for error handling, logging and configuration

pub mod config;
pub mod error;
pub mod logging;
pub mod platform;

// Re-export for convenience
pub use config::{AppConfig, DEFAULT_REQUEST_TIMEOUT, MAX_CONCURRENT_REQUESTS};
pub use error::{ConfigError, ValidationError};
pub use platform::{resolve_cache_base_dir, EnvProvider, Platform, SystemEnv};
