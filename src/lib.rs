//! EpicPrefill library

pub mod cli;
pub mod utils;

// Re-export main types for easier use
pub use cli::{Cli, Commands, OperatingSystem, PrefillRequest, TransferSpeedUnit};
pub use utils::{AppConfig, ConfigError, ValidationError};
