//! Command line parsing and argument validation

pub mod commands;
pub mod converters;
pub mod models;

// Re-export for convenience
pub use commands::{BindError, ClearTempArgs, Cli, Commands, PrefillArgs, PrefillRequest, ValidatedPrefillArgs};
pub use converters::{
    convert_transfer_speed_unit, parse_operating_system, parse_presence_flag,
    validate_operating_systems,
};
pub use models::{OperatingSystem, TransferSpeedUnit};
