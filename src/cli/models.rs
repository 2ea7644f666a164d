//! Typed values bound from the command line

use clap::ValueEnum;
use std::fmt;
use std::str::FromStr;

/// Operating system a game's depots can target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum OperatingSystem {
    #[value(name = "windows")]
    Windows,
    #[value(name = "linux")]
    Linux,
    #[value(name = "macos")]
    MacOs,
}

impl OperatingSystem {
    pub const VALID_VALUES: &'static str = "windows/linux/macos";

    pub fn as_str(&self) -> &'static str {
        match self {
            OperatingSystem::Windows => "windows",
            OperatingSystem::Linux => "linux",
            OperatingSystem::MacOs => "macos",
        }
    }
}

impl fmt::Display for OperatingSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How download speeds are reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransferSpeedUnit {
    #[default]
    Bits,
    Bytes,
}

impl TransferSpeedUnit {
    pub const ALL: [TransferSpeedUnit; 2] = [TransferSpeedUnit::Bits, TransferSpeedUnit::Bytes];
    pub const VALID_VALUES: &'static str = "bits/bytes";

    pub fn as_str(&self) -> &'static str {
        match self {
            TransferSpeedUnit::Bits => "bits",
            TransferSpeedUnit::Bytes => "bytes",
        }
    }

    /// Format a rate given in bytes per second, e.g. `80.00 Mbit/s` or `10.00 MB/s`
    pub fn format_speed(&self, bytes_per_second: f64) -> String {
        match self {
            TransferSpeedUnit::Bits => {
                format!("{:.2} Mbit/s", bytes_per_second * 8.0 / 1_000_000.0)
            }
            TransferSpeedUnit::Bytes => format!("{:.2} MB/s", bytes_per_second / 1_000_000.0),
        }
    }
}

impl fmt::Display for TransferSpeedUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive match against the unit names
impl FromStr for TransferSpeedUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|unit| unit.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| format!("unknown transfer speed unit: {}", s))
    }
}
