//! Conversion and validation of raw command line values
//!
//! These run while arguments are being bound, before any command logic.
//! Each returns a [`ValidationError`] instead of exiting; `main` decides how
//! to report it.

use crate::cli::models::{OperatingSystem, TransferSpeedUnit};
use crate::utils::error::ValidationError;
use clap::ValueEnum;

pub const OS_OPTION: &str = "--os";
pub const UNIT_OPTION: &str = "--unit";

/// Value parser for flags that mean "enabled if present".
///
/// Whatever text follows the flag is ignored. Binding to `Option<bool>` with
/// this parser keeps clap from printing a pointless `[default: false]`.
pub fn parse_presence_flag(_raw_value: &str) -> Result<bool, ValidationError> {
    Ok(true)
}

/// Value parser for a single `--os` value, matched case-insensitively.
pub fn parse_operating_system(raw_value: &str) -> Result<OperatingSystem, ValidationError> {
    <OperatingSystem as ValueEnum>::from_str(raw_value.trim(), true).map_err(|_| {
        ValidationError::invalid_value(
            OS_OPTION,
            raw_value,
            "operating system",
            OperatingSystem::VALID_VALUES,
        )
    })
}

/// Rejects `--os` given without any operating systems.
pub fn validate_operating_systems(
    values: Vec<OperatingSystem>,
) -> Result<Vec<OperatingSystem>, ValidationError> {
    if values.is_empty() {
        return Err(ValidationError::missing_value(
            OS_OPTION,
            "An operating system",
            OperatingSystem::VALID_VALUES,
        ));
    }
    Ok(values)
}

/// Parses the value given to `--unit`. `None` means the flag had no value.
pub fn convert_transfer_speed_unit(
    raw_value: Option<&str>,
) -> Result<TransferSpeedUnit, ValidationError> {
    let raw_value = raw_value.ok_or_else(|| {
        ValidationError::missing_value(
            UNIT_OPTION,
            "A transfer speed unit",
            TransferSpeedUnit::VALID_VALUES,
        )
    })?;

    raw_value.parse().map_err(|_| {
        ValidationError::invalid_value(
            UNIT_OPTION,
            raw_value,
            "transfer speed unit",
            TransferSpeedUnit::VALID_VALUES,
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn presence_flag_is_always_true(raw in ".*") {
            prop_assert_eq!(parse_presence_flag(&raw), Ok(true));
        }
    }

    #[test]
    fn test_presence_flag_empty_text() {
        assert_eq!(parse_presence_flag(""), Ok(true));
        assert_eq!(parse_presence_flag("false"), Ok(true));
    }

    #[test]
    fn test_empty_os_selection_fails() {
        let err = validate_operating_systems(Vec::new()).unwrap_err();
        assert_eq!(err.exit_code, 1);
        assert_eq!(err.option, "--os");
        assert!(err.to_string().contains("--os"));
        assert_eq!(err.valid_values, "windows/linux/macos");
    }

    #[test]
    fn test_os_selection_passes_through() {
        let selected = vec![OperatingSystem::Windows];
        assert_eq!(validate_operating_systems(selected.clone()), Ok(selected));

        let selected = vec![OperatingSystem::MacOs, OperatingSystem::Linux];
        assert_eq!(validate_operating_systems(selected.clone()), Ok(selected));
    }

    #[test]
    fn test_parse_operating_system() {
        assert_eq!(parse_operating_system("linux"), Ok(OperatingSystem::Linux));
        assert_eq!(parse_operating_system("MacOS"), Ok(OperatingSystem::MacOs));

        let err = parse_operating_system("amiga").unwrap_err();
        assert_eq!(err.exit_code, 1);
        assert_eq!(err.option, "--os");
        assert!(err.to_string().contains("amiga"));
        assert_eq!(err.valid_values, "windows/linux/macos");
    }

    #[test]
    fn test_missing_unit_fails() {
        let err = convert_transfer_speed_unit(None).unwrap_err();
        assert!(err.to_string().contains("--unit"));
        assert_eq!(err.exit_code, 1);
    }

    #[test]
    fn test_invalid_unit_names_value() {
        let err = convert_transfer_speed_unit(Some("bogus")).unwrap_err();
        assert!(err.to_string().contains("bogus"));
        assert_eq!(err.valid_values, "bits/bytes");
        assert_eq!(err.exit_code, 1);
    }

    #[test]
    fn test_valid_units() {
        assert_eq!(convert_transfer_speed_unit(Some("bits")), Ok(TransferSpeedUnit::Bits));
        assert_eq!(convert_transfer_speed_unit(Some("BYTES")), Ok(TransferSpeedUnit::Bytes));
        assert_eq!(convert_transfer_speed_unit(Some("Bits")), Ok(TransferSpeedUnit::Bits));
    }
}
