//! Command line definitions

use crate::cli::converters::{
    convert_transfer_speed_unit, parse_operating_system, parse_presence_flag,
    validate_operating_systems,
};
use crate::cli::models::{OperatingSystem, TransferSpeedUnit};
use crate::utils::error::ValidationError;
use crate::utils::AppConfig;
use clap::error::Error as ClapError;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(name = "EpicPrefill", version, about = "Prefills a Lancache with Epic Games Store titles")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Download selected apps so they end up in the cache
    Prefill(PrefillArgs),
    /// Empty the temporary cache directory
    #[command(name = "clear-temp")]
    ClearTemp(ClearTempArgs),
}

#[derive(Debug, Args)]
pub struct PrefillArgs {
    /// Prefill every owned app
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_parser = parse_presence_flag)]
    pub all: Option<bool>,

    /// Prefill apps played in the last two weeks
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_parser = parse_presence_flag)]
    pub recent: Option<bool>,

    /// Download apps even if they are already up to date
    #[arg(short, long, num_args = 0..=1, default_missing_value = "true", value_parser = parse_presence_flag)]
    pub force: Option<bool>,

    /// Produce more detailed log output
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_parser = parse_presence_flag)]
    pub verbose: Option<bool>,

    /// Operating systems to prefill depots for (default: windows)
    #[arg(long = "os", num_args = 0.., value_name = "OS", value_parser = parse_operating_system)]
    pub operating_systems: Option<Vec<OperatingSystem>>,

    /// Unit used to display download speeds (default: bits)
    #[arg(long, num_args = 0..=1, value_name = "UNIT")]
    pub unit: Option<Option<String>>,
}

#[derive(Debug, Args)]
pub struct ClearTempArgs {
    /// Produce more detailed log output
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_parser = parse_presence_flag)]
    pub verbose: Option<bool>,
}

impl Cli {
    /// Parse `args`, separating our own rejected values from clap's errors.
    pub fn try_bind_from<I, T>(args: I) -> Result<Self, BindError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::try_parse_from(args).map_err(BindError::from)
    }
}

/// Why binding the command line failed
#[derive(Debug)]
pub enum BindError {
    /// A converter rejected a value; reported with our own diagnostic
    Validation(ValidationError),
    /// Anything else clap reports itself (help, version, unknown flags)
    Clap(ClapError),
}

impl From<ClapError> for BindError {
    fn from(err: ClapError) -> Self {
        let validation = std::error::Error::source(&err)
            .and_then(|source| source.downcast_ref::<ValidationError>())
            .cloned();
        match validation {
            Some(validation) => BindError::Validation(validation),
            None => BindError::Clap(err),
        }
    }
}

impl PrefillArgs {
    pub fn verbose(&self) -> bool {
        self.verbose.unwrap_or(false)
    }

    /// Run every converter and validator over the bound values.
    pub fn validate(&self) -> Result<ValidatedPrefillArgs, ValidationError> {
        let operating_systems = match &self.operating_systems {
            Some(selected) => validate_operating_systems(selected.clone())?,
            None => vec![OperatingSystem::Windows],
        };

        let transfer_speed_unit = match &self.unit {
            Some(raw) => convert_transfer_speed_unit(raw.as_deref())?,
            None => TransferSpeedUnit::default(),
        };

        Ok(ValidatedPrefillArgs {
            download_all_owned: self.all.unwrap_or(false),
            prefill_recent: self.recent.unwrap_or(false),
            force: self.force.unwrap_or(false),
            operating_systems,
            transfer_speed_unit,
        })
    }
}

impl ClearTempArgs {
    pub fn verbose(&self) -> bool {
        self.verbose.unwrap_or(false)
    }
}

/// Prefill options after every converter has accepted them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedPrefillArgs {
    pub download_all_owned: bool,
    pub prefill_recent: bool,
    pub force: bool,
    pub operating_systems: Vec<OperatingSystem>,
    pub transfer_speed_unit: TransferSpeedUnit,
}

/// Everything the download engine needs to start a prefill run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefillRequest {
    pub options: ValidatedPrefillArgs,
    pub cache_dir: PathBuf,
    pub user_selected_apps_path: PathBuf,
    pub successfully_downloaded_apps_path: PathBuf,
    pub max_concurrent_requests: usize,
    pub request_timeout: Duration,
}

impl PrefillRequest {
    pub fn new(options: ValidatedPrefillArgs, config: &AppConfig) -> Self {
        Self {
            options,
            cache_dir: config.cache_dir.clone(),
            user_selected_apps_path: config.user_selected_apps_path.clone(),
            successfully_downloaded_apps_path: config.successfully_downloaded_apps_path.clone(),
            max_concurrent_requests: config.max_concurrent_requests,
            request_timeout: config.default_request_timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn prefill_args(args: &[&str]) -> PrefillArgs {
        let mut argv = vec!["epic-prefill", "prefill"];
        argv.extend_from_slice(args);
        match Cli::try_parse_from(argv).expect("parse").command {
            Commands::Prefill(args) => args,
            other => panic!("expected prefill, got {:?}", other),
        }
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_when_nothing_given() {
        let validated = prefill_args(&[]).validate().unwrap();
        assert!(!validated.download_all_owned);
        assert!(!validated.force);
        assert_eq!(validated.operating_systems, vec![OperatingSystem::Windows]);
        assert_eq!(validated.transfer_speed_unit, TransferSpeedUnit::Bits);
    }

    #[test]
    fn test_presence_flags_ignore_value() {
        let args = prefill_args(&["--all", "--force", "false", "--verbose"]);
        assert!(args.verbose());
        let validated = args.validate().unwrap();
        assert!(validated.download_all_owned);
        assert!(validated.force);
        assert!(!validated.prefill_recent);
    }

    #[test]
    fn test_os_values_bind() {
        let validated = prefill_args(&["--os", "linux", "MACOS"]).validate().unwrap();
        assert_eq!(
            validated.operating_systems,
            vec![OperatingSystem::Linux, OperatingSystem::MacOs]
        );
    }

    #[test]
    fn test_os_without_values_is_rejected() {
        let err = prefill_args(&["--os"]).validate().unwrap_err();
        assert_eq!(err.option, "--os");
        assert_eq!(err.exit_code, 1);
    }

    #[test]
    fn test_unknown_os_is_a_validation_error() {
        let err = Cli::try_bind_from(["epic-prefill", "prefill", "--os", "windows", "amiga"])
            .unwrap_err();
        match err {
            BindError::Validation(err) => {
                assert_eq!(err.exit_code, 1);
                assert_eq!(err.option, "--os");
                assert!(err.to_string().contains("amiga"));
            }
            BindError::Clap(err) => panic!("expected validation error, got {}", err),
        }
    }

    #[test]
    fn test_unknown_flag_stays_a_clap_error() {
        let err = Cli::try_bind_from(["epic-prefill", "prefill", "--bogus"]).unwrap_err();
        assert!(matches!(err, BindError::Clap(_)));
    }

    #[test]
    fn test_unit_binding() {
        let validated = prefill_args(&["--unit", "BYTES"]).validate().unwrap();
        assert_eq!(validated.transfer_speed_unit, TransferSpeedUnit::Bytes);

        let err = prefill_args(&["--unit"]).validate().unwrap_err();
        assert!(err.to_string().contains("--unit"));

        let err = prefill_args(&["--unit", "bogus"]).validate().unwrap_err();
        assert!(err.to_string().contains("bogus"));
    }

    #[test]
    fn test_help_hides_false_default() {
        let help = Cli::command()
            .find_subcommand_mut("prefill")
            .expect("prefill subcommand")
            .render_long_help()
            .to_string();
        assert!(!help.contains("default: false"));
    }

    #[test]
    fn test_clear_temp_parses() {
        let cli = Cli::try_parse_from(["epic-prefill", "clear-temp", "--verbose"]).unwrap();
        match cli.command {
            Commands::ClearTemp(args) => assert!(args.verbose()),
            other => panic!("expected clear-temp, got {:?}", other),
        }
    }
}
