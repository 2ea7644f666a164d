//! Error handling for EpicPrefill

use console::Style;
use std::path::PathBuf;
use thiserror::Error;

/// Exit status used for every rejected command line
pub const VALIDATION_EXIT_CODE: i32 = 1;

/// Startup errors. None of these can be recovered from: without a cache and
/// config directory there is nothing for the rest of the app to work with.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown platform {0}")]
    UnsupportedPlatform(String),

    #[error("Could not determine {0} directory")]
    MissingEnvVar(&'static str),

    #[error("Could not determine the user's home directory")]
    MissingHomeDir,

    #[error("Could not determine the {0} folder")]
    MissingSpecialFolder(&'static str),

    #[error("Could not determine the executable's directory: {0}")]
    ExecutableDir(#[source] std::io::Error),

    #[error("{name} must be an absolute path, got {path:?}")]
    NotAbsolute { name: &'static str, path: PathBuf },

    #[error("Failed to create directory {path:?}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to clear cache directory {path:?}: {source}")]
    ClearCache {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A command line value that was rejected while binding arguments.
///
/// `Display` gives the plain message (handy for logs and tests); use
/// [`ValidationError::render`] for the colored diagnostic shown to users.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// The offending option, e.g. `--os`
    pub option: &'static str,
    pub message: String,
    /// Slash separated list of accepted values, e.g. `bits/bytes`
    pub valid_values: &'static str,
    /// The rejected text, when there was any
    pub raw_value: Option<String>,
    pub exit_code: i32,
}

impl ValidationError {
    /// The option was passed without any value
    pub fn missing_value(option: &'static str, what: &str, valid_values: &'static str) -> Self {
        Self {
            option,
            message: format!("{} must be specified when using {}", what, option),
            valid_values,
            raw_value: None,
            exit_code: VALIDATION_EXIT_CODE,
        }
    }

    /// The option was passed a value outside the accepted set
    pub fn invalid_value(
        option: &'static str,
        raw_value: &str,
        what: &str,
        valid_values: &'static str,
    ) -> Self {
        Self {
            option,
            message: format!("{} is not a valid {}!", raw_value, what),
            valid_values,
            raw_value: Some(raw_value.to_string()),
            exit_code: VALIDATION_EXIT_CODE,
        }
    }

    /// Two line diagnostic: the problem in red with the rejected value or
    /// the option highlighted, followed by the accepted values.
    pub fn render(&self) -> String {
        self.render_with_colors(console::colors_enabled_stderr())
    }

    fn render_with_colors(&self, colors: bool) -> String {
        let error = Style::new().red().force_styling(colors);
        let accent = Style::new().yellow().bright().force_styling(colors);
        let value = Style::new().white().bright().force_styling(colors);

        let rejected = self
            .raw_value
            .as_deref()
            .and_then(|raw| Some((raw, self.message.strip_prefix(raw)?)));

        let headline = if let Some((raw, rest)) = rejected {
            format!("{}{}", value.apply_to(raw), error.apply_to(rest))
        } else if let Some(prefix) = self.message.strip_suffix(self.option) {
            format!("{}{}", error.apply_to(prefix), accent.apply_to(self.option))
        } else {
            error.apply_to(&self.message).to_string()
        };

        format!(
            "{}\n{}{}",
            headline,
            error.apply_to("Valid values include : "),
            accent.apply_to(self.valid_values)
        )
    }
}
