//! Platform-specific path resolution for EpicPrefill
//!
//! The cache directory follows each platform's convention:
//! - Windows: %LOCALAPPDATA%\EpicPrefill\Cache\v1
//! - Linux:   $XDG_CACHE_HOME/EpicPrefill/v1 (default ~/.cache/EpicPrefill/v1)
//! - macOS:   ~/Library/Caches/EpicPrefill/v1
//!
//! Everything that reads the environment goes through [`EnvProvider`], so
//! every branch can be exercised from tests on any host.

use crate::utils::error::ConfigError;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Product name used as a directory segment
pub const APP_NAME: &str = "EpicPrefill";

/// Increment when there is a breaking change made to the files in the cache directory
pub const CACHE_DIR_VERSION: &str = "v1";

/// Operating system family the process is running on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Linux,
    MacOs,
    /// Anything else, carrying a human readable description
    Other(String),
}

impl Platform {
    /// Detect the platform this binary was compiled for
    pub fn current() -> Self {
        match std::env::consts::OS {
            "windows" => Platform::Windows,
            "linux" => Platform::Linux,
            "macos" => Platform::MacOs,
            os => Platform::Other(format!("{} ({})", os, std::env::consts::ARCH)),
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Platform::Windows => "windows",
            Platform::Linux => "linux",
            Platform::MacOs => "macos",
            Platform::Other(description) => description,
        }
    }
}

/// Source of environment-dependent values
pub trait EnvProvider {
    /// Environment variable lookup
    fn var_os(&self, key: &str) -> Option<OsString>;

    /// The user's home directory
    fn home_dir(&self) -> Option<PathBuf>;

    /// The local application data folder (`%LOCALAPPDATA%` on Windows)
    fn local_app_data_dir(&self) -> Option<PathBuf>;

    /// Directory containing the running executable
    fn executable_dir(&self) -> std::io::Result<PathBuf>;
}

/// The real process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl EnvProvider for SystemEnv {
    fn var_os(&self, key: &str) -> Option<OsString> {
        std::env::var_os(key)
    }

    fn home_dir(&self) -> Option<PathBuf> {
        dirs::home_dir()
    }

    fn local_app_data_dir(&self) -> Option<PathBuf> {
        dirs::data_local_dir()
    }

    fn executable_dir(&self) -> std::io::Result<PathBuf> {
        let exe_path = std::env::current_exe()?;
        exe_path.parent().map(Path::to_path_buf).ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{:?} has no parent directory", exe_path),
            )
        })
    }
}

/// Returns the versioned cache directory for `platform`.
///
/// Fails when the platform is unsupported or when a location the platform
/// convention depends on cannot be determined. There is no fallback path.
pub fn resolve_cache_base_dir(
    platform: &Platform,
    env: &impl EnvProvider,
) -> Result<PathBuf, ConfigError> {
    match platform {
        Platform::Windows => {
            let app_data = env
                .local_app_data_dir()
                .ok_or(ConfigError::MissingSpecialFolder("LocalApplicationData"))?;
            Ok(app_data.join(APP_NAME).join("Cache").join(CACHE_DIR_VERSION))
        }
        Platform::Linux => {
            // HOME is required even when XDG_CACHE_HOME overrides it
            let home = env
                .var_os("HOME")
                .filter(|home| !home.is_empty())
                .map(PathBuf::from)
                .ok_or(ConfigError::MissingEnvVar("HOME"))?;
            let cache_home = xdg_cache_home(env).unwrap_or_else(|| home.join(".cache"));
            Ok(cache_home.join(APP_NAME).join(CACHE_DIR_VERSION))
        }
        Platform::MacOs => {
            let home = env.home_dir().ok_or(ConfigError::MissingHomeDir)?;
            Ok(home
                .join("Library")
                .join("Caches")
                .join(APP_NAME)
                .join(CACHE_DIR_VERSION))
        }
        Platform::Other(description) => {
            Err(ConfigError::UnsupportedPlatform(description.clone()))
        }
    }
}

/// `$XDG_CACHE_HOME`, ignoring empty and relative values as the XDG Base
/// Directory specification requires.
fn xdg_cache_home(env: &impl EnvProvider) -> Option<PathBuf> {
    env.var_os("XDG_CACHE_HOME")
        .map(PathBuf::from)
        .filter(|path| path.is_absolute())
}
