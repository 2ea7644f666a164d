//! Application configuration
//!
//! [`AppConfig`] is built once at startup and handed to whatever needs it.
//! Path computation ([`AppConfig::resolve`]) is kept apart from directory
//! creation ([`AppConfig::ensure_dirs`]) so the former can be tested without
//! touching the filesystem.

use crate::utils::error::ConfigError;
use crate::utils::logging;
use crate::utils::platform::{resolve_cache_base_dir, EnvProvider, Platform, SystemEnv};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{debug, info};

/// Upper bound on in-flight requests handed to the download engine
pub const MAX_CONCURRENT_REQUESTS: usize = 30;

/// Timeout applied by the network layer when a request sets none
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

const CONFIG_DIR_NAME: &str = "Config";
const ACCOUNT_SETTINGS_FILE: &str = "userAccount.json";
const USER_SELECTED_APPS_FILE: &str = "selectedAppsToPrefill.json";
const SUCCESSFULLY_DOWNLOADED_APPS_FILE: &str = "successfullyDownloadedApps.json";

/// Application configuration
#[derive(Debug)]
pub struct AppConfig {
    /// Downloaded manifests and other metadata, kept to speed up later runs.
    /// Everything in here can be deleted safely.
    pub cache_dir: PathBuf,

    /// User configuration. Deleting it resets the app back to defaults.
    pub config_dir: PathBuf,

    /// Account credentials
    pub account_settings_store_path: PathBuf,

    /// Apps the user picked for prefilling
    pub user_selected_apps_path: PathBuf,

    /// Which apps and versions have already been downloaded, used to decide
    /// whether a game is up to date
    pub successfully_downloaded_apps_path: PathBuf,

    pub max_concurrent_requests: usize,

    pub default_request_timeout: Duration,

    verbose_logs: AtomicBool,
}

impl AppConfig {
    /// Compute every path for `platform` without touching the filesystem.
    pub fn resolve(platform: &Platform, env: &impl EnvProvider) -> Result<Self, ConfigError> {
        let exe_dir = env.executable_dir().map_err(ConfigError::ExecutableDir)?;
        let config_dir = exe_dir.join(CONFIG_DIR_NAME);
        let cache_dir = resolve_cache_base_dir(platform, env)?;

        ensure_absolute("cache directory", &cache_dir)?;
        ensure_absolute("config directory", &config_dir)?;

        Ok(Self {
            account_settings_store_path: config_dir.join(ACCOUNT_SETTINGS_FILE),
            user_selected_apps_path: config_dir.join(USER_SELECTED_APPS_FILE),
            successfully_downloaded_apps_path: config_dir.join(SUCCESSFULLY_DOWNLOADED_APPS_FILE),
            cache_dir,
            config_dir,
            max_concurrent_requests: MAX_CONCURRENT_REQUESTS,
            default_request_timeout: DEFAULT_REQUEST_TIMEOUT,
            verbose_logs: AtomicBool::new(false),
        })
    }

    /// Create the cache and config directories. Existing directories and
    /// their contents are left alone.
    pub fn ensure_dirs(&self) -> Result<(), ConfigError> {
        for dir in [&self.config_dir, &self.cache_dir] {
            std::fs::create_dir_all(dir).map_err(|source| ConfigError::CreateDir {
                path: dir.clone(),
                source,
            })?;
            debug!("Ensured directory exists: {:?}", dir);
        }
        Ok(())
    }

    /// Resolve for the running platform and create the directories.
    pub fn initialize() -> Result<Self, ConfigError> {
        Self::initialize_with(&Platform::current(), &SystemEnv)
    }

    pub fn initialize_with(
        platform: &Platform,
        env: &impl EnvProvider,
    ) -> Result<Self, ConfigError> {
        let config = Self::resolve(platform, env)?;
        config.ensure_dirs()?;
        info!(
            "Using cache directory {:?} and config directory {:?}",
            config.cache_dir, config.config_dir
        );
        Ok(config)
    }

    /// Like [`AppConfig::initialize`], with the logging verbosity switched
    /// before any directory work so its debug output is not lost.
    pub fn initialize_verbose(verbose: bool) -> Result<Self, ConfigError> {
        Self::initialize_with_verbose(&Platform::current(), &SystemEnv, verbose)
    }

    pub fn initialize_with_verbose(
        platform: &Platform,
        env: &impl EnvProvider,
        verbose: bool,
    ) -> Result<Self, ConfigError> {
        logging::set_verbose_logs(verbose);
        let config = Self::initialize_with(platform, env)?;
        config.set_verbose_logs(verbose);
        Ok(config)
    }

    pub fn verbose_logs(&self) -> bool {
        self.verbose_logs.load(Ordering::SeqCst)
    }

    /// Also switches the global logging verbosity.
    pub fn set_verbose_logs(&self, enabled: bool) {
        self.verbose_logs.store(enabled, Ordering::SeqCst);
        logging::set_verbose_logs(enabled);
    }

    /// Delete everything under the cache directory and recreate it empty.
    /// Returns the number of top-level entries that were removed.
    pub fn clear_cache(&self) -> Result<usize, ConfigError> {
        let to_err = |source: std::io::Error| ConfigError::ClearCache {
            path: self.cache_dir.clone(),
            source,
        };

        let removed = match std::fs::read_dir(&self.cache_dir) {
            Ok(entries) => entries.count(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => 0,
            Err(e) => return Err(to_err(e)),
        };

        if self.cache_dir.exists() {
            std::fs::remove_dir_all(&self.cache_dir).map_err(to_err)?;
        }
        std::fs::create_dir_all(&self.cache_dir).map_err(to_err)?;

        info!("Cleared {} entries from {:?}", removed, self.cache_dir);
        Ok(removed)
    }
}

impl fmt::Display for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Cache directory:          {}", self.cache_dir.display())?;
        writeln!(f, "Config directory:         {}", self.config_dir.display())?;
        writeln!(f, "Max concurrent requests:  {}", self.max_concurrent_requests)?;
        write!(
            f,
            "Default request timeout:  {}s",
            self.default_request_timeout.as_secs()
        )
    }
}

fn ensure_absolute(name: &'static str, path: &Path) -> Result<(), ConfigError> {
    if path.as_os_str().is_empty() || !path.is_absolute() {
        return Err(ConfigError::NotAbsolute {
            name,
            path: path.to_path_buf(),
        });
    }
    Ok(())
}
