//! Process-wide log verbosity
//!
//! `INFO` and above are always written. `DEBUG` and `TRACE` only show up while
//! the verbose flag is set, and the flag can be flipped at any time after the
//! subscriber is installed. `RUST_LOG` overrides all of this when present.

use std::sync::atomic::{AtomicBool, Ordering};
use tracing::Level;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

static VERBOSE_LOGS: AtomicBool = AtomicBool::new(false);

pub fn set_verbose_logs(enabled: bool) {
    VERBOSE_LOGS.store(enabled, Ordering::SeqCst);
}

pub fn verbose_logs_enabled() -> bool {
    VERBOSE_LOGS.load(Ordering::SeqCst)
}

/// Whether an event at `level` passes the verbosity gate
pub fn level_enabled(level: &Level) -> bool {
    passes_gate(level, verbose_logs_enabled())
}

fn passes_gate(level: &Level, verbose: bool) -> bool {
    *level <= Level::INFO || verbose
}

/// Install the global subscriber. Calling this twice is harmless.
pub fn init() {
    let layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let result = match EnvFilter::try_from_default_env() {
        Ok(env_filter) => tracing_subscriber::registry()
            .with(layer.with_filter(env_filter))
            .try_init(),
        Err(_) => tracing_subscriber::registry()
            .with(layer.with_filter(filter_fn(|metadata| level_enabled(metadata.level()))))
            .try_init(),
    };

    if result.is_err() {
        tracing::debug!("Global subscriber already installed");
    }
}
