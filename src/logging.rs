//! Logging setup shared by both binaries.
//!
//! Diagnostics go through `tracing` to stderr; the human-readable report is
//! printed to stdout separately, so logs never mix into piped output.
//!
//! # Log Levels
//!
//! - `error`: a rewritten file could not be saved
//! - `warn`: skipped files, suspicious template literals, version mismatches
//! - `info`: per-file progress
//! - `debug`: the rule behind every keep/drop decision

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Configuration for logging behavior.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Maximum level to emit.
    pub level_filter: LevelFilter,
    /// Whether `RUST_LOG` may override `level_filter`.
    pub use_env_filter: bool,
    /// Whether to use ANSI colors in output.
    pub with_ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level_filter: LevelFilter::WARN,
            use_env_filter: true,
            with_ansi: false,
        }
    }
}

impl LogConfig {
    /// Build a config from a verbosity-derived level filter.
    ///
    /// An explicit `-v`/`-q` wins over `RUST_LOG`.
    #[must_use]
    pub fn from_level(level_filter: LevelFilter, explicit: bool) -> Self {
        Self {
            level_filter,
            use_env_filter: !explicit,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_ansi(mut self, enable: bool) -> Self {
        self.with_ansi = enable;
        self
    }
}

/// Initialize the global tracing subscriber. Call once, at startup.
///
/// A second call is ignored.
pub fn init_logging(config: &LogConfig) {
    let filter = build_env_filter(config);
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(config.with_ansi)
        .with_target(false)
        .without_time();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init();
}

fn build_env_filter(config: &LogConfig) -> EnvFilter {
    let fallback = || EnvFilter::new(config.level_filter.to_string().to_lowercase());
    if config.use_env_filter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback())
    } else {
        fallback()
    }
}
