use std::sync::Once;

use serde::{Deserialize, Serialize};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::TRACING_TARGET;

static TRACING_INIT: Once = Once::new();

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Either a simple level (`info`, `debug`, ...) or an `EnvFilter` directive string.
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,

    /// Emit logs in JSON format.
    #[serde(default)]
    pub json: bool,

    /// Write logs to stderr. When disabled, logs are discarded.
    #[serde(default = "LoggingConfig::default_stderr")]
    pub stderr: bool,
}

impl LoggingConfig {
    fn default_level() -> String {
        "info".to_owned()
    }

    fn default_stderr() -> bool {
        true
    }

    /// A bare level is lower-cased (`warning` is accepted for `warn`); anything else is taken
    /// to be an `EnvFilter` directive string.
    pub(crate) fn level_directives(level: &str) -> String {
        let level = level.trim();
        if level.is_empty() {
            return Self::default_level();
        }
        if level.eq_ignore_ascii_case("warning") {
            return "warn".to_owned();
        }
        match level.parse::<LevelFilter>() {
            Ok(_) => level.to_ascii_lowercase(),
            Err(_) => level.to_owned(),
        }
    }

    /// The effective filter: configured directives followed by `RUST_LOG`, if set.
    ///
    /// Directives that don't parse are skipped by `EnvFilter`; if nothing is left the filter
    /// falls back to `info`.
    pub fn env_filter(&self) -> EnvFilter {
        let mut directives = Self::level_directives(&self.level);
        if let Ok(env) = std::env::var(EnvFilter::DEFAULT_ENV) {
            let env = env.trim();
            if !env.is_empty() {
                directives.push(',');
                directives.push_str(env);
            }
        }
        EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new(Self::default_level()))
    }

    fn make_writer(&self) -> BoxMakeWriter {
        if !self.stderr {
            return BoxMakeWriter::new(std::io::sink);
        }
        // `TestWriter` goes through libtest output capture, which keeps `cargo test` quiet.
        if cfg!(debug_assertions) {
            BoxMakeWriter::new(tracing_subscriber::fmt::writer::TestWriter::with_stderr)
        } else {
            BoxMakeWriter::new(std::io::stderr)
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
            json: false,
            stderr: Self::default_stderr(),
        }
    }
}

/// Installs the global tracing subscriber.
///
/// Safe to call multiple times; only the first call has an effect. Returns `false` when a
/// subscriber was already installed (by an earlier call or by the host process).
pub fn init_tracing(config: &LoggingConfig) -> bool {
    let mut installed = false;
    TRACING_INIT.call_once(|| {
        let filter = config.env_filter();
        let writer = config.make_writer();
        let registry = tracing_subscriber::registry().with(filter);
        let result = if config.json {
            registry
                .with(tracing_subscriber::fmt::layer().json().with_writer(writer))
                .try_init()
        } else {
            registry
                .with(tracing_subscriber::fmt::layer().with_writer(writer))
                .try_init()
        };
        installed = result.is_ok();
        if installed {
            tracing::debug!(
                target: TRACING_TARGET,
                level = %config.level,
                json = config.json,
                "tracing initialized"
            );
        }
    });
    installed
}
