//! Layered configuration for the keyspace bootstrapper.
//!
//! [`Config`] is assembled by `ortho_config` from built-in defaults, an
//! optional `keyspace-boot.toml` file, `KEYSPACE_BOOT_*` environment variables,
//! and command-line flags, with later layers taking precedence. Operations that
//! touch the external process or the configuration files need a handful of
//! paths; [`BootSettings::from_config`] checks those up front so a missing value
//! is reported before any side effect happens.

mod defaults;
mod logging;
mod settings;

use camino::{Utf8Path, Utf8PathBuf};
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

pub use defaults::{
    DEFAULT_LOG_FILTER, DEFAULT_STOP_TIMEOUT_MS, default_log_filter, default_log_filter_string,
    default_log_format, default_stop_timeout_ms,
};
pub use logging::{LogFormat, LogFormatParseError};
pub use settings::{BootSettings, SettingsError, required_path};

/// Resolved configuration shared by the engine and the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "KEYSPACE_BOOT")]
pub struct Config {
    /// Opt-in switch; boot is a no-op unless this is set.
    #[serde(default)]
    pub want_boot: bool,
    /// Launcher for the data-store process. Invoked as `<binary> -p <pid_file>`.
    #[serde(default)]
    pub process_binary: Option<Utf8PathBuf>,
    /// PID file written by the data-store process.
    #[serde(default)]
    pub pid_file: Option<Utf8PathBuf>,
    /// Template containing the `[[[PLACEHOLDER]]]` token.
    #[serde(default)]
    pub template_path: Option<Utf8PathBuf>,
    /// Active configuration file overwritten on repair.
    #[serde(default)]
    pub target_path: Option<Utf8PathBuf>,
    /// JSON document describing the expected keyspaces.
    #[serde(default)]
    pub model_path: Option<Utf8PathBuf>,
    /// Program run with the keyspace name to verify the live schema.
    #[serde(default)]
    pub verify_program: Option<Utf8PathBuf>,
    /// Upper bound on waiting for a killed process to exit.
    #[serde(default = "default_stop_timeout_ms")]
    pub stop_timeout_ms: u64,
    /// `tracing` filter directive.
    #[serde(default = "default_log_filter_string")]
    pub log_filter: String,
    /// Log output format.
    #[serde(default = "default_log_format")]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            want_boot: false,
            process_binary: None,
            pid_file: None,
            template_path: None,
            target_path: None,
            model_path: None,
            verify_program: None,
            stop_timeout_ms: default_stop_timeout_ms(),
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
        }
    }
}

impl Config {
    /// Whether boot has been opted into.
    #[must_use]
    pub const fn want_boot(&self) -> bool {
        self.want_boot
    }

    /// Path to the keyspace model document, when configured.
    #[must_use]
    pub fn model_path(&self) -> Option<&Utf8Path> {
        self.model_path.as_deref()
    }

    /// Verification program, when configured.
    #[must_use]
    pub fn verify_program(&self) -> Option<&Utf8Path> {
        self.verify_program.as_deref()
    }

    /// Log filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }
}
