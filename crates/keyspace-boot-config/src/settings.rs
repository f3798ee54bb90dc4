//! Eagerly validated view of the configuration used by boot operations.
//!
//! Process control and templating cannot do anything useful without their
//! paths, so they are resolved once here instead of failing halfway through a
//! repair sequence.

use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;

use crate::Config;

/// Paths and switches required to run the bootstrapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootSettings {
    want_boot: bool,
    process_binary: Utf8PathBuf,
    pid_file: Utf8PathBuf,
    template_path: Utf8PathBuf,
    target_path: Utf8PathBuf,
    stop_timeout: Duration,
}

impl BootSettings {
    /// Validates the configuration, failing on the first missing path.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Missing`] naming the absent field.
    pub fn from_config(config: &Config) -> Result<Self, SettingsError> {
        Ok(Self {
            want_boot: config.want_boot,
            process_binary: required_path(config.process_binary.as_ref(), "process_binary")?,
            pid_file: required_path(config.pid_file.as_ref(), "pid_file")?,
            template_path: required_path(config.template_path.as_ref(), "template_path")?,
            target_path: required_path(config.target_path.as_ref(), "target_path")?,
            stop_timeout: Duration::from_millis(config.stop_timeout_ms),
        })
    }

    /// Whether boot has been opted into.
    #[must_use]
    pub const fn want_boot(&self) -> bool {
        self.want_boot
    }

    /// Data-store launcher.
    #[must_use]
    pub fn process_binary(&self) -> &Utf8Path {
        &self.process_binary
    }

    /// PID file written by the data-store process.
    #[must_use]
    pub fn pid_file(&self) -> &Utf8Path {
        &self.pid_file
    }

    /// Template containing the placeholder token.
    #[must_use]
    pub fn template_path(&self) -> &Utf8Path {
        &self.template_path
    }

    /// Active configuration file.
    #[must_use]
    pub fn target_path(&self) -> &Utf8Path {
        &self.target_path
    }

    /// Bound on waiting for a killed process to exit.
    #[must_use]
    pub const fn stop_timeout(&self) -> Duration {
        self.stop_timeout
    }
}

/// Returns the configured path or a [`SettingsError::Missing`] naming `field`.
///
/// # Errors
///
/// Returns [`SettingsError::Missing`] when `value` is `None`.
pub fn required_path(
    value: Option<&Utf8PathBuf>,
    field: &'static str,
) -> Result<Utf8PathBuf, SettingsError> {
    value.cloned().ok_or(SettingsError::Missing { field })
}

/// Errors raised while validating [`BootSettings`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    /// A required setting was not supplied by any configuration layer.
    #[error("missing required setting '{field}'")]
    Missing {
        /// Configuration field name.
        field: &'static str,
    },
}
