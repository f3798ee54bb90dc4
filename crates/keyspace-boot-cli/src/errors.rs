//! Error types for the CLI runtime.

use std::io;
use std::sync::Arc;

use keyspace_boot::{BootError, ProcessError, RegistryError, TelemetryError, TemplateError};
use keyspace_boot_config::SettingsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error("invalid configuration: {0}")]
    Settings(#[from] SettingsError),
    #[error("failed to initialise telemetry: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("the model document must be configured with --model-path")]
    MissingModel,
    #[error("boot requires a verification program; set --verify-program")]
    MissingVerifyProgram,
    #[error("keyspace '{0}' is not defined in the model document")]
    UnknownKeyspace(String),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Boot(#[from] BootError),
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error(transparent)]
    Process(#[from] ProcessError),
    #[error("failed to write output: {0}")]
    WriteOutput(#[from] io::Error),
}
