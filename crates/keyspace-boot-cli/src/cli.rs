//! CLI argument definitions for the keyspace bootstrapper.

use clap::{Args, Parser, Subcommand};

/// Command-line interface for the keyspace bootstrapper.
#[derive(Parser, Debug)]
#[command(name = "keyspace-boot", disable_help_subcommand = true)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: CliCommand,
}

/// Selects a keyspace from the model document.
#[derive(Args, Debug, Clone, Default)]
pub(crate) struct KeyspaceSelection {
    /// Keyspace name; defaults to the first keyspace in the model.
    #[arg(long, value_name = "NAME")]
    pub(crate) keyspace: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
pub(crate) enum CliCommand {
    /// Verifies the keyspace and repairs the data store if it does not match.
    Boot(KeyspaceSelection),
    /// Prints the keyspace configuration fragment.
    Render(KeyspaceSelection),
    /// Writes the keyspace fragment into the active configuration.
    Apply(KeyspaceSelection),
    /// Launches the data store.
    Start,
    /// Kills the data store recorded in the PID file.
    Stop,
    /// Stops and relaunches the data store.
    Restart,
}
