//! Keyspace bootstrapper for an external data-store process.
//!
//! [`Bootstrapper::boot`] verifies that the live schema of a keyspace matches
//! its expected model. When it does not, the bootstrapper renders a
//! `<Keyspace>` fragment from the model, splices it into the data store's
//! configuration template, kills and relaunches the process through its PID
//! file, and retries verification with linear backoff for up to ten attempts.
//!
//! The schema layer is reached through the traits in [`schema`]; the bundled
//! [`ModelRegistry`] reads expected keyspaces from a JSON document and verifies
//! them with an external program. Progress and recovered failures are reported
//! through a [`BootReporter`], by default as `tracing` events.

pub mod bootstrap;
pub mod model;
mod pause;
pub mod process;
mod report;
pub mod schema;
pub mod telemetry;
pub mod template;

pub use bootstrap::{
    Admission, BootController, BootError, BootOutcome, Bootstrapper, RetryPolicy, SkipReason,
};
pub use model::{ColumnFamilyModel, CommandKeyspace, KeyspaceModel, ModelRegistry};
pub use pause::{Pause, ThreadPause};
pub use process::{
    PidFileProcess, ProcessControl, ProcessError, RestartOutcome, RestartTiming, StopOutcome,
};
pub use report::{BootReporter, StructuredBootReporter};
pub use schema::{
    ColumnFamily, KEYSPACES_KEY, Keyspace, KeyspaceRegistry, RegistryError, VerificationError,
};
pub use telemetry::{TelemetryError, TelemetryHandle};
pub use template::{ConfigTemplate, PLACEHOLDER, TemplateError, render_keyspace};

#[cfg(test)]
mod tests;
