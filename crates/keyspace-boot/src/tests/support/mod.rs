//! Test doubles shared by the bootstrapper suites.

mod boot_harness;
mod keyspace;
mod pause;
mod process;
mod reporter;

pub use boot_harness::{BootHarness, harness};
pub use keyspace::{ScriptedKeyspace, StaticRegistry, mismatch, mismatch_with, unavailable};
pub use pause::RecordingPause;
pub use process::{ProcessCall, RecordingProcess};
pub use reporter::{BootEvent, RecordingBootReporter};
