//! Unit tests for the CLI runner.

mod support;
