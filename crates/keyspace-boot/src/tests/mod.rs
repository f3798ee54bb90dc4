//! Test suites for the keyspace bootstrapper.

mod support;
