//! Keyspace doubles whose verification results are scripted per call.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::model::ColumnFamilyModel;
use crate::schema::{ColumnFamily, Keyspace, KeyspaceRegistry, RegistryError, VerificationError};

pub fn mismatch(keyspace: &str) -> VerificationError {
    mismatch_with(keyspace, "column family missing")
}

pub fn mismatch_with(keyspace: &str, detail: &str) -> VerificationError {
    VerificationError::Mismatch {
        keyspace: keyspace.to_owned(),
        detail: detail.to_owned(),
    }
}

pub fn unavailable(keyspace: &str) -> VerificationError {
    VerificationError::Unavailable {
        keyspace: keyspace.to_owned(),
        detail: "verification disabled".to_owned(),
    }
}

#[derive(Debug)]
struct Script {
    results: Mutex<VecDeque<Result<(), VerificationError>>>,
    fallback: Result<(), VerificationError>,
    calls: AtomicUsize,
}

/// Keyspace that replays scripted probe results, then repeats a fallback.
///
/// Clones share the script and call counter.
#[derive(Debug, Clone)]
pub struct ScriptedKeyspace {
    name: String,
    families: Vec<ColumnFamilyModel>,
    script: Arc<Script>,
}

impl ScriptedKeyspace {
    fn with(name: &str, results: Vec<Result<(), VerificationError>>, fallback: Result<(), VerificationError>) -> Self {
        Self {
            name: name.to_owned(),
            families: vec![ColumnFamilyModel::new("cf1", "BytesType")],
            script: Arc::new(Script {
                results: Mutex::new(results.into()),
                fallback,
                calls: AtomicUsize::new(0),
            }),
        }
    }

    /// Every probe succeeds.
    pub fn passing(name: &str) -> Self {
        Self::with(name, Vec::new(), Ok(()))
    }

    /// Every probe reports a mismatch.
    pub fn failing(name: &str) -> Self {
        Self::with(name, Vec::new(), Err(mismatch(name)))
    }

    /// The first `failures` probes report a mismatch, later ones succeed.
    pub fn failing_then_passing(name: &str, failures: usize) -> Self {
        Self::with(name, vec![Err(mismatch(name)); failures], Ok(()))
    }

    /// Replays `results`, then succeeds.
    pub fn scripted(name: &str, results: Vec<Result<(), VerificationError>>) -> Self {
        Self::with(name, results, Ok(()))
    }

    /// Number of probes so far.
    pub fn verify_calls(&self) -> usize {
        self.script.calls.load(Ordering::SeqCst)
    }
}

impl Keyspace for ScriptedKeyspace {
    fn name(&self) -> &str {
        &self.name
    }

    fn column_families(&self) -> Vec<&dyn ColumnFamily> {
        self.families
            .iter()
            .map(|family| family as &dyn ColumnFamily)
            .collect()
    }

    fn verify_datamodel(&self) -> Result<(), VerificationError> {
        self.script.calls.fetch_add(1, Ordering::SeqCst);
        let next = self
            .script
            .results
            .lock()
            .expect("script mutex poisoned")
            .pop_front();
        next.unwrap_or_else(|| self.script.fallback.clone())
    }
}

/// Registry serving a fixed list of keyspaces.
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    keyspaces: Vec<ScriptedKeyspace>,
    lookups: Arc<AtomicUsize>,
}

impl StaticRegistry {
    pub fn new(keyspaces: Vec<ScriptedKeyspace>) -> Self {
        Self {
            keyspaces,
            lookups: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl KeyspaceRegistry for StaticRegistry {
    fn retrieve(&self, key: &str) -> Result<Vec<Box<dyn Keyspace>>, RegistryError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if key != crate::schema::KEYSPACES_KEY {
            return Err(RegistryError::Unavailable {
                key: key.to_owned(),
            });
        }
        Ok(self
            .keyspaces
            .iter()
            .cloned()
            .map(|keyspace| Box::new(keyspace) as Box<dyn Keyspace>)
            .collect())
    }
}
