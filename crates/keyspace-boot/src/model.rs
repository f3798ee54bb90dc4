//! Keyspace models loaded from a JSON document.
//!
//! The document lists the expected keyspaces:
//!
//! ```json
//! { "keyspaces": [ { "name": "Blog", "column_families": { "Posts": { "compare_with": "UTF8Type" } } } ] }
//! ```
//!
//! Each model is verified by running an external program with the keyspace
//! name as its only argument. Exit status 0 means the live schema matches,
//! `EX_TEMPFAIL` (75) means the data store could not be reached, and any other
//! status is a mismatch.

use std::collections::BTreeMap;
use std::fs;
use std::process::{Command, Stdio};

use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use tracing::debug;

use crate::schema::{
    ColumnFamily, KEYSPACES_KEY, Keyspace, KeyspaceRegistry, RegistryError, VerificationError,
};

const MODEL_TARGET: &str = "keyspace_boot::model";
const DEFAULT_COMPARATOR: &str = "BytesType";
const EX_TEMPFAIL: i32 = 75;

/// Column family entry as written in the model document.
#[derive(Debug, Clone, Deserialize)]
struct ColumnFamilyEntry {
    #[serde(default = "default_comparator")]
    compare_with: String,
}

fn default_comparator() -> String {
    DEFAULT_COMPARATOR.to_owned()
}

#[derive(Debug, Clone, Deserialize)]
struct KeyspaceEntry {
    name: String,
    #[serde(default)]
    column_families: BTreeMap<String, ColumnFamilyEntry>,
}

#[derive(Debug, Deserialize)]
struct ModelDocument {
    #[serde(default)]
    keyspaces: Vec<KeyspaceEntry>,
}

/// Expected column family definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnFamilyModel {
    name: String,
    compare_with: String,
}

impl ColumnFamilyModel {
    /// Builds a column family model.
    #[must_use]
    pub fn new(name: impl Into<String>, compare_with: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            compare_with: compare_with.into(),
        }
    }
}

impl ColumnFamily for ColumnFamilyModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn compare_with(&self) -> &str {
        &self.compare_with
    }
}

/// Expected keyspace definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyspaceModel {
    name: String,
    column_families: Vec<ColumnFamilyModel>,
}

impl KeyspaceModel {
    /// Builds a keyspace model from its column families.
    #[must_use]
    pub fn new(name: impl Into<String>, column_families: Vec<ColumnFamilyModel>) -> Self {
        Self {
            name: name.into(),
            column_families,
        }
    }

    /// Keyspace name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column family models, ordered by name.
    #[must_use]
    pub fn column_families(&self) -> &[ColumnFamilyModel] {
        &self.column_families
    }
}

impl From<KeyspaceEntry> for KeyspaceModel {
    fn from(entry: KeyspaceEntry) -> Self {
        let column_families = entry
            .column_families
            .into_iter()
            .map(|(name, family)| ColumnFamilyModel::new(name, family.compare_with))
            .collect();
        Self::new(entry.name, column_families)
    }
}

/// A keyspace model verified by an external program.
#[derive(Debug, Clone)]
pub struct CommandKeyspace {
    model: KeyspaceModel,
    verify_program: Option<Utf8PathBuf>,
}

impl CommandKeyspace {
    /// Wraps a model with the program used to verify it.
    #[must_use]
    pub const fn new(model: KeyspaceModel, verify_program: Option<Utf8PathBuf>) -> Self {
        Self {
            model,
            verify_program,
        }
    }

    /// Underlying model.
    #[must_use]
    pub const fn model(&self) -> &KeyspaceModel {
        &self.model
    }
}

impl Keyspace for CommandKeyspace {
    fn name(&self) -> &str {
        self.model.name()
    }

    fn column_families(&self) -> Vec<&dyn ColumnFamily> {
        self.model
            .column_families()
            .iter()
            .map(|family| family as &dyn ColumnFamily)
            .collect()
    }

    fn verify_datamodel(&self) -> Result<(), VerificationError> {
        let keyspace = self.model.name().to_owned();
        let Some(program) = self.verify_program.as_deref() else {
            return Err(VerificationError::Unavailable {
                keyspace,
                detail: "no verification program configured".to_owned(),
            });
        };
        debug!(target: MODEL_TARGET, program = %program, keyspace = %keyspace, "running verification program");
        let output = Command::new(program.as_std_path())
            .arg(&keyspace)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| VerificationError::Unavailable {
                keyspace: keyspace.clone(),
                detail: format!("failed to run '{program}': {source}"),
            })?;
        if output.status.success() {
            return Ok(());
        }
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_owned();
        let detail = if stderr.is_empty() {
            format!("'{program}' exited with {}", output.status)
        } else {
            stderr
        };
        if output.status.code() == Some(EX_TEMPFAIL) {
            Err(VerificationError::Unreachable { keyspace, detail })
        } else {
            Err(VerificationError::Mismatch { keyspace, detail })
        }
    }
}

/// Registry backed by a JSON model document.
#[derive(Debug, Clone)]
pub struct ModelRegistry {
    keyspaces: Vec<CommandKeyspace>,
}

impl ModelRegistry {
    /// Loads the model document at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::ReadModel`] or [`RegistryError::ParseModel`].
    pub fn load(path: &Utf8Path, verify_program: Option<&Utf8Path>) -> Result<Self, RegistryError> {
        let content = fs::read_to_string(path).map_err(|source| RegistryError::ReadModel {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content, verify_program).map_err(|source| RegistryError::ParseModel {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parses a model document held in memory.
    ///
    /// # Errors
    ///
    /// Returns the JSON error when the document does not match the model shape.
    pub fn from_json(
        content: &str,
        verify_program: Option<&Utf8Path>,
    ) -> Result<Self, serde_json::Error> {
        let document: ModelDocument = serde_json::from_str(content)?;
        let keyspaces = document
            .keyspaces
            .into_iter()
            .map(|entry| {
                CommandKeyspace::new(KeyspaceModel::from(entry), verify_program.map(Utf8Path::to_path_buf))
            })
            .collect();
        Ok(Self { keyspaces })
    }

    /// Finds a keyspace by name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&CommandKeyspace> {
        self.keyspaces
            .iter()
            .find(|keyspace| keyspace.model().name() == name)
    }

    /// Keyspaces in document order.
    #[must_use]
    pub fn keyspaces(&self) -> &[CommandKeyspace] {
        &self.keyspaces
    }
}

impl KeyspaceRegistry for ModelRegistry {
    fn retrieve(&self, key: &str) -> Result<Vec<Box<dyn Keyspace>>, RegistryError> {
        if key != KEYSPACES_KEY {
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
