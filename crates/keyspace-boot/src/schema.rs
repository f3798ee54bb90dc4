//! Capabilities the bootstrapper needs from the schema layer.
//!
//! The schema objects themselves live elsewhere. Boot only reads a keyspace's
//! name and column families, and asks it to compare the live schema against
//! the expected model.

use thiserror::Error;

/// Registry key under which the default keyspaces are published.
pub const KEYSPACES_KEY: &str = "keyspaces";

/// A column family descriptor as seen by the config renderer.
pub trait ColumnFamily {
    /// Column family name.
    fn name(&self) -> &str;

    /// Comparator identifier of the default field, for example `BytesType`.
    fn compare_with(&self) -> &str;
}

/// A named schema grouping several column families.
pub trait Keyspace {
    /// Keyspace name.
    fn name(&self) -> &str;

    /// Column family descriptors in the implementation's iteration order.
    fn column_families(&self) -> Vec<&dyn ColumnFamily>;

    /// Checks the live schema against the expected model.
    ///
    /// # Errors
    ///
    /// Returns a [`VerificationError`] when the schemas differ or the check
    /// could not be carried out.
    fn verify_datamodel(&self) -> Result<(), VerificationError>;
}

/// Lookup used to find a default keyspace when none is supplied.
pub trait KeyspaceRegistry {
    /// Returns the keyspaces registered under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`RegistryError`] when the registry cannot be read.
    fn retrieve(&self, key: &str) -> Result<Vec<Box<dyn Keyspace>>, RegistryError>;
}

/// Failure reported by [`Keyspace::verify_datamodel`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VerificationError {
    /// The live schema differs from the expected model.
    #[error("keyspace '{keyspace}' does not match the expected model: {detail}")]
    Mismatch {
        /// Keyspace being verified.
        keyspace: String,
        /// Description of the difference.
        detail: String,
    },
    /// The data store did not answer, typically while it is still starting.
    #[error("keyspace '{keyspace}' could not be checked, data store unreachable: {detail}")]
    Unreachable {
        /// Keyspace being verified.
        keyspace: String,
        /// Transport-level description.
        detail: String,
    },
    /// The check itself cannot run; restarting the data store will not help.
    #[error("keyspace '{keyspace}' cannot be verified: {detail}")]
    Unavailable {
        /// Keyspace being verified.
        keyspace: String,
        /// Reason the check is impossible.
        detail: String,
    },
}

impl VerificationError {
    /// Whether a config rewrite and restart may fix this failure.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Mismatch { .. } | Self::Unreachable { .. })
    }

    /// Keyspace the failure refers to.
    #[must_use]
    pub fn keyspace(&self) -> &str {
        match self {
            Self::Mismatch { keyspace, .. }
            | Self::Unreachable { keyspace, .. }
            | Self::Unavailable { keyspace, .. } => keyspace,
        }
    }
}

/// Errors raised while resolving the default keyspace.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The registry holds no keyspaces under the key.
    #[error("no keyspaces registered under '{key}'")]
    Empty {
        /// Lookup key.
        key: String,
    },
    /// The registry does not know the key.
    #[error("registry has no entry for '{key}'")]
    Unavailable {
        /// Lookup key.
        key: String,
    },
    /// The model document could not be read.
    #[error("failed to read keyspace model '{path}': {source}")]
    ReadModel {
        /// Model document path.
        path: camino::Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// The model document is not valid JSON for the expected shape.
    #[error("failed to parse keyspace model '{path}': {source}")]
    ParseModel {
        /// Model document path.
        path: camino::Utf8PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },
}

/// Resolves the keyspace to boot: the supplied one, or the first registered.
///
/// # Errors
///
/// Propagates registry failures and reports an empty registry as
/// [`RegistryError::Empty`].
pub fn default_keyspace(registry: &dyn KeyspaceRegistry) -> Result<Box<dyn Keyspace>, RegistryError> {
    registry
        .retrieve(KEYSPACES_KEY)?
        .into_iter()
        .next()
        .ok_or_else(|| RegistryError::Empty {
            key: KEYSPACES_KEY.to_owned(),
        })
}
