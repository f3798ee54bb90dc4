//! Config templating: render a keyspace fragment and splice it into the
//! data-store configuration.

mod files;
mod render;

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;
use tracing::{info, warn};

pub use render::{KEYSPACE_BOILERPLATE, render_column_family, render_keyspace};

/// Literal token replaced by the rendered fragment.
pub const PLACEHOLDER: &str = "[[[PLACEHOLDER]]]";

const TEMPLATE_TARGET: &str = "keyspace_boot::template";

/// A template file and the active configuration rendered from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigTemplate {
    template_path: Utf8PathBuf,
    target_path: Utf8PathBuf,
}

impl ConfigTemplate {
    /// Pairs a template with its output path.
    #[must_use]
    pub fn new(template_path: impl Into<Utf8PathBuf>, target_path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            template_path: template_path.into(),
            target_path: target_path.into(),
        }
    }

    /// Template path.
    #[must_use]
    pub fn template_path(&self) -> &Utf8Path {
        &self.template_path
    }

    /// Target path.
    #[must_use]
    pub fn target_path(&self) -> &Utf8Path {
        &self.target_path
    }

    /// Substitutes `fragment` for every placeholder and overwrites the target.
    ///
    /// A template without the placeholder is written through unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::ReadTemplate`] when the template cannot be
    /// read and [`TemplateError::WriteTarget`] when the target cannot be
    /// replaced.
    pub fn apply(&self, fragment: &str) -> Result<(), TemplateError> {
        let template =
            fs::read_to_string(&self.template_path).map_err(|source| TemplateError::ReadTemplate {
                path: self.template_path.clone(),
                source,
            })?;
        let occurrences = template.matches(PLACEHOLDER).count();
        if occurrences == 0 {
            warn!(
                target: TEMPLATE_TARGET,
                template = %self.template_path,
                "template has no placeholder; writing it unchanged"
            );
        }
        let rendered = template.replace(PLACEHOLDER, fragment);
        files::atomic_write(self.target_path.as_std_path(), rendered.as_bytes()).map_err(
            |source| TemplateError::WriteTarget {
                path: self.target_path.clone(),
                source,
            },
        )?;
        info!(
            target: TEMPLATE_TARGET,
            template = %self.template_path,
            target_file = %self.target_path,
            occurrences,
            bytes = rendered.len(),
            "configuration written"
        );
        Ok(())
    }
}

/// Errors raised while applying a template.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// The template could not be read.
    #[error("failed to read template '{path}': {source}")]
    ReadTemplate {
        /// Template path.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// The target could not be written.
    #[error("failed to write configuration '{path}': {source}")]
    WriteTarget {
        /// Target path.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
}
