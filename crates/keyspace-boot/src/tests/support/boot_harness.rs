//! Bootstrapper wired to recording doubles and a temporary config directory.

use std::fs;
use std::sync::Arc;

use camino::Utf8PathBuf;
use rstest::fixture;
use tempfile::TempDir;

use super::{RecordingBootReporter, RecordingPause, RecordingProcess};
use crate::bootstrap::{BootController, Bootstrapper};
use crate::report::BootReporter;
use crate::template::{ConfigTemplate, PLACEHOLDER};

pub const TEMPLATE_BODY: &str = "<Storage>\n<Keyspaces>\n[[[PLACEHOLDER]]]\n</Keyspaces>\n</Storage>\n";

pub struct BootHarness {
    _dir: TempDir,
    pub template: ConfigTemplate,
    pub process: RecordingProcess,
    pub reporter: Arc<RecordingBootReporter>,
    pub pause: Arc<RecordingPause>,
}

impl BootHarness {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 temp dir");
        let template_path = root.join("storage-conf.xml.tmpl");
        fs::write(&template_path, TEMPLATE_BODY).expect("write template");
        Self {
            _dir: dir,
            template: ConfigTemplate::new(template_path, root.join("storage-conf.xml")),
            process: RecordingProcess::default(),
            reporter: Arc::new(RecordingBootReporter::default()),
            pause: Arc::new(RecordingPause::default()),
        }
    }

    pub fn bootstrapper(&self, want_boot: bool) -> Bootstrapper<RecordingProcess> {
        let reporter: Arc<dyn BootReporter> = self.reporter.clone();
        Bootstrapper::new(
            BootController::new(want_boot),
            self.template.clone(),
            self.process.clone(),
            reporter,
        )
        .with_pause(self.pause.clone())
    }

    /// Contents of the generated config, if one was written.
    pub fn written_config(&self) -> Option<String> {
        fs::read_to_string(self.template.target_path()).ok()
    }

    pub fn placeholder_consumed(&self) -> bool {
        self.written_config()
            .is_some_and(|config| !config.contains(PLACEHOLDER))
    }
}

impl Default for BootHarness {
    fn default() -> Self {
        Self::new()
    }
}

#[fixture]
pub fn harness() -> BootHarness {
    BootHarness::new()
}
