//! Fixtures shared by the CLI unit tests.

use std::ffi::OsString;
use std::fs;
use std::process::ExitCode;

use camino::Utf8PathBuf;
use keyspace_boot_config::Config;
use rstest::fixture;
use tempfile::TempDir;

use crate::{AppError, ConfigLoader, run_with_loader};

pub const MODEL: &str = r#"{
  "keyspaces": [
    {
      "name": "Blog",
      "column_families": {
        "Posts": { "compare_with": "UTF8Type" },
        "Comments": {}
      }
    },
    {
      "name": "Audit",
      "column_families": {
        "Events": { "compare_with": "TimeUUIDType" }
      }
    }
  ]
}"#;

pub const TEMPLATE: &str = "<Keyspaces>\n[[[PLACEHOLDER]]]\n</Keyspaces>\n";

pub struct StaticConfigLoader {
    config: Config,
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self, _args: &[OsString]) -> Result<Config, AppError> {
        Ok(self.config.clone())
    }
}

/// Temporary data-store layout with a model document and a template.
pub struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
    pub config: Config,
}

impl Workspace {
    pub fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    pub fn target(&self) -> Option<String> {
        fs::read_to_string(self.path("storage-conf.xml")).ok()
    }

    /// Runs the CLI with `args` after the program name.
    pub fn run(&self, args: &[&str]) -> Outcome {
        let loader = StaticConfigLoader {
            config: self.config.clone(),
        };
        let argv = std::iter::once("keyspace-boot")
            .chain(args.iter().copied())
            .map(OsString::from);
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let exit = run_with_loader(argv, &mut stdout, &mut stderr, &loader);
        Outcome {
            exit,
            stdout: String::from_utf8(stdout).expect("stdout utf8"),
            stderr: String::from_utf8(stderr).expect("stderr utf8"),
        }
    }
}

pub struct Outcome {
    pub exit: ExitCode,
    pub stdout: String,
    pub stderr: String,
}

#[fixture]
pub fn workspace() -> Workspace {
    let dir = TempDir::new().expect("create temp dir");
    let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 temp dir");
    fs::write(root.join("model.json"), MODEL).expect("write model");
    fs::write(root.join("storage-conf.xml.tmpl"), TEMPLATE).expect("write template");
    let config = Config {
        want_boot: true,
        process_binary: Some(root.join("bin/cassandra")),
        pid_file: Some(root.join("cassandra.pid")),
        template_path: Some(root.join("storage-conf.xml.tmpl")),
        target_path: Some(root.join("storage-conf.xml")),
        model_path: Some(root.join("model.json")),
        ..Config::default()
    };
    Workspace {
        _dir: dir,
        root,
        config,
    }
}
