//! Shared helpers for integration tests driving the compiled binary.
//!
//! Not every test binary uses every helper.
#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A fresh `data-import` invocation.
pub fn data_import() -> Command {
    Command::cargo_bin("data-import").expect("binary builds")
}

/// Scratch directory for source files and batch definitions.
pub fn workspace() -> TempDir {
    TempDir::new().expect("create temp dir")
}

pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}

/// Writes a batch-definition file listing the given (job type, source) pairs
/// in order.
pub fn batch_definition(dir: &Path, entries: &[(&str, &Path)]) -> PathBuf {
    let mut document = String::from("version: 1\n");
    if entries.is_empty() {
        document.push_str("actions: []\n");
    } else {
        document.push_str("actions:\n");
        for (job_type, source) in entries {
            document.push_str(&format!(
                "  - data_entity: {job_type}\n    source: {}\n",
                source.display()
            ));
        }
    }
    write_file(dir, "import.yml", &document)
}
