//! File-backed input and output for the CLI.

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use slot_engine::error::Result as SlotResult;
use slot_engine::{ServiceSnapshot, SlotError, SnapshotSource};

/// Loads `<dir>/<service_id>.json` snapshots.
///
/// I/O and parse failures are reported as upstream errors.
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl SnapshotSource for DirectorySource {
    fn load(&self, service_id: &str) -> SlotResult<ServiceSnapshot> {
        if service_id.is_empty() || service_id.contains(['/', '\\']) || service_id.contains("..") {
            return Err(SlotError::UnknownService(service_id.to_string()));
        }

        let path = self.dir.join(format!("{}.json", service_id));
        let json = std::fs::read_to_string(&path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                SlotError::UnknownService(service_id.to_string())
            } else {
                SlotError::Upstream(format!("{}: {}", path.display(), e))
            }
        })?;
        serde_json::from_str(&json)
            .map_err(|e| SlotError::Upstream(format!("{}: {}", path.display(), e)))
    }
}

pub fn read_snapshot(path: &Path) -> Result<ServiceSnapshot> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot: {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse snapshot: {}", path.display()))
}

pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display())),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

pub fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path.display()))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
