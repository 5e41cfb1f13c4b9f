//! Destinations for finished PNG bytes

use crate::error::{IconError, Result};
use std::{
    collections::BTreeMap,
    fs::{create_dir_all, File},
    io::{BufWriter, Write},
    path::{Component, Path, PathBuf},
};
use tracing::info;

/// Reject output paths that are absolute or climb out with `..`.
pub fn validate_relative(file: &Path) -> Result<()> {
    let contained = file
        .components()
        .all(|component| matches!(component, Component::Normal(_) | Component::CurDir));
    if !contained || file.as_os_str().is_empty() {
        return Err(IconError::UnsafePath(file.to_path_buf()));
    }
    Ok(())
}

/// Receives each encoded icon exactly once.
pub trait IconSink {
    fn write(&mut self, file: &Path, bytes: &[u8]) -> Result<()>;
}

/// Keeps every written file in memory, keyed by its relative path.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub files: BTreeMap<PathBuf, Vec<u8>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, file: impl AsRef<Path>) -> Option<&[u8]> {
        self.files.get(file.as_ref()).map(Vec::as_slice)
    }
}

impl IconSink for MemorySink {
    fn write(&mut self, file: &Path, bytes: &[u8]) -> Result<()> {
        self.files.insert(file.to_path_buf(), bytes.to_vec());
        Ok(())
    }
}

/// Writes files below a root directory, creating parent directories as needed.
#[derive(Debug, Clone)]
pub struct DirSink {
    root: PathBuf,
}

impl DirSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl IconSink for DirSink {
    fn write(&mut self, file: &Path, bytes: &[u8]) -> Result<()> {
        validate_relative(file)?;
        let path = self.root.join(file);
        if let Some(parent) = path.parent() {
            create_dir_all(parent)?;
        }

        let mut out = BufWriter::new(File::create(&path)?);
        out.write_all(bytes)?;
        out.flush()?;

        info!(event = "icon_written", path = %path.display(), bytes = bytes.len());
        Ok(())
    }
}
