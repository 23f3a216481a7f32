use std::fs;
use std::path::PathBuf;

use tracing::info;

use crate::capabilities::{Device, EntryKind, FileSystem};
use crate::error::{OtaError, Result};

/// [`FileSystem`] mapping absolute device paths into a host directory.
///
/// `/lib/foo.py` resolves to `<root>/lib/foo.py`; the optional leading
/// separator is stripped, so `tmp/foo.py` and `/tmp/foo.py` name the same
/// file. Paths containing `..` are rejected rather than resolved.
pub struct DirFileSystem {
    root: PathBuf,
}

impl DirFileSystem {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> Result<PathBuf> {
        let relative = path.trim_matches('/');
        if relative.split('/').any(|part| part == "..") {
            return Err(OtaError::PathEscape(path.to_string()));
        }
        Ok(if relative.is_empty() {
            self.root.clone()
        } else {
            self.root.join(relative)
        })
    }
}

impl FileSystem for DirFileSystem {
    fn read(&self, path: &str) -> Result<String> {
        Ok(fs::read_to_string(self.resolve(path)?)?)
    }

    fn write(&self, path: &str, contents: &str) -> Result<()> {
        Ok(fs::write(self.resolve(path)?, contents)?)
    }

    fn remove(&self, path: &str) -> Result<()> {
        Ok(fs::remove_file(self.resolve(path)?)?)
    }

    fn mkdir(&self, path: &str) -> Result<()> {
        Ok(fs::create_dir(self.resolve(path)?)?)
    }

    fn rmdir(&self, path: &str) -> Result<()> {
        Ok(fs::remove_dir(self.resolve(path)?)?)
    }

    fn list(&self, dir: &str) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(self.resolve(dir)?)? {
            names.push(entry?.file_name().to_string_lossy().into_owned());
        }
        // read_dir order is platform-dependent; sort so the bootstrap scan
        // is deterministic.
        names.sort();
        Ok(names)
    }

    fn stat(&self, path: &str) -> Result<EntryKind> {
        let metadata = fs::metadata(self.resolve(path)?)?;
        Ok(if metadata.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::File
        })
    }
}

/// [`Device`] for hosts with nothing to restart; both resets only log.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDevice;

impl Device for NullDevice {
    fn soft_reset(&self) {
        info!("soft reset requested, ignored on host");
    }

    fn hard_reset(&self) {
        info!("hard reset requested, ignored on host");
    }
}
