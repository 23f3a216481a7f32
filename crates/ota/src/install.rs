use tracing::{debug, info, warn};

use crate::capabilities::{EntryKind, FileSystem};
use crate::error::{OtaError, Result};
use crate::paths::{self, STAGING_ROOT};

/// Commits staged files over the live tree and discards the staging area.
pub struct Installer<'a, F> {
    fs: &'a F,
}

impl<'a, F: FileSystem> Installer<'a, F> {
    pub fn new(fs: &'a F) -> Self {
        Self { fs }
    }

    /// Overwrite each live file with its staged copy, in manifest order,
    /// removing the staged copy as it goes.
    ///
    /// Not transactional across files: a reset between two files leaves the
    /// live tree mixed, with the local manifest still naming the old
    /// version. The next cycle re-stages and re-applies the same revision,
    /// which is idempotent at the file level.
    pub fn commit(&self, filenames: &[String]) -> Result<()> {
        for file in filenames {
            let staged = paths::staging_path(file);
            let contents = self.fs.read(&staged).map_err(|source| OtaError::Install {
                path: file.clone(),
                source: Box::new(source),
            })?;
            paths::ensure_directories(self.fs, file);
            self.fs
                .write(file, &contents)
                .map_err(|source| OtaError::Install {
                    path: file.clone(),
                    source: Box::new(source),
                })?;
            if let Err(err) = self.fs.remove(&staged) {
                warn!(path = %staged, %err, "staged copy left behind");
            }
            debug!(path = %file, "installed");
        }
        info!(files = filenames.len(), "install complete");
        Ok(())
    }

    /// Remove the staging tree, best-effort. Individual failures are logged
    /// and swallowed; calling this on an already-clean area is a no-op.
    pub fn cleanup_staging(&self) {
        remove_tree(self.fs, STAGING_ROOT);
    }
}

/// Worklist-driven removal of a directory tree. Directories are recorded in
/// discovery order and removed in reverse, deepest first, so no `rmdir`
/// runs before its children are gone.
fn remove_tree<F: FileSystem>(fs: &F, root: &str) {
    if fs.stat(root).is_err() {
        return;
    }
    let mut pending = vec![root.to_string()];
    let mut dirs = Vec::new();
    while let Some(dir) = pending.pop() {
        match fs.list(&dir) {
            Ok(entries) => {
                for name in entries {
                    let path = paths::join(&dir, &name);
                    match fs.stat(&path) {
                        Ok(EntryKind::Directory) => pending.push(path),
                        Ok(EntryKind::File) => {
                            if let Err(err) = fs.remove(&path) {
                                warn!(%path, %err, "could not remove staged file");
                            }
                        }
                        Err(err) => warn!(%path, %err, "could not stat staging entry"),
                    }
                }
            }
            Err(err) => warn!(%dir, %err, "could not list staging directory"),
        }
        dirs.push(dir);
    }
    for dir in dirs.iter().rev() {
        if let Err(err) = fs.rmdir(dir) {
            warn!(%dir, %err, "could not remove staging directory");
        }
    }
}
