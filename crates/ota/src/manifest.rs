use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::capabilities::{EntryKind, FileSystem};
use crate::error::Result;
use crate::paths;

/// Default device path of the persisted manifest record.
pub const DEFAULT_MANIFEST_PATH: &str = "/version.json";

/// `{version, filenames}` record describing a code revision.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Manifest {
    /// Opaque revision tag. Compared only for inequality, never ordered.
    pub version: String,
    /// Absolute device paths covered by this revision.
    pub filenames: Vec<String>,
}

/// Persists and loads the device's local manifest record.
pub struct ManifestStore<'a, F> {
    fs: &'a F,
    path: String,
}

impl<'a, F: FileSystem> ManifestStore<'a, F> {
    pub fn new(fs: &'a F, path: impl Into<String>) -> Self {
        Self {
            fs,
            path: path.into(),
        }
    }

    /// Load the local record.
    ///
    /// A missing record means first run: a bootstrap state (version `"0"`,
    /// filenames from a full scan of the device, plus this record's own
    /// path) is synthesized and persisted immediately so later runs see a
    /// stable baseline. A record that exists but does not parse is logged
    /// and treated the same way.
    pub fn load(&self) -> Result<Manifest> {
        if self.fs.stat(&self.path).is_ok() {
            let raw = self.fs.read(&self.path)?;
            match serde_json::from_str::<Manifest>(&raw) {
                Ok(manifest) => return Ok(manifest),
                Err(err) => {
                    warn!(path = %self.path, %err, "corrupt local manifest, rebuilding baseline");
                }
            }
        }
        self.bootstrap()
    }

    /// Overwrite the record in a single whole-record write.
    pub fn save(&self, manifest: &Manifest) -> Result<()> {
        let encoded = serde_json::to_string(manifest)?;
        self.fs.write(&self.path, &encoded)
    }

    fn bootstrap(&self) -> Result<Manifest> {
        let mut filenames = scan_files(self.fs);
        // A corrupt record is still a file and shows up in the scan.
        if !filenames.contains(&self.path) {
            filenames.push(self.path.clone());
        }
        let manifest = Manifest {
            version: "0".to_string(),
            filenames,
        };
        self.save(&manifest)?;
        info!(files = manifest.filenames.len(), "synthesized bootstrap manifest");
        Ok(manifest)
    }
}

/// Worklist scan of every regular file under the device root, depth-first.
/// Unreadable entries are logged and skipped.
fn scan_files<F: FileSystem>(fs: &F) -> Vec<String> {
    let mut files = Vec::new();
    let mut pending = vec!["/".to_string()];
    while let Some(dir) = pending.pop() {
        let entries = match fs.list(&dir) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(%dir, %err, "skipping unreadable directory");
                continue;
            }
        };
        for name in entries {
            let path = paths::join(&dir, &name);
            match fs.stat(&path) {
                Ok(EntryKind::File) => files.push(path),
                Ok(EntryKind::Directory) => pending.push(path),
                Err(err) => warn!(%path, %err, "skipping unreadable entry"),
            }
        }
    }
    files
}
