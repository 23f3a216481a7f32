use std::time::Duration;

use crate::error::Result;

/// Outcome of an HTTP exchange that got far enough to carry a status line.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Status code as reported by the server.
    pub status: u16,
    /// Response body, treated as text.
    pub body: String,
}

impl HttpResponse {
    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Blocking HTTP capability the engine fetches manifests and files through.
///
/// An `Err` means the transport failed before any status was seen; servers
/// that answer at all produce an `Ok` response whatever the status code.
pub trait HttpClient {
    fn get(&self, url: &str, headers: &[(&str, &str)], timeout: Duration) -> Result<HttpResponse>;
}

/// What a path refers to on the device filesystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// Device filesystem capability.
///
/// Paths are `/`-separated; a leading separator is optional and refers to
/// the device root either way. Only primitive operations live here; the
/// engine builds recursive scans and removals on top of `list` and `stat`
/// with explicit worklists.
pub trait FileSystem {
    /// Read a whole file as text.
    fn read(&self, path: &str) -> Result<String>;
    /// Create or truncate a file with the given text.
    fn write(&self, path: &str, contents: &str) -> Result<()>;
    /// Remove a regular file.
    fn remove(&self, path: &str) -> Result<()>;
    /// Create a single directory whose parent already exists.
    fn mkdir(&self, path: &str) -> Result<()>;
    /// Remove a single empty directory.
    fn rmdir(&self, path: &str) -> Result<()>;
    /// Entry names (not paths) directly under a directory.
    fn list(&self, dir: &str) -> Result<Vec<String>>;
    /// Kind of the entry at `path`; `Err` when it does not exist.
    fn stat(&self, path: &str) -> Result<EntryKind>;
}

/// Device control capability.
///
/// On real hardware neither reset returns: the device restarts and comes
/// back up running whatever is on its filesystem. Host-side implementations
/// are free to treat them as no-ops.
pub trait Device {
    fn soft_reset(&self);
    fn hard_reset(&self);
}
