use std::fmt;

const BROWSE_PREFIX: &str = "https://github.com/";
const RAW_PREFIX: &str = "https://raw.githubusercontent.com/";
const TREE_SEGMENT: &str = "/tree";

/// Name of the manifest record, both on the device and in the repository.
pub const VERSION_FILE: &str = "version.json";

/// Normalized base URL update files are fetched relative to.
///
/// Normalization rewrites a source-hosting browse URL into its raw-content
/// equivalent, drops the `/tree` segment browse URLs carry, and trims
/// leading and trailing separators so concatenation with absolute device
/// paths needs no further joining.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoUrl(String);

impl RepoUrl {
    /// Normalize a raw repository URL. Idempotent: parsing an already
    /// normalized URL yields the same value.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim_matches('/');
        let rehosted = trimmed.replace(BROWSE_PREFIX, RAW_PREFIX);
        RepoUrl(rehosted.replace(TREE_SEGMENT, ""))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// URL of the remote manifest.
    pub fn version_url(&self) -> String {
        format!("{}/{}", self.0, VERSION_FILE)
    }

    /// URL of one manifest-listed file; `file` carries its own leading
    /// separator.
    pub fn file_url(&self, file: &str) -> String {
        format!("{}{}", self.0, file)
    }
}

impl fmt::Display for RepoUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
