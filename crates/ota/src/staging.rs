use std::fmt;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::capabilities::{FileSystem, HttpClient};
use crate::error::OtaError;
use crate::paths;
use crate::repo::RepoUrl;

/// Why a staging pass stopped before completing.
#[derive(Debug)]
pub enum AbortReason {
    /// The repository answered with a non-success status for one file.
    FileNotFound { path: String, status: u16 },
    /// The transport failed mid-pass.
    Transport { path: String, error: OtaError },
    /// Writing a staged copy failed.
    Filesystem { path: String, error: OtaError },
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbortReason::FileNotFound { path, status } => {
                write!(f, "{path} not found in repository (status {status})")
            }
            AbortReason::Transport { path, error } => {
                write!(f, "transport failed while staging {path}: {error}")
            }
            AbortReason::Filesystem { path, error } => {
                write!(f, "could not write staged copy {path}: {error}")
            }
        }
    }
}

/// Downloads every manifest-listed file into the staging tree. The live
/// tree is never touched in this phase, whatever the outcome.
pub struct StagingDownloader<'a, H, F> {
    http: &'a H,
    fs: &'a F,
    repo: &'a RepoUrl,
    timeout: Duration,
}

impl<'a, H: HttpClient, F: FileSystem> StagingDownloader<'a, H, F> {
    pub fn new(http: &'a H, fs: &'a F, repo: &'a RepoUrl, timeout: Duration) -> Self {
        Self {
            http,
            fs,
            repo,
            timeout,
        }
    }

    /// Stage all files in manifest order, stopping at the first failure
    /// without attempting further files. No retries within a pass; a
    /// transport failure aborts exactly like a missing file. Files already
    /// staged stay behind for the caller to clean up.
    pub fn download_all(&self, filenames: &[String]) -> Result<(), AbortReason> {
        for file in filenames {
            let staged = paths::staging_path(file);
            paths::ensure_directories(self.fs, &staged);

            let url = self.repo.file_url(file);
            debug!(%url, "downloading");
            let response = match self.http.get(&url, &[], self.timeout) {
                Ok(response) => response,
                Err(error) => {
                    warn!(%url, %error, "transport failed while staging");
                    return Err(AbortReason::Transport {
                        path: file.clone(),
                        error,
                    });
                }
            };
            if !response.is_success() {
                warn!(%url, status = response.status, "file missing from repository");
                return Err(AbortReason::FileNotFound {
                    path: file.clone(),
                    status: response.status,
                });
            }
            if let Err(error) = self.fs.write(&staged, &response.body) {
                warn!(path = %staged, %error, "could not write staged copy");
                return Err(AbortReason::Filesystem {
                    path: staged,
                    error,
                });
            }
        }
        info!(files = filenames.len(), "staging complete");
        Ok(())
    }
}
