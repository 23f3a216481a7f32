use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::capabilities::HttpClient;
use crate::manifest::Manifest;
use crate::repo::RepoUrl;

/// Result of comparing the device against the remote repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateDecision {
    /// No update is due, or nothing trustworthy said otherwise.
    UpToDate,
    /// The repository carries a different revision.
    Available(Manifest),
}

/// Remote manifest as served. `filenames` may be omitted when callers
/// configure a static list instead.
#[derive(Debug, Deserialize)]
struct RemoteManifest {
    #[serde(default)]
    version: String,
    #[serde(default)]
    filenames: Option<Vec<String>>,
}

/// Retrieves the remote manifest and decides whether an update is due.
pub struct RemoteManifestFetcher<'a, H> {
    http: &'a H,
    repo: &'a RepoUrl,
    timeout: Duration,
}

impl<'a, H: HttpClient> RemoteManifestFetcher<'a, H> {
    pub fn new(http: &'a H, repo: &'a RepoUrl, timeout: Duration) -> Self {
        Self { http, repo, timeout }
    }

    /// Fetch `{repo}/version.json` and compare versions by string
    /// inequality.
    ///
    /// Fail-safe: a transport error, a non-success status, an undecodable
    /// body and a missing remote version all resolve to
    /// [`UpdateDecision::UpToDate`]. An update is never claimed without a
    /// fully parsed manifest.
    pub fn check_for_update(
        &self,
        local_version: &str,
        fallback_filenames: Option<&[String]>,
    ) -> UpdateDecision {
        let url = self.repo.version_url();
        let response = match self
            .http
            .get(&url, &[("Accept", "application/json")], self.timeout)
        {
            Ok(response) => response,
            Err(err) => {
                warn!(%url, %err, "version check failed in transport");
                return UpdateDecision::UpToDate;
            }
        };
        if !response.is_success() {
            warn!(%url, status = response.status, "version check rejected");
            return UpdateDecision::UpToDate;
        }
        let remote: RemoteManifest = match serde_json::from_str(&response.body) {
            Ok(remote) => remote,
            Err(err) => {
                warn!(%url, %err, "remote manifest is not valid JSON");
                return UpdateDecision::UpToDate;
            }
        };
        if remote.version.is_empty() {
            warn!(%url, "remote manifest carries no version");
            return UpdateDecision::UpToDate;
        }
        if remote.version == local_version {
            debug!(version = %local_version, "device is up to date");
            return UpdateDecision::UpToDate;
        }
        let filenames = match remote
            .filenames
            .or_else(|| fallback_filenames.map(|files| files.to_vec()))
        {
            Some(filenames) => filenames,
            None => {
                warn!(%url, "remote manifest lists no files and no override is configured");
                return UpdateDecision::UpToDate;
            }
        };
        info!(local = %local_version, remote = %remote.version, "update available");
        UpdateDecision::Available(Manifest {
            version: remote.version,
            filenames,
        })
    }
}
