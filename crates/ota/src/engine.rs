use std::time::Duration;

use tracing::{info, warn};

use crate::capabilities::{Device, FileSystem, HttpClient};
use crate::error::Result;
use crate::fetcher::{RemoteManifestFetcher, UpdateDecision};
use crate::install::Installer;
use crate::manifest::{ManifestStore, DEFAULT_MANIFEST_PATH};
use crate::repo::RepoUrl;
use crate::staging::{AbortReason, StagingDownloader};

/// Outcome of a single synchronous update cycle.
#[derive(Debug)]
pub enum UpdateOutcome {
    /// The device already runs the repository revision, or nothing
    /// trustworthy said otherwise. No file was touched.
    UpToDate,
    /// Staging stopped early; the live tree is unchanged and the staging
    /// area has been cleaned up best-effort.
    Aborted(AbortReason),
    /// The new revision is installed and recorded.
    Updated { version: String },
}

/// Orchestrates one check-stage-commit cycle over injected capabilities.
///
/// A cycle moves through checking the remote version, staging every listed
/// file, committing the staged copies, persisting the new manifest, and
/// finally the configured reset. `update()` runs each cycle to completion
/// or failure; there is no pause or resume, and no retry inside a cycle.
/// Callers own serialization and retry policy, typically a single outer
/// loop that sleeps between cycles.
pub struct UpdateEngine<H, F, D> {
    http: H,
    fs: F,
    device: D,
    repo: RepoUrl,
    filenames: Option<Vec<String>>,
    timeout: Duration,
    soft_reset: bool,
    hard_reset: bool,
    manifest_path: String,
}

/// Constructor-time configuration for [`UpdateEngine`].
pub struct UpdateEngineBuilder {
    repo_url: String,
    filenames: Option<Vec<String>>,
    timeout: Duration,
    soft_reset: bool,
    hard_reset: bool,
    manifest_path: String,
}

impl UpdateEngineBuilder {
    pub fn new(repo_url: impl Into<String>) -> Self {
        Self {
            repo_url: repo_url.into(),
            filenames: None,
            timeout: Duration::from_secs(5),
            soft_reset: false,
            hard_reset: false,
            manifest_path: DEFAULT_MANIFEST_PATH.to_string(),
        }
    }

    /// Static file list used when the remote manifest omits `filenames`.
    pub fn filenames(mut self, filenames: Vec<String>) -> Self {
        self.filenames = Some(filenames);
        self
    }

    /// Per-request timeout for the version check and every file download.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Issue a soft reset once an update is installed and recorded.
    pub fn soft_reset(mut self, enabled: bool) -> Self {
        self.soft_reset = enabled;
        self
    }

    /// Issue a hard reset once an update is installed and recorded.
    pub fn hard_reset(mut self, enabled: bool) -> Self {
        self.hard_reset = enabled;
        self
    }

    /// Device path of the local manifest record.
    pub fn manifest_path(mut self, path: impl Into<String>) -> Self {
        self.manifest_path = path.into();
        self
    }

    /// Bind the configuration to concrete capabilities.
    pub fn build<H, F, D>(self, http: H, fs: F, device: D) -> UpdateEngine<H, F, D> {
        UpdateEngine {
            http,
            fs,
            device,
            repo: RepoUrl::parse(&self.repo_url),
            filenames: self.filenames,
            timeout: self.timeout,
            soft_reset: self.soft_reset,
            hard_reset: self.hard_reset,
            manifest_path: self.manifest_path,
        }
    }
}

impl<H: HttpClient, F: FileSystem, D: Device> UpdateEngine<H, F, D> {
    /// Normalized repository root this engine fetches from.
    pub fn repo(&self) -> &RepoUrl {
        &self.repo
    }

    /// Run one update cycle.
    ///
    /// The manifest record is saved only after every file is committed, so
    /// an interruption mid-commit leaves the old version recorded and the
    /// next cycle re-applies the same update from scratch. Resets come
    /// last of all: a reset can never observe an unsaved version.
    pub fn update(&self) -> Result<UpdateOutcome> {
        let store = ManifestStore::new(&self.fs, self.manifest_path.clone());
        let local = store.load()?;

        let fetcher = RemoteManifestFetcher::new(&self.http, &self.repo, self.timeout);
        let remote = match fetcher.check_for_update(&local.version, self.filenames.as_deref()) {
            UpdateDecision::UpToDate => {
                info!(version = %local.version, "no update performed");
                return Ok(UpdateOutcome::UpToDate);
            }
            UpdateDecision::Available(remote) => remote,
        };

        let downloader = StagingDownloader::new(&self.http, &self.fs, &self.repo, self.timeout);
        let installer = Installer::new(&self.fs);
        if let Err(reason) = downloader.download_all(&remote.filenames) {
            warn!(%reason, "update aborted during staging");
            installer.cleanup_staging();
            return Ok(UpdateOutcome::Aborted(reason));
        }

        installer.commit(&remote.filenames)?;
        installer.cleanup_staging();
        store.save(&remote)?;
        info!(version = %remote.version, "update installed");

        if self.soft_reset {
            self.device.soft_reset();
        }
        if self.hard_reset {
            self.device.hard_reset();
        }

        Ok(UpdateOutcome::Updated {
            version: remote.version,
        })
    }
}
