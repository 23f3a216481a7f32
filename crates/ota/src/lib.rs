//! Over-the-air code updates for device file trees.
//!
//! The engine fetches a remote `{version, filenames}` manifest, compares
//! the version string against the locally recorded one, stages every listed
//! file in a scratch tree, and only then commits the staged copies over the
//! live files. Network, filesystem and reset access all arrive through
//! capability traits, so firmware supplies its real primitives while tests
//! inject fakes. Execution is blocking and single-threaded throughout,
//! matching the constrained runtimes the engine targets.
//!
//! ```ignore
//! use std::time::Duration;
//! use ota::{BlockingHttpClient, DirFileSystem, NullDevice, UpdateEngineBuilder, UpdateOutcome};
//!
//! fn cycle() -> ota::Result<()> {
//!     let engine = UpdateEngineBuilder::new("https://github.com/acme/firmware/tree/main")
//!         .timeout(Duration::from_secs(5))
//!         .build(BlockingHttpClient::new(), DirFileSystem::new("/srv/device"), NullDevice);
//!     match engine.update()? {
//!         UpdateOutcome::Updated { version } => println!("now at {version}"),
//!         UpdateOutcome::UpToDate => println!("nothing to do"),
//!         UpdateOutcome::Aborted(reason) => println!("aborted: {reason}"),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! Committing is deliberately not transactional across files: without an
//! atomic multi-file filesystem primitive, a reset mid-commit leaves a
//! mixed tree while the recorded version still names the old revision. The
//! next cycle then re-stages and re-applies the same update, which is
//! idempotent at the file level.

mod capabilities;
mod engine;
mod error;
mod fetcher;
mod host;
mod http;
mod install;
mod manifest;
mod paths;
mod repo;
mod staging;

pub use capabilities::{Device, EntryKind, FileSystem, HttpClient, HttpResponse};
pub use engine::{UpdateEngine, UpdateEngineBuilder, UpdateOutcome};
pub use error::{OtaError, Result};
pub use fetcher::{RemoteManifestFetcher, UpdateDecision};
pub use host::{DirFileSystem, NullDevice};
pub use http::BlockingHttpClient;
pub use install::Installer;
pub use manifest::{Manifest, ManifestStore, DEFAULT_MANIFEST_PATH};
pub use paths::{directories_for, staging_path, STAGING_ROOT};
pub use repo::RepoUrl;
pub use staging::{AbortReason, StagingDownloader};
