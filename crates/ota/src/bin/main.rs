//! Periodic OTA update agent for hosted device trees.
//!
//! Runs one update cycle per interval against a repository, mapping
//! absolute device paths into a root directory on the host. One loop owns
//! one engine, so cycles are serialized by construction.

use std::thread;
use std::time::Duration;

use clap::Parser;
use ota::{BlockingHttpClient, DirFileSystem, NullDevice, UpdateEngineBuilder, UpdateOutcome};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

/// Command-line arguments for the update agent
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Repository URL updates are fetched from (browse URLs are normalized)
    #[arg(long)]
    repo_url: String,

    /// Directory the device file tree is rooted at
    #[arg(long, default_value = ".")]
    root: String,

    /// Static file list used when the remote manifest omits filenames
    /// (repeatable)
    #[arg(long = "file")]
    files: Vec<String>,

    /// Seconds between update cycles
    #[arg(long, default_value_t = 300)]
    interval: u64,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 5)]
    timeout: u64,

    /// Run a single cycle and exit
    #[arg(long, default_value_t = false)]
    once: bool,

    /// Request a soft reset after a successful update
    #[arg(long, default_value_t = false)]
    soft_reset: bool,

    /// Request a hard reset after a successful update
    #[arg(long, default_value_t = false)]
    hard_reset: bool,

    /// Enable debug logging
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = if args.debug {
        EnvFilter::new("debug,ota=debug")
    } else {
        EnvFilter::new("info,ota=info")
    };
    fmt().with_env_filter(filter).init();

    let mut builder = UpdateEngineBuilder::new(args.repo_url.clone())
        .timeout(Duration::from_secs(args.timeout))
        .soft_reset(args.soft_reset)
        .hard_reset(args.hard_reset);
    if !args.files.is_empty() {
        builder = builder.filenames(args.files.clone());
    }
    let engine = builder.build(
        BlockingHttpClient::new(),
        DirFileSystem::new(args.root.clone()),
        NullDevice,
    );

    info!(repo = %engine.repo(), root = %args.root, "update agent started");
    loop {
        match engine.update() {
            Ok(UpdateOutcome::Updated { version }) => info!(%version, "device updated"),
            Ok(UpdateOutcome::UpToDate) => info!("device up to date"),
            Ok(UpdateOutcome::Aborted(reason)) => warn!(%reason, "cycle aborted"),
            Err(err) => warn!(%err, "cycle failed"),
        }
        if args.once {
            break;
        }
        thread::sleep(Duration::from_secs(args.interval));
    }
    Ok(())
}
