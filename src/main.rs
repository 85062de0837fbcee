//! Photovault CLI
//!
//! Backs up a remote photo library, album by album, into a local directory
//! tree or a remote object store. Progress is rendered from the engine's
//! event stream; the process exits non-zero on the first failure.

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::error;

use backend_local::LocalStore;
use backend_object::ObjectStore;
use bridge_desktop::http::ReqwestHttpClient;
use bridge_traits::backup::BackupStore;
use bridge_traits::http::HttpClient;
use core_runtime::events::{EventBus, RecvError, SyncEvent};
use core_runtime::{init_logging, BackendChoice, LogFormat, LoggingConfig, SyncConfig};
use core_sync::SyncOrchestrator;
use provider_flickr::{FlickrConnector, ResponseCache};

#[derive(Parser)]
#[command(name = "photovault", version, about = "Album-by-album backup of a remote photo library")]
struct Cli {
    /// Metadata API key
    #[arg(long, env = "PHOTOVAULT_API_KEY")]
    api_key: String,

    /// Remote user id (e.g. "12345678@N00")
    #[arg(long)]
    user_id: String,

    /// URL path alias used in duplicate-report links; defaults to the user id
    #[arg(long)]
    path_alias: Option<String>,

    /// Restrict the run to this album title; repeatable
    #[arg(long = "album")]
    albums: Vec<String>,

    /// Cache metadata responses under this directory
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormatArg::Compact)]
    log_format: LogFormatArg,

    #[command(subcommand)]
    backend: BackendCommand,
}

#[derive(Subcommand)]
enum BackendCommand {
    /// Back up into a directory on the local filesystem
    Local {
        /// Root directory of the backup tree
        #[arg(long)]
        root: PathBuf,
    },
    /// Back up into a remote object store
    ObjectStore {
        /// Store endpoint URL
        #[arg(long)]
        endpoint: String,
        /// Target bucket
        #[arg(long)]
        bucket: String,
        /// Key prefix inside the bucket
        #[arg(long, default_value = "")]
        prefix: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

fn build_config(cli: &Cli) -> anyhow::Result<SyncConfig> {
    let backend = match &cli.backend {
        BackendCommand::Local { root } => BackendChoice::Local { root: root.clone() },
        BackendCommand::ObjectStore {
            endpoint,
            bucket,
            prefix,
        } => BackendChoice::ObjectStore {
            endpoint: endpoint.clone(),
            bucket: bucket.clone(),
            prefix: prefix.clone(),
        },
    };

    let mut builder = SyncConfig::builder()
        .backend(backend)
        .api_key(&cli.api_key)
        .user_id(&cli.user_id);

    if let Some(alias) = &cli.path_alias {
        builder = builder.path_alias(alias);
    }
    if !cli.albums.is_empty() {
        let filter: HashSet<String> = cli.albums.iter().cloned().collect();
        builder = builder.album_filter(filter);
    }
    if let Some(dir) = &cli.cache_dir {
        builder = builder.cache_dir(dir);
    }

    builder.build().context("Invalid configuration")
}

/// Render engine events to the console until every sender is gone.
async fn present_events(mut rx: core_runtime::events::Receiver<SyncEvent>) {
    loop {
        match rx.recv().await {
            Ok(SyncEvent::AlbumStarted { title, item_count }) => {
                println!("Album '{}' ({} items)", title, item_count);
            }
            Ok(SyncEvent::AlbumSkipped { title, backed_up }) => {
                println!("Album '{}' already complete ({} objects)", title, backed_up);
            }
            Ok(SyncEvent::AlbumCompleted { .. }) => {}
            Ok(SyncEvent::DuplicateTitles {
                album,
                title,
                locators,
            }) => {
                println!("Duplicate title '{}' in album '{}':", title, album);
                for locator in locators {
                    println!("  {}", locator);
                }
            }
            Ok(SyncEvent::ItemLoading { key }) => println!("LOAD {}", key),
            Ok(SyncEvent::ItemSkipped { key }) => println!("SKIP {}", key),
            Ok(SyncEvent::ItemDone { key }) => println!("DONE {}", key),
            Ok(SyncEvent::RunCompleted {
                albums_processed,
                albums_skipped,
                items_written,
                items_skipped,
            }) => {
                println!(
                    "Done: {} albums processed, {} skipped; {} items written, {} already backed up",
                    albums_processed, albums_skipped, items_written, items_skipped
                );
            }
            Err(RecvError::Lagged(_)) => continue,
            Err(RecvError::Closed) => break,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(LoggingConfig::default().with_format(cli.log_format.into()))
        .context("Failed to initialize logging")?;

    let config = build_config(&cli)?;

    let http: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::new());

    let store: Arc<dyn BackupStore> = match &config.backend {
        BackendChoice::Local { root } => Arc::new(LocalStore::new(root)),
        BackendChoice::ObjectStore {
            endpoint,
            bucket,
            prefix,
        } => Arc::new(ObjectStore::new(
            Arc::clone(&http),
            endpoint,
            bucket,
            prefix,
        )),
    };

    let mut connector = FlickrConnector::new(Arc::clone(&http), &config.api_key, &config.user_id);
    if let Some(dir) = &config.cache_dir {
        connector = connector.with_cache(ResponseCache::new(dir));
    }

    let events = EventBus::default();
    let presenter = tokio::spawn(present_events(events.subscribe()));

    let orchestrator = SyncOrchestrator::new(
        Arc::new(connector),
        store,
        http,
        events.clone(),
        config.path_alias.clone(),
        config.album_filter.clone(),
    );

    let outcome = orchestrator.run().await;

    // Release every sender so the presenter sees the channel close
    drop(orchestrator);
    drop(events);
    let _ = presenter.await;

    match outcome {
        Ok(_) => Ok(()),
        Err(e) => {
            error!(error = %e, "Backup run failed");
            Err(e.into())
        }
    }
}
