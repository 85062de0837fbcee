//! # Sync Engine
//!
//! Core synchronization engine for mirroring a remote photo library into a
//! backup store.
//!
//! ## Components
//!
//! - **Naming Resolver** (`naming`): derives the canonical backup key of an
//!   item (`"{album}/{stem}.{ext}"`) including the video format correction
//! - **Duplicate Detector** (`duplicates`): reports titles shared by several
//!   items of one album, with page URLs for manual cleanup
//! - **Album Reconciler** (`reconciler`): count-based short-circuit plus the
//!   sequential per-item sync (probe, fetch, write)
//! - **Sync Orchestrator** (`orchestrator`): drives the run across albums,
//!   applies the optional title filter, aggregates counters
//!
//! The engine is backend-agnostic: it sees the backup only through
//! `bridge_traits::backup::BackupStore` and the remote library only through
//! `bridge_traits::media::MediaSource`.

pub mod duplicates;
pub mod error;
pub mod naming;
pub mod orchestrator;
pub mod reconciler;

pub use duplicates::{find_duplicates, DuplicateGroup};
pub use error::{Result, SyncError};
pub use naming::{object_key, ObjectKey};
pub use orchestrator::{RunStats, SyncOrchestrator};
pub use reconciler::{plan, AlbumPlan, AlbumReconciler, AlbumReport};
