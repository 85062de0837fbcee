//! # Core Runtime Module
//!
//! Foundational runtime infrastructure for the backup engine:
//! - Logging and tracing infrastructure
//! - Configuration management
//! - Event bus for progress/outcome reporting

pub mod config;
pub mod error;
pub mod events;
pub mod logging;

pub use config::{BackendChoice, SyncConfig, SyncConfigBuilder};
pub use error::{Error, Result};
pub use events::{EventBus, SyncEvent};
pub use logging::{init_logging, LogFormat, LogLevel, LoggingConfig};
