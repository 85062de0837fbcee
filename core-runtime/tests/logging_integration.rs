//! Integration tests for the logging system

use core_runtime::logging::{init_logging, LogFormat, LogLevel, LoggingConfig};

#[test]
fn test_logging_config_composition() {
    // Initialization is once-per-process, so most coverage targets the
    // config builder; actual init is exercised below in this binary only.
    let config = LoggingConfig::default()
        .with_format(LogFormat::Json)
        .with_level(LogLevel::Debug)
        .with_target(false);

    assert_eq!(config.format, LogFormat::Json);
    assert_eq!(config.level, LogLevel::Debug);
    assert!(!config.display_target);
}

#[test]
fn test_init_logging_is_single_shot() {
    let first = init_logging(LoggingConfig::default().with_format(LogFormat::Compact));
    assert!(first.is_ok());

    let second = init_logging(LoggingConfig::default());
    assert!(second.is_err());
}
