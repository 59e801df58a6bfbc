pub mod cli;
pub mod internal;

// Re-export commonly used types
pub use internal::config::{ConsoleSinkConfig, FileSinkConfig, LoggingConfig};
pub use internal::logger::{
    init_logger, Logger, LoggerBuilder, LoggerError, LoggerStream, Meta, Severity,
};
