// src/internal/logger/mod.rs

pub mod console;
pub mod exceptions;
pub mod level;
pub mod logger;
pub mod record;
pub mod rotating;
pub mod sink;
pub mod stream;

pub use console::ConsoleWriter;
pub use exceptions::{install_panic_hook, EXCEPTION_TARGET};
pub use level::{ParseSeverityError, Severity};
pub use logger::{init_logger, Logger, LoggerBuilder, Meta, LOG_TARGET};
pub use record::{JsonRecord, META_FIELD};
pub use rotating::{RotatingFileWriter, RotationPolicy};
pub use sink::SinkWriter;
pub use stream::{strip_trailing_line, LoggerStream};

// Note: The log_* macros are exported at the crate root via #[macro_export]
// and take a logger handle: `log_info!(logger, "GET {} {}", path, status)`.

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
    #[error("A global logger is already installed")]
    AlreadyInstalled,
}
