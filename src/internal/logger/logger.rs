// src/internal/logger/logger.rs

use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{Dispatch, Metadata};
use tracing_subscriber::{
    filter::{filter_fn, FilterFn},
    fmt::{self, time::ChronoUtc, writer::BoxMakeWriter, MakeWriter},
    layer::SubscriberExt,
    Layer, Registry,
};

use super::console::ConsoleWriter;
use super::exceptions::{install_panic_hook, EXCEPTION_TARGET};
use super::record::JsonRecord;
use super::rotating::{RotatingFileWriter, RotationPolicy};
use super::sink::SinkWriter;
use super::stream::LoggerStream;
use super::{LoggerError, Severity};
use crate::internal::config::LoggingConfig;

/// Target attached to every entry written through a [`Logger`].
pub const LOG_TARGET: &str = "app";

/// Structured metadata attached to an entry.
pub type Meta = Map<String, Value>;

type SinkLayer = Box<dyn Layer<Registry> + Send + Sync>;

// `tracing` needs the level at compile time, so fan out over every severity.
macro_rules! emit {
    ($severity:expr, $($fields:tt)+) => {
        match $severity {
            Severity::Error => tracing::event!(target: LOG_TARGET, tracing::Level::ERROR, $($fields)+),
            Severity::Warn => tracing::event!(target: LOG_TARGET, tracing::Level::WARN, $($fields)+),
            Severity::Info => tracing::event!(target: LOG_TARGET, tracing::Level::INFO, $($fields)+),
            Severity::Debug => tracing::event!(target: LOG_TARGET, tracing::Level::DEBUG, $($fields)+),
            Severity::Trace => tracing::event!(target: LOG_TARGET, tracing::Level::TRACE, $($fields)+),
        }
    };
}

/// Handle to the process logger.
///
/// Clones share the same sinks. Logging calls never fail and never panic: a
/// sink that cannot write drops the entry while the other sink carries on.
#[derive(Clone, Debug)]
pub struct Logger {
    inner: Arc<Inner>,
    default_meta: Arc<Meta>,
}

#[derive(Debug)]
struct Inner {
    dispatch: Dispatch,
    config: LoggingConfig,
}

impl Logger {
    /// Build a logger with the configured file and console sinks.
    pub fn new(config: LoggingConfig) -> Result<Self, LoggerError> {
        LoggerBuilder::new(config).build()
    }

    pub fn builder(config: LoggingConfig) -> LoggerBuilder {
        LoggerBuilder::new(config)
    }

    pub fn log(&self, severity: Severity, message: impl AsRef<str>) {
        self.log_with(severity, message, &Meta::new());
    }

    /// Log with structured metadata, merged over the logger's default metadata.
    pub fn log_with(&self, severity: Severity, message: impl AsRef<str>, meta: &Meta) {
        let message = message.as_ref();
        let meta = self.merged_meta(meta);

        tracing::dispatcher::with_default(&self.inner.dispatch, || match meta {
            Some(meta) => emit!(severity, meta = %meta, "{}", message),
            None => emit!(severity, "{}", message),
        });
    }

    pub fn error(&self, message: impl AsRef<str>) {
        self.log(Severity::Error, message);
    }

    pub fn warn(&self, message: impl AsRef<str>) {
        self.log(Severity::Warn, message);
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.log(Severity::Info, message);
    }

    pub fn debug(&self, message: impl AsRef<str>) {
        self.log(Severity::Debug, message);
    }

    pub fn trace(&self, message: impl AsRef<str>) {
        self.log(Severity::Trace, message);
    }

    /// A logger writing to the same sinks whose entries always carry `meta`.
    pub fn child(&self, meta: Meta) -> Logger {
        let mut merged = (*self.default_meta).clone();
        merged.extend(meta);
        Logger {
            inner: Arc::clone(&self.inner),
            default_meta: Arc::new(merged),
        }
    }

    /// Whether at least one sink accepts entries at `severity`.
    pub fn is_enabled(&self, severity: Severity) -> bool {
        severity.is_at_least(self.inner.config.most_verbose_level())
    }

    /// Adapter forwarding stream-style writes at `info`.
    pub fn stream(&self) -> LoggerStream {
        LoggerStream::new(self.clone())
    }

    pub fn config(&self) -> &LoggingConfig {
        &self.inner.config
    }

    pub fn exit_on_error(&self) -> bool {
        self.inner.config.exit_on_error
    }

    pub fn dispatch(&self) -> &Dispatch {
        &self.inner.dispatch
    }

    /// Route `tracing` events from anywhere in the process to this logger.
    pub fn set_global_default(&self) -> Result<(), LoggerError> {
        tracing::dispatcher::set_global_default(self.inner.dispatch.clone())
            .map_err(|_| LoggerError::AlreadyInstalled)
    }

    fn merged_meta(&self, meta: &Meta) -> Option<String> {
        if self.default_meta.is_empty() && meta.is_empty() {
            return None;
        }
        let mut merged = (*self.default_meta).clone();
        merged.extend(meta.iter().map(|(k, v)| (k.clone(), v.clone())));
        Some(Value::Object(merged).to_string())
    }
}

/// Builds a [`Logger`], optionally replacing the sinks' writers.
pub struct LoggerBuilder {
    config: LoggingConfig,
    file_writer: Option<BoxMakeWriter>,
    console_writer: Option<BoxMakeWriter>,
}

impl LoggerBuilder {
    pub fn new(config: LoggingConfig) -> Self {
        Self {
            config,
            file_writer: None,
            console_writer: None,
        }
    }

    /// Replace the rotating file with another writer.
    pub fn file_writer<W>(mut self, writer: W) -> Self
    where
        W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
    {
        self.file_writer = Some(BoxMakeWriter::new(writer));
        self
    }

    /// Replace stdout/stderr with another writer.
    pub fn console_writer<W>(mut self, writer: W) -> Self
    where
        W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
    {
        self.console_writer = Some(BoxMakeWriter::new(writer));
        self
    }

    pub fn build(self) -> Result<Logger, LoggerError> {
        let config = self.config;
        config.validate()?;

        let file_writer = match self.file_writer {
            Some(writer) => writer,
            None => BoxMakeWriter::new(RotatingFileWriter::open(
                &config.file.filename,
                RotationPolicy {
                    max_size: config.file.max_size,
                    max_files: config.file.max_files,
                },
            )?),
        };
        let console_writer = match self.console_writer {
            Some(writer) => writer,
            None => BoxMakeWriter::new(ConsoleWriter::new(config.console.stderr_levels.clone())),
        };

        let layers: Vec<SinkLayer> = vec![
            sink_layer(
                BoxMakeWriter::new(SinkWriter::new("file", file_writer)),
                config.file.json,
                config.file.colorize,
                sink_filter(config.file.level, config.file.handle_exceptions),
            ),
            sink_layer(
                BoxMakeWriter::new(SinkWriter::new("console", console_writer)),
                config.console.json,
                config.console.colorize,
                sink_filter(config.console.level, config.console.handle_exceptions),
            ),
        ];
        let subscriber = Registry::default().with(layers);

        Ok(Logger {
            inner: Arc::new(Inner {
                dispatch: Dispatch::new(subscriber),
                config,
            }),
            default_meta: Arc::new(Meta::new()),
        })
    }
}

fn sink_layer<F>(writer: BoxMakeWriter, json: bool, colorize: bool, filter: F) -> SinkLayer
where
    F: tracing_subscriber::layer::Filter<Registry> + Send + Sync + 'static,
{
    let layer = fmt::layer()
        .with_writer(writer)
        .with_timer(ChronoUtc::rfc_3339())
        .with_ansi(colorize && !json)
        .with_level(true)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .log_internal_errors(false);

    if json {
        layer
            .event_format(JsonRecord::new())
            .with_filter(filter)
            .boxed()
    } else {
        layer.with_filter(filter).boxed()
    }
}

/// Minimum severity per sink; panic entries pass only when the sink
/// handles exceptions.
fn sink_filter(
    min: Severity,
    handle_exceptions: bool,
) -> FilterFn<impl Fn(&Metadata<'_>) -> bool + Send + Sync + 'static> {
    filter_fn(move |meta| {
        if meta.target() == EXCEPTION_TARGET {
            return handle_exceptions;
        }
        Severity::from(*meta.level()).is_at_least(min)
    })
}

/// Initialize the process logger: build it from `cfg`, install it as the
/// global `tracing` default and capture panics.
///
/// Fails if a global `tracing` dispatcher is already installed, before the
/// log file is touched. The returned `anyhow::Error` wraps a [`LoggerError`];
/// use `err.downcast_ref::<LoggerError>()` to match on
/// [`LoggerError::AlreadyInstalled`].
pub fn init_logger(cfg: &LoggingConfig) -> anyhow::Result<Logger> {
    if tracing::dispatcher::has_been_set() {
        return Err(LoggerError::AlreadyInstalled.into());
    }
    let logger = Logger::new(cfg.clone())?;
    logger.set_global_default()?;
    install_panic_hook(&logger);
    Ok(logger)
}

// Convenience logging macros taking a logger handle
#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)*) => {
        $logger.debug(format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)*) => {
        $logger.info(format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($arg:tt)*) => {
        $logger.warn(format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($arg:tt)*) => {
        $logger.error(format!($($arg)*))
    };
}
