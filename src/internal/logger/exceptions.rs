// src/internal/logger/exceptions.rs

use std::any::Any;
use std::backtrace::Backtrace;

use super::Logger;

/// Target of entries produced for uncaught panics. Sinks without
/// `handle_exceptions` filter it out.
pub const EXCEPTION_TARGET: &str = "uncaught_exception";

/// Log uncaught panics through `logger`.
///
/// Returns false (and leaves the current hook alone) when no sink handles
/// exceptions. When the logger has `exit_on_error` set, the process exits
/// with status 1 once the panic is logged.
pub fn install_panic_hook(logger: &Logger) -> bool {
    let config = logger.config();
    if !config.file.handle_exceptions && !config.console.handle_exceptions {
        return false;
    }

    let logger = logger.clone();
    std::panic::set_hook(Box::new(move |info| {
        let message = panic_message(info.payload());
        let location = info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
            .unwrap_or_else(|| "unknown".to_string());
        let thread = std::thread::current()
            .name()
            .unwrap_or("<unnamed>")
            .to_string();
        let backtrace = Backtrace::capture();

        tracing::dispatcher::with_default(logger.dispatch(), || {
            tracing::error!(
                target: EXCEPTION_TARGET,
                exception = true,
                pid = std::process::id(),
                thread = %thread,
                location = %location,
                backtrace = %backtrace,
                "uncaught exception: {}",
                message
            );
        });

        if logger.exit_on_error() {
            std::process::exit(1);
        }
    }));
    true
}

/// Text carried by a panic payload.
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Box<dyn Any>".to_string()
    }
}
