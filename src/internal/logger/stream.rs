// src/internal/logger/stream.rs

use std::io;

use super::Logger;

/// Text before the last newline of `message`, or all of it when there is none.
pub fn strip_trailing_line(message: &str) -> &str {
    match message.rfind('\n') {
        Some(idx) => &message[..idx],
        None => message,
    }
}

/// Writable-stream adapter: every write becomes one `info` entry.
///
/// Meant as the sink of components that emit newline-terminated chunks,
/// such as HTTP access-log middleware.
#[derive(Debug, Clone)]
pub struct LoggerStream {
    logger: Logger,
}

impl LoggerStream {
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }

    /// Forward `message` up to its last newline at `info`.
    pub fn write(&self, message: &str) {
        self.forward(message);
    }

    fn forward(&self, message: &str) {
        self.logger.info(strip_trailing_line(message));
    }
}

impl io::Write for LoggerStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.forward(&String::from_utf8_lossy(buf));
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
