// src/internal/logger/sink.rs

use std::io::{self, Write};
use tracing::Metadata;
use tracing_subscriber::fmt::MakeWriter;

/// Wraps a sink's writer so that its failures stay inside the sink.
///
/// A failed write drops the record for this sink only and is reported on
/// stderr. The report itself ignores errors, so a closed stderr cannot
/// turn a logging call into a panic.
#[derive(Debug, Clone)]
pub struct SinkWriter<W> {
    sink: &'static str,
    inner: W,
}

impl<W> SinkWriter<W> {
    pub fn new(sink: &'static str, inner: W) -> Self {
        Self { sink, inner }
    }
}

pub struct SinkHandle<W> {
    sink: &'static str,
    inner: W,
}

impl<W: Write> Write for SinkHandle<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.inner.write(buf) {
            Ok(n) => Ok(n),
            Err(e) => {
                report(self.sink, &e);
                Ok(buf.len())
            }
        }
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        if let Err(e) = self.inner.write_all(buf) {
            report(self.sink, &e);
        }
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        if let Err(e) = self.inner.flush() {
            report(self.sink, &e);
        }
        Ok(())
    }
}

impl<'a, W: MakeWriter<'a>> MakeWriter<'a> for SinkWriter<W> {
    type Writer = SinkHandle<W::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        SinkHandle {
            sink: self.sink,
            inner: self.inner.make_writer(),
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        SinkHandle {
            sink: self.sink,
            inner: self.inner.make_writer_for(meta),
        }
    }
}

fn report(sink: &str, err: &io::Error) {
    let _ = writeln!(io::stderr().lock(), "app-logger: {} sink dropped a record: {}", sink, err);
}
