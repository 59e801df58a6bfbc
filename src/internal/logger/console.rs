// src/internal/logger/console.rs

use std::io;
use tracing::Metadata;
use tracing_subscriber::fmt::writer::EitherWriter;
use tracing_subscriber::fmt::MakeWriter;

use super::Severity;

/// Console output: `out` (stdout by default), except for the levels routed
/// to `err` (stderr by default).
#[derive(Debug, Clone)]
pub struct ConsoleWriter<O = fn() -> io::Stdout, E = fn() -> io::Stderr> {
    stderr_levels: Vec<Severity>,
    out: O,
    err: E,
}

impl ConsoleWriter {
    pub fn new(stderr_levels: Vec<Severity>) -> Self {
        Self {
            stderr_levels,
            out: io::stdout,
            err: io::stderr,
        }
    }
}

impl Default for ConsoleWriter {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<O, E> ConsoleWriter<O, E> {
    /// Console routing over other writers, e.g. in-memory captures.
    pub fn with_writers(stderr_levels: Vec<Severity>, out: O, err: E) -> Self {
        Self {
            stderr_levels,
            out,
            err,
        }
    }

    pub fn uses_stderr(&self, severity: Severity) -> bool {
        self.stderr_levels.contains(&severity)
    }
}

impl<'a, O, E> MakeWriter<'a> for ConsoleWriter<O, E>
where
    O: MakeWriter<'a>,
    E: MakeWriter<'a>,
{
    type Writer = EitherWriter<O::Writer, E::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        EitherWriter::A(self.out.make_writer())
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        if self.uses_stderr(Severity::from(*meta.level())) {
            EitherWriter::B(self.err.make_writer_for(meta))
        } else {
            EitherWriter::A(self.out.make_writer_for(meta))
        }
    }
}
