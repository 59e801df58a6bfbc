// src/internal/logger/rotating.rs

use file_rotate::{compression::Compression, suffix::AppendCount, ContentLimit, FileRotate};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing_subscriber::fmt::MakeWriter;

/// When the active file is rotated and how many generations survive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPolicy {
    pub max_size: u64,
    pub max_files: usize,
}

/// Append-only log file that rotates by size.
///
/// Rotated generations are named `<file>.1` (newest) through
/// `<file>.<max_files>` (oldest). A record is never split across files:
/// rotation happens before a record that would push the active file past
/// `max_size`. Clones share the same file and lock.
#[derive(Clone)]
pub struct RotatingFileWriter {
    state: Arc<Mutex<ActiveFile>>,
}

struct ActiveFile {
    path: PathBuf,
    policy: RotationPolicy,
    rotator: FileRotate<AppendCount>,
    size: u64,
}

impl RotatingFileWriter {
    /// Open (or create) the active file, creating missing parent directories.
    pub fn open(path: impl AsRef<Path>, policy: RotationPolicy) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // FileRotate swallows open errors, so surface them here.
        let size = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)?
            .metadata()?
            .len();

        Ok(Self {
            state: Arc::new(Mutex::new(ActiveFile {
                rotator: new_rotator(&path, policy),
                path,
                policy,
                size,
            })),
        })
    }

    pub fn path(&self) -> PathBuf {
        self.lock().path.clone()
    }

    /// Bytes currently in the active file, as tracked by the writer.
    pub fn current_size(&self) -> u64 {
        self.lock().size
    }

    /// Path of rotated generation `n` (1 is the newest).
    pub fn generation_path(path: &Path, n: usize) -> PathBuf {
        let mut name = path.as_os_str().to_os_string();
        name.push(format!(".{}", n));
        PathBuf::from(name)
    }

    fn lock(&self) -> MutexGuard<'_, ActiveFile> {
        // A panic while holding the lock must not disable the sink.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ActiveFile {
    fn write_record(&mut self, buf: &[u8]) -> io::Result<usize> {
        let len = buf.len() as u64;
        if self.size > 0 && self.size + len > self.policy.max_size {
            if let Err(e) = self.rotator.rotate() {
                // Start over from whatever is on disk; the size check
                // decides again on the next record.
                self.reopen();
                return Err(e);
            }
            self.size = 0;
        }

        self.rotator.write_all(buf)?;
        // records must be on disk before the next size check or rotation
        self.rotator.flush()?;
        self.size += len;
        Ok(buf.len())
    }

    fn reopen(&mut self) {
        self.rotator = new_rotator(&self.path, self.policy);
        self.size = fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0);
    }
}

// Rotation is driven by `write_record`, so the rotator itself has no limit.
fn new_rotator(path: &Path, policy: RotationPolicy) -> FileRotate<AppendCount> {
    FileRotate::new(
        path,
        AppendCount::new(policy.max_files),
        ContentLimit::None,
        Compression::None,
        None,
    )
}

impl io::Write for RotatingFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.lock().write_record(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.lock().rotator.flush()
    }
}

impl<'a> MakeWriter<'a> for RotatingFileWriter {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
