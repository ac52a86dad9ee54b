//! Append-only line writer with numbered size-based rotation.
//!
//! When the active file would grow past its size limit, it becomes `<file>.1`,
//! older backups shift up by one (`.1` → `.2`, ...), and anything past the
//! retention count is deleted.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Default size limit for the active file (5 MiB).
pub const DEFAULT_MAX_BYTES: u64 = 5 * 1024 * 1024;

/// Default number of rotated files kept.
pub const DEFAULT_MAX_BACKUPS: usize = 3;

struct Active {
    file: File,
    len: u64,
}

/// Thread-safe rotating line writer.
///
/// The file is opened lazily on the first write.
pub struct RotatingFile {
    path: PathBuf,
    max_bytes: u64,
    max_backups: usize,
    active: Mutex<Option<Active>>,
}

impl RotatingFile {
    /// Creates a writer with the default limits.
    pub const fn new(path: PathBuf) -> Self {
        Self::with_limits(path, DEFAULT_MAX_BYTES, DEFAULT_MAX_BACKUPS)
    }

    /// Creates a writer with explicit limits.
    pub const fn with_limits(path: PathBuf, max_bytes: u64, max_backups: usize) -> Self {
        Self {
            path,
            max_bytes,
            max_backups,
            active: Mutex::new(None),
        }
    }

    /// Path of the active file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `line` plus a newline, rotating first if the limit would be
    /// exceeded.
    ///
    /// A single line longer than the limit is still written, to a fresh file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened, rotated or written, or if
    /// the internal lock is poisoned.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut guard = self
            .active
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("writer lock poisoned: {e}")))?;

        let incoming = line.len() as u64 + 1;
        if guard.is_none() {
            *guard = Some(self.open()?);
        }

        let full = guard
            .as_ref()
            .is_some_and(|active| active.len > 0 && active.len + incoming > self.max_bytes);
        if full {
            *guard = None;
            self.rotate()?;
            *guard = Some(self.open()?);
        }

        let active = guard
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "span file not open"))?;
        writeln!(active.file, "{line}")?;
        active.file.flush()?;
        active.len += incoming;
        Ok(())
    }

    fn open(&self) -> io::Result<Active> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let len = file.metadata()?.len();
        Ok(Active { file, len })
    }

    fn rotate(&self) -> io::Result<()> {
        if self.max_backups == 0 {
            return match fs::remove_file(&self.path) {
                Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
                _ => Ok(()),
            };
        }

        let _ = fs::remove_file(self.backup_path(self.max_backups));
        for index in (1..self.max_backups).rev() {
            let from = self.backup_path(index);
            if from.exists() {
                fs::rename(&from, self.backup_path(index + 1))?;
            }
        }
        if self.path.exists() {
            fs::rename(&self.path, self.backup_path(1))?;
        }
        Ok(())
    }

    fn backup_path(&self, index: usize) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(format!(".{index}"));
        PathBuf::from(name)
    }
}

impl std::fmt::Debug for RotatingFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFile")
            .field("path", &self.path)
            .field("max_bytes", &self.max_bytes)
            .field("max_backups", &self.max_backups)
            .finish_non_exhaustive()
    }
}
