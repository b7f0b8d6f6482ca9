//! Synchronous append-only file sink
//!
//! Every chunk is written and flushed before the completion fires. With the
//! `file` feature an advisory exclusive lock is held around each write so
//! several processes can append to the same file without interleaving.

use crate::core::sink::{complete, Completion, Sink};
use crate::core::{LoggerError, Result};
#[cfg(feature = "file")]
use fs2::FileExt;
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

pub struct FileSink {
    path: PathBuf,
    file: Mutex<File>,
    locking: bool,
}

impl FileSink {
    /// Open `path` for appending, creating it and missing parent directories
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                LoggerError::io_operation("creating log directory", parent.display().to_string(), e)
            })?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| LoggerError::io_operation("opening log file", path.display().to_string(), e))?;

        Ok(Self {
            path,
            file: Mutex::new(file),
            locking: cfg!(feature = "file"),
        })
    }

    /// Disable the per-write advisory lock
    #[must_use]
    pub fn without_locking(mut self) -> Self {
        self.locking = false;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, data: &[u8]) -> Result<()> {
        let file = self.file.lock();
        let _guard = self.lock_file(&file)?;
        let mut writer: &File = &file;
        writer
            .write_all(data)
            .and_then(|_| writer.flush())
            .map_err(|e| LoggerError::file_sink(self.path.display().to_string(), e.to_string()))
    }

    #[cfg(feature = "file")]
    fn lock_file<'a>(&self, file: &'a File) -> Result<Option<FileLock<'a>>> {
        if !self.locking {
            return Ok(None);
        }
        file.lock_exclusive()
            .map_err(|_| LoggerError::file_lock(self.path.display().to_string()))?;
        Ok(Some(FileLock(file)))
    }

    #[cfg(not(feature = "file"))]
    fn lock_file<'a>(&self, _file: &'a File) -> Result<Option<()>> {
        Ok(None)
    }
}

/// Releases the advisory lock when dropped
#[cfg(feature = "file")]
struct FileLock<'a>(&'a File);

#[cfg(feature = "file")]
impl Drop for FileLock<'_> {
    fn drop(&mut self) {
        let _ = self.0.unlock();
    }
}

impl Sink for FileSink {
    fn write(&self, data: &[u8], done: Option<Completion>) {
        complete(done, self.append(data));
    }

    fn flush(&self) -> Result<()> {
        self.file.lock().sync_data()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl std::fmt::Debug for FileSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSink")
            .field("path", &self.path)
            .field("locking", &self.locking)
            .finish()
    }
}
