//! Exclusively-created staging file with sync and atomic publish.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// A staging file this process created. Dropping it without calling
/// [`publish`](Self::publish) or [`discard`](Self::discard) leaves the file on disk.
#[derive(Debug)]
pub struct StagingFile {
    file: File,
    path: PathBuf,
}

impl StagingFile {
    /// Creates `path` for writing. Fails with [`io::ErrorKind::AlreadyExists`]
    /// instead of truncating when another attempt already owns the name.
    pub fn create_exclusive(path: &Path) -> io::Result<Self> {
        let file = File::options().write(true).create_new(true).open(path)?;
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    /// Writes the whole body and flushes it to stable storage.
    pub fn write_and_sync(&mut self, body: &[u8]) -> io::Result<()> {
        self.file.write_all(body)?;
        self.file.flush()?;
        self.file.sync_all()
    }

    /// Path of the staged file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Renames the staged file onto `destination`. Both paths must be on the
    /// same filesystem for the rename to be atomic.
    pub fn publish(self, destination: &Path) -> io::Result<()> {
        let StagingFile { file, path } = self;
        drop(file);
        std::fs::rename(&path, destination)
    }

    /// Removes the staged file, ignoring errors.
    pub fn discard(self) {
        let StagingFile { file, path } = self;
        drop(file);
        if let Err(e) = std::fs::remove_file(&path) {
            tracing::debug!(path = %path.display(), "could not remove staging file: {}", e);
        }
    }
}
