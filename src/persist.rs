// src/persist.rs
//! Key-value persistence capability
//!
//! Stores never touch the filesystem directly; they read and write a whole
//! blob through [`Persistence`]. Each logical key (settings, preferences)
//! gets its own instance.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use tempfile::NamedTempFile;

use crate::error::Result;

pub trait Persistence {
    /// The stored blob, or `None` if nothing has been written yet
    fn read_all(&self) -> Result<Option<Vec<u8>>>;

    /// Replace the stored blob
    fn write_all(&mut self, bytes: &[u8]) -> Result<()>;
}

impl<P: Persistence + ?Sized> Persistence for Box<P> {
    fn read_all(&self) -> Result<Option<Vec<u8>>> {
        (**self).read_all()
    }

    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        (**self).write_all(bytes)
    }
}

/// One file per logical key
#[derive(Debug, Clone)]
pub struct FilePersistence {
    path: PathBuf,
}

impl FilePersistence {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Persistence for FilePersistence {
    fn read_all(&self) -> Result<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Atomic replace: temp file in the same directory, then rename
    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let mut tmp = NamedTempFile::new_in(&dir)?;
        tmp.write_all(bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

/// In-memory blob shared between clones.
///
/// Keep a clone to inspect exactly what a store wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryPersistence(Arc<Mutex<Option<Vec<u8>>>>);

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(bytes: impl Into<Vec<u8>>) -> Self {
        Self(Arc::new(Mutex::new(Some(bytes.into()))))
    }

    /// Current contents
    pub fn contents(&self) -> Option<Vec<u8>> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Persistence for MemoryPersistence {
    fn read_all(&self) -> Result<Option<Vec<u8>>> {
        Ok(self.contents())
    }

    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner) = Some(bytes.to_vec());
        Ok(())
    }
}
