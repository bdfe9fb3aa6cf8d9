//! Local file capability.
//!
//! Media discovered in a library carries a handle to its file. The handle is
//! abstract so media can come from disk or from an in-memory buffer; only
//! the disk variant has a path, which some link actions require.

use std::fmt;
use std::fs::File;
use std::io::{self, Cursor, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A readable local file backing a media value.
pub trait LocalFile: fmt::Debug + Send + Sync {
    /// File name including extension, without directories.
    fn name(&self) -> &str;

    /// Open the file for reading.
    fn open(&self) -> io::Result<Box<dyn Read + Send>>;

    /// Filesystem path, when the file lives on disk.
    fn path(&self) -> Option<&Path> {
        None
    }
}

/// Shared handle to a local file.
pub type FileRef = Arc<dyn LocalFile>;

/// A file on disk.
#[derive(Debug, Clone)]
pub struct DiskFile {
    path: PathBuf,
    name: String,
}

impl DiskFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { path, name }
    }
}

impl LocalFile for DiskFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn open(&self) -> io::Result<Box<dyn Read + Send>> {
        Ok(Box::new(File::open(&self.path)?))
    }

    fn path(&self) -> Option<&Path> {
        Some(&self.path)
    }
}

/// A named byte buffer with no filesystem path.
///
/// Only the copy action can place it in the library.
#[derive(Clone)]
pub struct MemoryFile {
    name: String,
    bytes: Arc<[u8]>,
}

impl MemoryFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into().into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for MemoryFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryFile")
            .field("name", &self.name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl LocalFile for MemoryFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn open(&self) -> io::Result<Box<dyn Read + Send>> {
        Ok(Box::new(Cursor::new(Arc::clone(&self.bytes))))
    }
}
