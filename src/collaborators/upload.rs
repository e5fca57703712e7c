//! Files chosen through the picker.
//!
//! A [`FileHandle`] is a shared reference to wherever the bytes live. Cloning it
//! (and therefore cloning a resource or a whole resource list) never copies the
//! payload; bytes are only read when something asks for them, e.g. a download.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Something a picked file's bytes can be read from on demand.
pub trait FileSource: Send + Sync + fmt::Debug {
    /// Original file name, used as the resource title and the download name.
    fn name(&self) -> &str;

    fn read(&self) -> io::Result<Vec<u8>>;
}

/// Bytes already in memory.
#[derive(Debug)]
pub struct MemoryFile {
    name: String,
    bytes: Vec<u8>,
}

impl FileSource for MemoryFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn read(&self) -> io::Result<Vec<u8>> {
        Ok(self.bytes.clone())
    }
}

/// A file on disk, read lazily.
#[derive(Debug)]
pub struct DiskFile {
    name: String,
    path: PathBuf,
}

impl FileSource for DiskFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn read(&self) -> io::Result<Vec<u8>> {
        std::fs::read(&self.path)
    }
}

#[derive(Clone)]
pub struct FileHandle(Arc<dyn FileSource>);

impl FileHandle {
    pub fn new(source: impl FileSource + 'static) -> Self {
        Self(Arc::new(source))
    }

    pub fn in_memory(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self::new(MemoryFile {
            name: name.into(),
            bytes,
        })
    }

    /// Turns a picker result pointing at disk into a handle. Only the name and path
    /// are captured here.
    pub fn from_path(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        if !std::fs::metadata(path)?.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("not a file: {}", path.display()),
            ));
        }
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"))?;
        Ok(Self::new(DiskFile {
            name,
            path: path.to_path_buf(),
        }))
    }

    pub fn name(&self) -> &str {
        self.0.name()
    }

    pub fn read(&self) -> io::Result<Vec<u8>> {
        self.0.read()
    }

    /// True when both handles refer to the same picked file.
    pub fn same_file(&self, other: &FileHandle) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for FileHandle {
    fn eq(&self, other: &Self) -> bool {
        self.same_file(other)
    }
}

impl fmt::Debug for FileHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FileHandle").field(&self.name()).finish()
    }
}
