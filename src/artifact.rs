// Data-transfer artifacts: files the engine reads point data from

use std::collections::HashMap;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// File name prefix for artifacts in the system temp directory
pub const ARTIFACT_PREFIX: &str = "tmp-gnuplot-";

/// Source of fresh, uniquely named data files.
///
/// Returned paths must be resolvable by the engine process. Artifacts live
/// as long as the store.
pub trait ArtifactStore {
    fn create_artifact(&mut self) -> io::Result<(PathBuf, Box<dyn Write + '_>)>;
}

/// Artifacts in the system temp directory, deleted when the store is dropped
#[derive(Debug, Default)]
pub struct TempFileStore {
    files: Vec<NamedTempFile>,
}

impl TempFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl ArtifactStore for TempFileStore {
    fn create_artifact(&mut self) -> io::Result<(PathBuf, Box<dyn Write + '_>)> {
        let file = tempfile::Builder::new()
            .prefix(ARTIFACT_PREFIX)
            .tempfile()?;
        let path = file.path().to_path_buf();
        self.files.push(file);
        let handle = self
            .files
            .last_mut()
            .map(NamedTempFile::as_file_mut)
            .ok_or_else(|| io::Error::other("temp file vanished"))?;
        Ok((path, Box::new(handle)))
    }
}

/// In-memory artifacts, addressed by synthetic paths
#[derive(Debug, Default)]
pub struct MemoryStore {
    files: HashMap<PathBuf, Vec<u8>>,
    next_id: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Contents written to `path`, if it is one of ours and valid UTF-8
    pub fn contents(&self, path: &Path) -> Option<&str> {
        self.files
            .get(path)
            .and_then(|bytes| std::str::from_utf8(bytes).ok())
    }
}

impl ArtifactStore for MemoryStore {
    fn create_artifact(&mut self) -> io::Result<(PathBuf, Box<dyn Write + '_>)> {
        let path = PathBuf::from(format!("{}{}", ARTIFACT_PREFIX, self.next_id));
        self.next_id += 1;
        let buf = self.files.entry(path.clone()).or_default();
        Ok((path, Box::new(buf)))
    }
}
