use super::EntrySink;
use std::io;
use std::path::{Path, PathBuf};

/// Sink that collects entries in memory.
///
/// Backs the CLI's list mode and keeps integration tests off the real
/// filesystem.
#[derive(Debug, Default)]
pub struct MemorySink {
    files: Vec<(PathBuf, Vec<u8>)>,
    directories: Vec<PathBuf>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Files written, in archive order.
    pub fn files(&self) -> &[(PathBuf, Vec<u8>)] {
        &self.files
    }

    /// Directories created, in request order (includes intermediates
    /// requested before file writes).
    pub fn directories(&self) -> &[PathBuf] {
        &self.directories
    }

    pub fn file(&self, path: impl AsRef<Path>) -> Option<&[u8]> {
        let path = path.as_ref();
        self.files
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, bytes)| bytes.as_slice())
    }
}

impl EntrySink for MemorySink {
    fn create_directory(&mut self, path: &Path, _create_intermediates: bool) -> io::Result<()> {
        if !self.directories.iter().any(|p| p == path) {
            self.directories.push(path.to_path_buf());
        }
        Ok(())
    }

    fn write_file(&mut self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        self.files.push((path.to_path_buf(), bytes.to_vec()));
        Ok(())
    }
}
