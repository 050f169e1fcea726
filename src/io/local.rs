use super::EntrySink;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Sink that writes entries under a destination directory.
pub struct LocalDirSink {
    root: PathBuf,
}

impl LocalDirSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl EntrySink for LocalDirSink {
    fn create_directory(&mut self, path: &Path, create_intermediates: bool) -> io::Result<()> {
        let target = self.root.join(path);
        if create_intermediates {
            fs::create_dir_all(&target)
        } else {
            match fs::create_dir(&target) {
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(()),
                other => other,
            }
        }
    }

    fn write_file(&mut self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        let target = self.root.join(path);
        if let Some(parent) = target.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // The handle is scoped to this call so it closes on every exit
        // path, including write errors.
        let mut file = fs::File::create(target)?;
        file.write_all(bytes)
    }
}
