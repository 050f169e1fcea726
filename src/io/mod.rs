mod local;
mod memory;

pub use local::LocalDirSink;
pub use memory::MemorySink;

use std::io;
use std::path::Path;

/// Destination for extracted entries.
///
/// The scanner never touches the filesystem directly; it hands every
/// directory marker and decompressed file to an `EntrySink`. Paths are
/// relative, exactly as decoded from the archive (forward-slash separated).
pub trait EntrySink {
    /// Create a directory, optionally with its missing parents.
    fn create_directory(&mut self, path: &Path, create_intermediates: bool) -> io::Result<()>;

    /// Write a file's full contents. Parent directories have already been
    /// requested via `create_directory`.
    fn write_file(&mut self, path: &Path, bytes: &[u8]) -> io::Result<()>;
}
