//! Error types for ZIP scanning and extraction.

use thiserror::Error;

/// Errors that can occur while scanning or extracting an archive.
///
/// Two tiers exist: `TruncatedHeader` and `TruncatedPayload` are scan-fatal
/// (continuing would read past the trusted data), the rest are entry-local.
#[derive(Debug, Error)]
pub enum ZipError {
    /// Fewer bytes remain than a local file header requires.
    #[error("truncated local file header at offset {offset}")]
    TruncatedHeader { offset: usize },

    /// An entry's declared payload extends past the end of the buffer.
    #[error("entry payload at offset {offset} extends past end of archive")]
    TruncatedPayload { offset: usize },

    /// Compression method other than Store (0) or Deflate (8).
    #[error("unsupported compression method: {0}")]
    UnsupportedMethod(u16),

    /// A Store entry with deferred sizes cannot be bounded without guessing.
    #[error("streaming STORE entry cannot be safely bounded")]
    UnsupportedStreamingStore,

    /// Entry name is not valid UTF-8.
    #[error("entry name at offset {offset} is not valid UTF-8")]
    NameDecodeFailed { offset: usize },

    /// The DEFLATE stream is corrupt.
    #[error("decompression failed: {0}")]
    DecompressionFailed(String),

    /// Per-entry filesystem write failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for ZIP operations.
pub type Result<T> = std::result::Result<T, ZipError>;
