//! ZIP archive scanning and extraction.
//!
//! This module extracts archives in a single forward pass over the raw
//! bytes, driven by local file headers rather than the central directory.
//!
//! ## Architecture
//!
//! The module is organized into four components:
//!
//! - [`structures`]: ZIP format elements (local file header, signatures,
//!   compression methods)
//! - [`inflate`]: the raw DEFLATE engine, which also reports how many
//!   input bytes it consumed
//! - [`scanner`]: the entry loop that owns the byte cursor and drives
//!   extraction
//! - [`error`]: the failure taxonomy
//!
//! ## Scanning Strategy
//!
//! A ZIP file is a sequence of local file headers, each followed by its
//! payload, terminated by the central directory. The scanner reads each
//! header, materializes the payload, and advances the cursor by exactly
//! the number of bytes the entry occupied. For entries produced by
//! streaming encoders (flag bit 3), the compressed size is not in the
//! header at all: the DEFLATE decoder's own input counter determines the
//! entry boundary, and a trailing data descriptor (whose signature is
//! optional) is skipped afterwards.
//!
//! The central directory and anything after it are deliberately ignored.
//!
//! ## Supported Features
//!
//! - STORED (no compression) method
//! - DEFLATE compression method
//! - Streaming entries with deferred sizes (data descriptor), Deflate only
//! - Directory markers (names ending in `/`)
//!
//! ## Limitations
//!
//! - No encryption support
//! - No multi-disk archive or ZIP64 support
//! - No CRC32 verification of decompressed output
//! - Streaming STORED entries cannot be bounded and stop the scan

mod error;
mod inflate;
mod scanner;
mod structures;

pub use error::{Result, ZipError};
pub use inflate::{Inflated, inflate_raw};
pub use scanner::{EntryFailure, ExtractionReport, ScanEnd, ZipExtractor, extract_to_dir};
pub use structures::*;
