//! # streamzip
//!
//! A streaming ZIP extractor driven by local file headers.
//!
//! This library walks an in-memory archive buffer in a single forward
//! pass: each local file header is parsed in place, its payload is copied
//! (STORED) or decompressed (DEFLATE) with bounded working buffers, and
//! the result is written through a pluggable destination sink. The central
//! directory is never consulted, which makes the extractor robust against
//! archives whose trailing metadata is truncated or missing, and lets it
//! handle entries whose sizes are deferred to a trailing data descriptor.
//!
//! ## Features
//!
//! - Single forward pass, no central directory required
//! - STORED and DEFLATE compression methods
//! - Streaming entries (flag bit 3) with optional data-descriptor signature
//! - Partial extraction: per-entry failures are reported, not fatal
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use streamzip::extract_to_dir;
//!
//! fn main() -> anyhow::Result<()> {
//!     let archive = std::fs::read("archive.zip")?;
//!     let report = extract_to_dir(&archive, Path::new("out"));
//!
//!     println!("{} files extracted", report.files_written);
//!     for failure in &report.failures {
//!         eprintln!("failed at offset {}: {}", failure.offset, failure.error);
//!     }
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod io;
pub mod zip;

pub use cli::Cli;
pub use io::{EntrySink, LocalDirSink, MemorySink};
pub use zip::{
    ExtractionReport, ScanEnd, ZipError, ZipExtractor, extract_to_dir, inflate_raw,
};
