//! Main entry point for the streamzip CLI application.
//!
//! Reads the whole archive into memory, then either lists its entries or
//! extracts them into the destination directory.

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::fs;
use std::path::Path;

use streamzip::{Cli, MemorySink, ZipExtractor, extract_to_dir};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.is_quiet() { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let archive =
        fs::read(&cli.file).with_context(|| format!("failed to read {}", cli.file))?;

    if cli.list {
        return list_entries(&archive);
    }

    let destination = cli.extract_dir.as_deref().unwrap_or(".");
    let report = extract_to_dir(&archive, Path::new(destination));

    if !cli.is_quiet() {
        println!(
            "{} file(s), {} director(ies) extracted",
            report.files_written, report.directories_created
        );
    }

    if !report.is_complete() {
        for failure in &report.failures {
            eprintln!(
                "  failed: {} at offset {}: {}",
                failure.name.as_deref().unwrap_or("<unnamed>"),
                failure.offset,
                failure.error
            );
        }
        bail!(
            "extraction incomplete: {} entr(ies) failed",
            report.failures.len()
        );
    }

    Ok(())
}

/// List entries by running the scanner against an in-memory sink.
///
/// Without a central directory pass, entry names are only discoverable by
/// walking (and decompressing) the local entries themselves.
fn list_entries(archive: &[u8]) -> Result<()> {
    let mut extractor = ZipExtractor::new(MemorySink::new());
    let report = extractor.extract(archive);
    let sink = extractor.into_sink();

    for dir in sink.directories() {
        let shown = dir.display().to_string();
        let shown = shown.trim_end_matches('/');
        println!("{shown}/");
    }
    for (path, _) in sink.files() {
        println!("{}", path.display());
    }

    if !report.is_complete() {
        bail!("archive only partially scanned: {:?}", report.end);
    }

    Ok(())
}
