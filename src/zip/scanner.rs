//! Forward-pass archive scanner.
//!
//! Walks the raw archive buffer entry by entry, driven entirely by local
//! file headers. There is no entry table: the offset of entry n+1 is only
//! known after entry n's payload consumption has been computed, which for
//! streaming entries requires running the DEFLATE decoder to its natural
//! end. The cursor never references a byte outside the buffer; any
//! computation that would need to fails closed and stops the scan.

use log::{info, warn};
use std::borrow::Cow;
use std::io;
use std::path::Path;

use crate::io::{EntrySink, LocalDirSink};

use super::error::ZipError;
use super::inflate::inflate_raw;
use super::structures::{
    CDFH_SIGNATURE, CompressionMethod, DATA_DESCRIPTOR_SIGNATURE, DATA_DESCRIPTOR_SIZE,
    DATA_DESCRIPTOR_SIZE_NO_SIG, LFH_SIGNATURE, LFH_SIZE, LocalFileHeader,
};

/// How the scan loop terminated.
///
/// The first three are clean ends: a well-formed archive finishes at its
/// central directory, and unknown trailing bytes are ignored rather than
/// treated as corruption.
#[derive(Debug)]
pub enum ScanEnd {
    /// Hit the central directory signature, the normal end of local entries.
    CentralDirectory,
    /// Fewer than 4 bytes remained.
    EndOfBuffer,
    /// A 4-byte value that is neither a local file header nor the central
    /// directory; the archive up to this point is considered fully handled.
    UnknownSignature,
    /// The scan stopped because continuing would be unsafe.
    Aborted(ZipError),
}

impl ScanEnd {
    pub fn is_clean(&self) -> bool {
        !matches!(self, ScanEnd::Aborted(_))
    }
}

/// A per-entry failure that did not corrupt the cursor.
#[derive(Debug)]
pub struct EntryFailure {
    /// Entry name, when it could be decoded.
    pub name: Option<String>,
    /// Offset of the entry's local file header.
    pub offset: usize,
    pub error: ZipError,
}

/// Outcome of one extraction pass.
#[derive(Debug)]
pub struct ExtractionReport {
    /// Files materialized through the sink.
    pub files_written: usize,
    /// Directory-marker entries realized (intermediates created for file
    /// paths are not counted).
    pub directories_created: usize,
    /// Entry-local failures, in archive order.
    pub failures: Vec<EntryFailure>,
    /// Why the scan stopped.
    pub end: ScanEnd,
}

impl ExtractionReport {
    /// True when every entry was extracted and the scan ended cleanly.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty() && self.end.is_clean()
    }
}

/// Streaming ZIP extractor.
///
/// Generic over the [`EntrySink`] so the destination can be a real
/// directory ([`LocalDirSink`]) or an in-memory collector.
pub struct ZipExtractor<S> {
    sink: S,
}

impl<S: EntrySink> ZipExtractor<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Extract every entry of `archive` into the sink.
    ///
    /// Scan-fatal conditions stop the loop but preserve everything
    /// extracted so far; the report says how the scan ended and which
    /// entries failed.
    pub fn extract(&mut self, archive: &[u8]) -> ExtractionReport {
        let mut report = ExtractionReport {
            files_written: 0,
            directories_created: 0,
            failures: Vec::new(),
            end: ScanEnd::EndOfBuffer,
        };
        let mut cursor = 0usize;

        loop {
            // The descriptor skip may push the cursor past the buffer end;
            // this check is what keeps every read below in bounds.
            if archive.len().saturating_sub(cursor) < 4 {
                report.end = ScanEnd::EndOfBuffer;
                break;
            }

            let signature = &archive[cursor..cursor + 4];
            if signature == CDFH_SIGNATURE {
                report.end = ScanEnd::CentralDirectory;
                break;
            }
            if signature != LFH_SIGNATURE {
                report.end = ScanEnd::UnknownSignature;
                break;
            }

            if cursor + LFH_SIZE > archive.len() {
                report.end = ScanEnd::Aborted(ZipError::TruncatedHeader { offset: cursor });
                break;
            }
            let header = match LocalFileHeader::from_bytes(&archive[cursor..cursor + LFH_SIZE], cursor)
            {
                Ok(header) => header,
                Err(e) => {
                    report.end = ScanEnd::Aborted(e);
                    break;
                }
            };

            let name_start = cursor + LFH_SIZE;
            let name_end = name_start + header.file_name_length as usize;
            if name_end > archive.len() {
                report.end = ScanEnd::Aborted(ZipError::TruncatedHeader { offset: cursor });
                break;
            }
            let name = match std::str::from_utf8(&archive[name_start..name_end]) {
                Ok(name) => name,
                Err(_) => {
                    // Policy: abandon the remaining scan. The byte lengths
                    // to skip this entry are known, but without a name the
                    // entry has no output path (see DESIGN.md).
                    warn!("entry name at offset {cursor} is not valid UTF-8, stopping");
                    report.failures.push(EntryFailure {
                        name: None,
                        offset: cursor,
                        error: ZipError::NameDecodeFailed { offset: cursor },
                    });
                    report.end =
                        ScanEnd::Aborted(ZipError::NameDecodeFailed { offset: cursor });
                    break;
                }
            };

            let payload_start = name_end + header.extra_field_length as usize;
            let streaming = header.has_data_descriptor();

            let (data, consumed): (Cow<[u8]>, usize) = match header.compression_method {
                CompressionMethod::Stored if streaming => {
                    // A streaming STORE payload can only be bounded by
                    // scanning for the next signature, which is ambiguous
                    // for arbitrary binary content. Stop rather than guess.
                    warn!("skipping {name}: streaming STORE entry cannot be bounded");
                    report.failures.push(EntryFailure {
                        name: Some(name.to_string()),
                        offset: cursor,
                        error: ZipError::UnsupportedStreamingStore,
                    });
                    report.end = ScanEnd::Aborted(ZipError::UnsupportedStreamingStore);
                    break;
                }
                CompressionMethod::Stored => {
                    let payload_end = payload_start + header.compressed_size as usize;
                    if payload_end > archive.len() {
                        report.end = ScanEnd::Aborted(ZipError::TruncatedPayload {
                            offset: payload_start,
                        });
                        break;
                    }
                    (
                        Cow::Borrowed(&archive[payload_start..payload_end]),
                        header.compressed_size as usize,
                    )
                }
                CompressionMethod::Deflate => {
                    let input = if streaming {
                        // Compressed size unknown up front; the decoder
                        // finds the end of the stream itself.
                        if payload_start > archive.len() {
                            report.end = ScanEnd::Aborted(ZipError::TruncatedPayload {
                                offset: payload_start,
                            });
                            break;
                        }
                        &archive[payload_start..]
                    } else {
                        let payload_end = payload_start + header.compressed_size as usize;
                        if payload_end > archive.len() {
                            report.end = ScanEnd::Aborted(ZipError::TruncatedPayload {
                                offset: payload_start,
                            });
                            break;
                        }
                        &archive[payload_start..payload_end]
                    };

                    let size_hint =
                        (header.uncompressed_size > 0).then_some(header.uncompressed_size as usize);

                    match inflate_raw(input, size_hint) {
                        Ok(inflated) => {
                            let mut consumed = inflated.bytes_consumed;
                            if streaming {
                                // The decoder had everything up to the end
                                // of the buffer; if the stream still never
                                // ended, the entry boundary and descriptor
                                // position are unknowable.
                                if !inflated.stream_ended {
                                    warn!("stream for {name} ended before its final block");
                                    report.failures.push(EntryFailure {
                                        name: Some(name.to_string()),
                                        offset: cursor,
                                        error: ZipError::TruncatedPayload {
                                            offset: payload_start,
                                        },
                                    });
                                    report.end = ScanEnd::Aborted(ZipError::TruncatedPayload {
                                        offset: payload_start,
                                    });
                                    break;
                                }
                                consumed += descriptor_len(archive, payload_start + consumed);
                            }
                            (Cow::Owned(inflated.data), consumed)
                        }
                        Err(err) => {
                            warn!("failed to decompress {name}: {err}");
                            let reason = match &err {
                                ZipError::DecompressionFailed(msg) => msg.clone(),
                                other => other.to_string(),
                            };
                            report.failures.push(EntryFailure {
                                name: Some(name.to_string()),
                                offset: cursor,
                                error: err,
                            });
                            if streaming {
                                // No declared size to skip by; the entry
                                // boundary is unknowable.
                                report.end = ScanEnd::Aborted(ZipError::DecompressionFailed(
                                    reason,
                                ));
                                break;
                            }
                            // Bounded entry: the declared size still tells
                            // us where the next header starts.
                            cursor = payload_start + header.compressed_size as usize;
                            continue;
                        }
                    }
                }
                CompressionMethod::Unknown(method) => {
                    warn!("skipping {name}: unsupported compression method {method}");
                    report.failures.push(EntryFailure {
                        name: Some(name.to_string()),
                        offset: cursor,
                        error: ZipError::UnsupportedMethod(method),
                    });
                    report.end = ScanEnd::Aborted(ZipError::UnsupportedMethod(method));
                    break;
                }
            };

            if name.ends_with('/') {
                // Directory marker: create it, write nothing. The payload
                // is typically empty and is not an error if it isn't.
                match self.sink.create_directory(Path::new(name), true) {
                    Ok(()) => {
                        info!("   creating: {name}");
                        report.directories_created += 1;
                    }
                    Err(e) => {
                        warn!("failed to create directory {name}: {e}");
                        report.failures.push(EntryFailure {
                            name: Some(name.to_string()),
                            offset: cursor,
                            error: ZipError::Io(e),
                        });
                    }
                }
            } else {
                match self.write_entry(name, &data) {
                    Ok(()) => {
                        info!(" extracting: {name}");
                        report.files_written += 1;
                    }
                    Err(e) => {
                        // Non-fatal: the cursor is already determined, so
                        // the next entry can still be extracted.
                        warn!("failed to write {name}: {e}");
                        report.failures.push(EntryFailure {
                            name: Some(name.to_string()),
                            offset: cursor,
                            error: ZipError::Io(e),
                        });
                    }
                }
            }

            cursor = payload_start + consumed;
        }

        report
    }

    fn write_entry(&mut self, name: &str, bytes: &[u8]) -> io::Result<()> {
        let path = Path::new(name);

        // Create intermediate directories for nested entry paths
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                self.sink.create_directory(parent, true)?;
            }
        }

        self.sink.write_file(path, bytes)
    }
}

/// Payload bytes to skip for a streaming entry's trailing data descriptor.
///
/// The descriptor signature is optional: when the 4 bytes after the
/// compressed stream match it, the descriptor is 16 bytes, otherwise 12
/// (CRC32 plus the two sizes). Too few bytes to probe means the archive
/// ends here and the loop-top check will stop the scan.
fn descriptor_len(archive: &[u8], descriptor_start: usize) -> usize {
    if descriptor_start + 4 > archive.len() {
        return 0;
    }
    if &archive[descriptor_start..descriptor_start + 4] == DATA_DESCRIPTOR_SIGNATURE {
        DATA_DESCRIPTOR_SIZE
    } else {
        DATA_DESCRIPTOR_SIZE_NO_SIG
    }
}

/// Extract an in-memory archive into a destination directory.
///
/// Convenience wrapper over [`ZipExtractor`] with a [`LocalDirSink`].
pub fn extract_to_dir(archive: &[u8], destination: &Path) -> ExtractionReport {
    ZipExtractor::new(LocalDirSink::new(destination)).extract(archive)
}
