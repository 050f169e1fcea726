//! Raw DEFLATE decompression.
//!
//! ZIP entry payloads are raw DEFLATE streams (RFC 1951) with no zlib or
//! gzip framing. This module drives [`flate2::Decompress`] in streaming
//! chunks and, crucially, reports how many input bytes the decoder actually
//! consumed. That count is what lets the scanner locate the end of an
//! entry's payload when the header's `compressed_size` is absent (deferred
//! to a data descriptor) or wrong.

use flate2::{Decompress, FlushDecompress, Status};

use super::error::{Result, ZipError};

/// Output is drained in chunks of this size.
const CHUNK_SIZE: usize = 64 * 1024;

/// Result of decompressing one entry payload.
#[derive(Debug)]
pub struct Inflated {
    /// The decompressed bytes.
    pub data: Vec<u8>,
    /// Input bytes consumed up to the end of the DEFLATE stream. May be
    /// less than the input slice length when the slice extends past the
    /// stream (trailing descriptor, next entry's header, ...).
    pub bytes_consumed: usize,
    /// Whether the decoder reached the natural end of the stream. False
    /// means it stalled with all input supplied; `bytes_consumed` then
    /// does not mark a true entry boundary.
    pub stream_ended: bool,
}

/// Decompress a raw DEFLATE stream from the start of `compressed`.
///
/// `size_hint` pre-sizes the output accumulator (the header's
/// `uncompressed_size` when the producer declared one) to avoid regrowth;
/// without it the accumulator is seeded to a small multiple of the chunk
/// size.
///
/// Reaching end-of-stream is the normal exit. A decoder stall with all
/// input already supplied returns what was accumulated with
/// `stream_ended` false; the caller decides whether that is acceptable
/// (it is for a bounded entry whose producer overstated
/// `compressed_size`, it is not for a streaming entry whose boundary was
/// never found). Anything else (corrupt stream, bad code tables) fails
/// with [`ZipError::DecompressionFailed`].
pub fn inflate_raw(compressed: &[u8], size_hint: Option<usize>) -> Result<Inflated> {
    // false = no zlib header, the raw-DEFLATE convention
    let mut decompressor = Decompress::new(false);
    let mut chunk = vec![0u8; CHUNK_SIZE];
    let capacity = size_hint.filter(|&n| n > 0).unwrap_or(CHUNK_SIZE * 4);
    let mut data: Vec<u8> = Vec::with_capacity(capacity);
    let mut stream_ended = false;

    loop {
        let consumed_before = decompressor.total_in() as usize;
        let produced_before = decompressor.total_out();

        let status = decompressor
            .decompress(
                &compressed[consumed_before..],
                &mut chunk,
                FlushDecompress::None,
            )
            .map_err(|e| ZipError::DecompressionFailed(e.to_string()))?;

        let produced = (decompressor.total_out() - produced_before) as usize;
        if produced > 0 {
            data.extend_from_slice(&chunk[..produced]);
        }

        match status {
            Status::StreamEnd => {
                stream_ended = true;
                break;
            }
            // Starved with all input present.
            Status::BufError => break,
            Status::Ok => {
                if produced == 0 && decompressor.total_in() as usize == consumed_before {
                    break;
                }
            }
        }
    }

    Ok(Inflated {
        data,
        bytes_consumed: decompressor.total_in() as usize,
        stream_ended,
    })
}
