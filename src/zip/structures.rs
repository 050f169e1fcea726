use byteorder::{LittleEndian, ReadBytesExt};
use std::io::Cursor;

use super::error::{Result, ZipError};

/// ZIP compression methods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMethod {
    Stored,
    Deflate,
    Unknown(u16),
}

impl CompressionMethod {
    pub fn from_u16(value: u16) -> Self {
        match value {
            0 => CompressionMethod::Stored,
            8 => CompressionMethod::Deflate,
            _ => CompressionMethod::Unknown(value),
        }
    }

    pub fn as_u16(&self) -> u16 {
        match self {
            CompressionMethod::Stored => 0,
            CompressionMethod::Deflate => 8,
            CompressionMethod::Unknown(v) => *v,
        }
    }
}

/// Local File Header (LFH) - 30 bytes fixed part
pub const LFH_SIGNATURE: &[u8] = b"PK\x03\x04";
pub const LFH_SIZE: usize = 30;

/// Central Directory File Header (CDFH) - marks the end of local entries
pub const CDFH_SIGNATURE: &[u8] = b"PK\x01\x02";

/// Data Descriptor - trailing sizes for streaming-produced entries.
///
/// The signature is optional per the format: 16 bytes with it, 12 without.
pub const DATA_DESCRIPTOR_SIGNATURE: &[u8] = b"PK\x07\x08";
pub const DATA_DESCRIPTOR_SIZE: usize = 16;
pub const DATA_DESCRIPTOR_SIZE_NO_SIG: usize = 12;

/// Flag bit 3: sizes are deferred to a trailing data descriptor.
const FLAG_DATA_DESCRIPTOR: u16 = 1 << 3;

/// Parsed fixed part of a local file header.
///
/// The variable-length name and extra field follow the 30 fixed bytes and
/// are sliced out of the archive buffer by the scanner, not copied here.
#[derive(Debug, Clone)]
pub struct LocalFileHeader {
    pub flags: u16,
    pub compression_method: CompressionMethod,
    pub compressed_size: u32,
    pub uncompressed_size: u32,
    pub file_name_length: u16,
    pub extra_field_length: u16,
}

impl LocalFileHeader {
    /// Parse the 30-byte fixed header starting at `data[0]` (the signature).
    ///
    /// The caller is expected to have matched the signature already; this
    /// re-verifies it and fails with `TruncatedHeader` on short input.
    pub fn from_bytes(data: &[u8], archive_offset: usize) -> Result<Self> {
        if data.len() < LFH_SIZE || &data[0..4] != LFH_SIGNATURE {
            return Err(ZipError::TruncatedHeader {
                offset: archive_offset,
            });
        }

        let mut cursor = Cursor::new(&data[4..]);

        let _version_needed = cursor.read_u16::<LittleEndian>()?;
        let flags = cursor.read_u16::<LittleEndian>()?;
        let compression_method = cursor.read_u16::<LittleEndian>()?;
        let _last_mod_time = cursor.read_u16::<LittleEndian>()?;
        let _last_mod_date = cursor.read_u16::<LittleEndian>()?;
        let _crc32 = cursor.read_u32::<LittleEndian>()?;
        let compressed_size = cursor.read_u32::<LittleEndian>()?;
        let uncompressed_size = cursor.read_u32::<LittleEndian>()?;
        let file_name_length = cursor.read_u16::<LittleEndian>()?;
        let extra_field_length = cursor.read_u16::<LittleEndian>()?;

        Ok(Self {
            flags,
            compression_method: CompressionMethod::from_u16(compression_method),
            compressed_size,
            uncompressed_size,
            file_name_length,
            extra_field_length,
        })
    }

    /// Whether bit 3 is set: the true sizes live in a trailing data
    /// descriptor and `compressed_size` here may legitimately be zero.
    pub fn has_data_descriptor(&self) -> bool {
        self.flags & FLAG_DATA_DESCRIPTOR != 0
    }

    /// Offset of the payload relative to the start of this header.
    pub fn payload_offset(&self) -> usize {
        LFH_SIZE + self.file_name_length as usize + self.extra_field_length as usize
    }
}
