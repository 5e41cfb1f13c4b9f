//! Minimal PNG container encoder and chunk reader
//!
//! Produces 8-bit RGBA (color type 6), non-interlaced files with exactly three
//! chunks: `IHDR`, one `IDAT` and `IEND`. The scanlines handed to [`encode`]
//! must already carry their filter-type byte, which is always `0` (None).

use crate::error::{IconError, Result};
use crate::raster::Raster;
use tracing::debug;

/// The fixed 8-byte PNG file signature.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1A, b'\n'];

/// Largest width or height a PNG header may declare.
pub const MAX_DIMENSION: u32 = (1 << 31) - 1;

pub const BIT_DEPTH: u8 = 8;
pub const COLOR_TYPE_RGBA: u8 = 6;

/// Default zlib effort, same as `zlib.compress(data, 9)`.
pub const DEFAULT_LEVEL: u8 = 9;

/// Highest effort miniz accepts.
pub const MAX_LEVEL: u8 = 10;

/// A PNG structural unit: type tag plus payload.
///
/// The length and CRC fields are derived on write and checked on read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub kind: [u8; 4],
    pub data: Vec<u8>,
}

impl Chunk {
    pub fn new(kind: &[u8; 4], data: Vec<u8>) -> Self {
        Self { kind: *kind, data }
    }

    /// The type tag as text, e.g. `"IHDR"`.
    pub fn kind_str(&self) -> &str {
        std::str::from_utf8(&self.kind).unwrap_or("????")
    }

    pub fn crc(&self) -> u32 {
        crc32(&self.kind, &self.data)
    }

    /// Serialize as `length || type || data || crc`, all integers big-endian.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&(self.data.len() as u32).to_be_bytes());
        out.extend_from_slice(&self.kind);
        out.extend_from_slice(&self.data);
        out.extend_from_slice(&self.crc().to_be_bytes());
    }
}

/// CRC-32 (polynomial 0xEDB88320) over a chunk's type tag followed by its data.
pub fn crc32(kind: &[u8], data: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(kind);
    hasher.update(data);
    hasher.finalize()
}

/// Check that both sides are non-zero and fit in a PNG header.
pub fn validate_dimensions(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(IconError::InvalidDimensions { width, height });
    }
    Ok(())
}

pub fn validate_level(level: u8) -> Result<()> {
    if level > MAX_LEVEL {
        return Err(IconError::InvalidLevel(level));
    }
    Ok(())
}

/// Expected filtered raster length: one filter byte plus 4 bytes per pixel, per row.
pub fn raster_len(width: u32, height: u32) -> usize {
    height as usize * (1 + 4 * width as usize)
}

fn ihdr(width: u32, height: u32) -> Chunk {
    let mut data = Vec::with_capacity(13);
    data.extend_from_slice(&width.to_be_bytes());
    data.extend_from_slice(&height.to_be_bytes());
    data.push(BIT_DEPTH);
    data.push(COLOR_TYPE_RGBA);
    data.push(0); // compression method
    data.push(0); // filter method
    data.push(0); // interlace method
    Chunk::new(b"IHDR", data)
}

/// Encode filtered RGBA scanlines into a complete PNG byte sequence.
///
/// `level` is the deflate effort on miniz's 0..=10 scale; it changes only the
/// output size, never the decoded pixels.
///
/// # Panics
///
/// Panics if `raster.len()` is not `height * (1 + 4 * width)`.
pub fn encode(width: u32, height: u32, raster: &[u8], level: u8) -> Result<Vec<u8>> {
    validate_dimensions(width, height)?;
    validate_level(level)?;
    assert_eq!(
        raster.len(),
        raster_len(width, height),
        "raster for a {width}x{height} image must be {} bytes",
        raster_len(width, height)
    );

    let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raster, level);
    debug!(
        event = "idat_compressed",
        width,
        height,
        raw = raster.len(),
        compressed = compressed.len(),
        level
    );

    let chunks = [
        ihdr(width, height),
        Chunk::new(b"IDAT", compressed),
        Chunk::new(b"IEND", Vec::new()),
    ];

    let mut out = Vec::with_capacity(
        PNG_SIGNATURE.len() + chunks.iter().map(|c| c.data.len() + 12).sum::<usize>(),
    );
    out.extend_from_slice(&PNG_SIGNATURE);
    for chunk in &chunks {
        chunk.write_to(&mut out);
    }
    Ok(out)
}

/// Encode a [`Raster`]; its dimensions and byte length are already consistent.
pub fn encode_raster(raster: &Raster, level: u8) -> Result<Vec<u8>> {
    encode(raster.width(), raster.height(), raster.as_bytes(), level)
}

fn read_be_u32(bytes: &[u8], at: usize) -> Option<u32> {
    let field = bytes.get(at..at + 4)?;
    Some(u32::from_be_bytes([field[0], field[1], field[2], field[3]]))
}

/// Split a PNG file into its chunks, checking the signature, every declared
/// length and every CRC. Reading stops after `IEND`.
pub fn read_chunks(bytes: &[u8]) -> Result<Vec<Chunk>> {
    if !bytes.starts_with(&PNG_SIGNATURE) {
        return Err(IconError::MalformedPng("missing PNG signature".to_string()));
    }

    let mut chunks = Vec::new();
    let mut pos = PNG_SIGNATURE.len();
    while pos < bytes.len() {
        let length = read_be_u32(bytes, pos)
            .ok_or_else(|| IconError::MalformedPng(format!("truncated chunk header at offset {pos}")))?
            as usize;
        let kind_at = pos + 4;
        let data_at = kind_at + 4;
        let crc_at = data_at + length;
        if crc_at + 4 > bytes.len() {
            return Err(IconError::MalformedPng(format!(
                "chunk at offset {pos} declares {length} bytes but the file ends first"
            )));
        }

        let mut kind = [0u8; 4];
        kind.copy_from_slice(&bytes[kind_at..data_at]);
        let chunk = Chunk::new(&kind, bytes[data_at..crc_at].to_vec());

        let stored = read_be_u32(bytes, crc_at).unwrap_or_default();
        let computed = chunk.crc();
        if stored != computed {
            return Err(IconError::MalformedPng(format!(
                "CRC mismatch in {} chunk: stored {stored:#010x}, computed {computed:#010x}",
                chunk.kind_str()
            )));
        }

        pos = crc_at + 4;
        let is_end = &chunk.kind == b"IEND";
        chunks.push(chunk);
        if is_end {
            break;
        }
    }

    if chunks.last().map(|c| &c.kind) != Some(b"IEND") {
        return Err(IconError::MalformedPng("missing IEND chunk".to_string()));
    }
    Ok(chunks)
}
