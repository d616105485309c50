//! Payload framing: `[length: u32 BE][tag: 3 bytes][body]`, serialized MSB first.
//!
//! The frame carries no magic number, terminator, or checksum. The length
//! field alone decides where the body ends, so a carrier that never held a
//! payload still "decodes" into whatever its low bits spell.

use crate::config::{BITS_PER_BYTE, HEADER_BITS, HEADER_BYTES, LENGTH_FIELD_BYTES, TAG_BYTES};
use crate::error::{Error, Result};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Fixed-width identifier of the hidden payload's native format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tag([u8; TAG_BYTES]);

impl Tag {
    /// Create a tag from raw bytes as read from a carrier.
    ///
    /// No validation is done: extracted tags may be arbitrary bytes.
    pub fn from_bytes(bytes: [u8; TAG_BYTES]) -> Self {
        Self(bytes)
    }

    /// Derive a tag from a file's extension, lowercased.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| Error::InvalidTag(path.display().to_string()))?;
        ext.to_ascii_lowercase().parse()
    }

    /// Raw tag bytes.
    pub fn as_bytes(&self) -> &[u8; TAG_BYTES] {
        &self.0
    }

    /// Whether every byte is printable ASCII.
    pub fn is_printable(&self) -> bool {
        self.0.iter().all(|b| b.is_ascii_graphic())
    }
}

impl FromStr for Tag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let bytes: [u8; TAG_BYTES] = s
            .as_bytes()
            .try_into()
            .map_err(|_| Error::InvalidTag(s.to_string()))?;
        if !bytes.iter().all(|b| b.is_ascii()) {
            return Err(Error::InvalidTag(s.to_string()));
        }
        Ok(Self(bytes))
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}

/// A payload and its type tag, ready to be embedded or just extracted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadFrame {
    tag: Tag,
    body: Vec<u8>,
}

impl PayloadFrame {
    /// Create a frame. Fails if the body does not fit the 32-bit length field.
    pub fn new(tag: Tag, body: Vec<u8>) -> Result<Self> {
        if u32::try_from(body.len()).is_err() {
            return Err(Error::PayloadTooLarge(body.len()));
        }
        Ok(Self { tag, body })
    }

    /// Value of the length field.
    pub fn length(&self) -> u32 {
        self.body.len() as u32
    }

    pub fn tag(&self) -> Tag {
        self.tag
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Split into tag and body.
    pub fn into_parts(self) -> (Tag, Vec<u8>) {
        (self.tag, self.body)
    }

    /// Total carrier slots this frame occupies.
    pub fn bit_count(&self) -> usize {
        framed_bit_count(self.body.len())
    }

    /// The 7 header bytes: big-endian length followed by the tag.
    pub fn header(&self) -> [u8; HEADER_BYTES] {
        encode_header(self.length(), self.tag)
    }

    /// Every frame bit in embedding order, most significant bit of each byte first.
    pub fn bits(&self) -> impl Iterator<Item = u8> + '_ {
        let header = self.header();
        header
            .into_iter()
            .chain(self.body.iter().copied())
            .flat_map(byte_bits)
    }
}

/// Carrier slots needed for a payload of `payload_len` bytes, tag included.
pub fn framed_bit_count(payload_len: usize) -> usize {
    payload_len
        .saturating_mul(BITS_PER_BYTE)
        .saturating_add(HEADER_BITS)
}

/// Serialize a frame header.
pub fn encode_header(length: u32, tag: Tag) -> [u8; HEADER_BYTES] {
    let mut header = [0u8; HEADER_BYTES];
    header[..LENGTH_FIELD_BYTES].copy_from_slice(&length.to_be_bytes());
    header[LENGTH_FIELD_BYTES..].copy_from_slice(tag.as_bytes());
    header
}

/// Parse a frame header into its length and tag.
pub fn decode_header(header: &[u8; HEADER_BYTES]) -> (u32, Tag) {
    let mut length = [0u8; LENGTH_FIELD_BYTES];
    length.copy_from_slice(&header[..LENGTH_FIELD_BYTES]);
    let mut tag = [0u8; TAG_BYTES];
    tag.copy_from_slice(&header[LENGTH_FIELD_BYTES..]);
    (u32::from_be_bytes(length), Tag::from_bytes(tag))
}

/// Bits of a byte, MSB first.
pub fn byte_bits(byte: u8) -> impl Iterator<Item = u8> {
    (0..BITS_PER_BYTE).rev().map(move |shift| (byte >> shift) & 1)
}

/// Pack 8 bits (MSB first) back into a byte.
pub fn pack_byte<I: IntoIterator<Item = u8>>(bits: I) -> u8 {
    bits.into_iter().fold(0u8, |acc, bit| (acc << 1) | (bit & 1))
}
