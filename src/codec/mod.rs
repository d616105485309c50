//! Bit-level LSB codec.
//!
//! A payload is framed as `[length: u32][tag: 3 bytes][body]` and written one
//! bit per sample into the least significant bit of the first byte of each
//! sample. Carrier format is passed explicitly into every call, so one
//! [`Codec`] can serve any number of independent carriers.

mod addressing;
mod capacity;
mod embedder;
mod extractor;
mod frame;
mod stride;

pub use addressing::{BitAddressing, Direction};
pub use capacity::{fits, max_payload_len, Capacity};
pub use embedder::{embed, embed_in_place};
pub use extractor::extract;
pub use frame::{decode_header, encode_header, framed_bit_count, PayloadFrame, Tag};
pub use stride::{sample_stride, CarrierFormat};

use crate::config::Alignment;
use crate::error::Result;

/// Embed/extract entry point bound to one alignment policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Codec {
    alignment: Alignment,
}

impl Codec {
    pub fn new(alignment: Alignment) -> Self {
        Self { alignment }
    }

    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    /// Slot accounting for a payload of `payload_len` bytes.
    pub fn capacity(&self, carrier: &[u8], format: &CarrierFormat, payload_len: usize) -> Result<Capacity> {
        Capacity::compute(carrier.len(), format, self.alignment, payload_len)
    }

    /// Whether a payload of `payload_len` bytes fits in `carrier`.
    pub fn fits(&self, carrier: &[u8], format: &CarrierFormat, payload_len: usize) -> Result<bool> {
        fits(carrier, format, self.alignment, payload_len)
    }

    /// Largest payload the carrier can hold, in bytes.
    pub fn max_payload_len(&self, carrier: &[u8], format: &CarrierFormat) -> Result<usize> {
        max_payload_len(carrier.len(), format, self.alignment)
    }

    /// Consume `carrier`, returning it with `frame` embedded.
    pub fn embed(&self, carrier: Vec<u8>, format: &CarrierFormat, frame: &PayloadFrame) -> Result<Vec<u8>> {
        embed(carrier, format, self.alignment, frame)
    }

    /// Recover the frame hidden in `carrier`.
    pub fn extract(&self, carrier: &[u8], format: &CarrierFormat) -> Result<PayloadFrame> {
        extract(carrier, format, self.alignment)
    }
}
