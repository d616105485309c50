//! Capacity checks, done before any carrier byte is touched.

use crate::codec::addressing::{BitAddressing, Direction};
use crate::codec::frame::framed_bit_count;
use crate::codec::stride::CarrierFormat;
use crate::config::{Alignment, BITS_PER_BYTE, HEADER_BITS};
use crate::error::{Error, Result};
use tracing::debug;

/// Slot accounting for one carrier and one candidate payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capacity {
    /// Bit-carrying slots in the carrier.
    pub available_slots: usize,
    /// Slots the framed payload needs.
    pub needed_bits: usize,
}

impl Capacity {
    /// Compute the slot accounting for a payload of `payload_len` bytes.
    ///
    /// Only the payload length matters: the tag has a fixed width, so this can
    /// run before the tag is known.
    pub fn compute(
        carrier_len: usize,
        format: &CarrierFormat,
        alignment: Alignment,
        payload_len: usize,
    ) -> Result<Self> {
        let addressing = BitAddressing::new(format, alignment, Direction::Embed)?;
        let capacity = Self {
            available_slots: addressing.slots(carrier_len),
            needed_bits: framed_bit_count(payload_len),
        };
        debug!(
            carrier_len,
            stride = addressing.stride(),
            available = capacity.available_slots,
            needed = capacity.needed_bits,
            "computed carrier capacity"
        );
        Ok(capacity)
    }

    pub fn fits(&self) -> bool {
        self.available_slots >= self.needed_bits
    }

    /// Turn an insufficient capacity into an error.
    pub fn ensure(self) -> Result<Self> {
        if self.fits() {
            Ok(self)
        } else {
            Err(Error::InsufficientCapacity {
                needed_bits: self.needed_bits,
                available_slots: self.available_slots,
            })
        }
    }
}

/// Whether a payload of `payload_len` bytes fits in the carrier.
pub fn fits(
    carrier: &[u8],
    format: &CarrierFormat,
    alignment: Alignment,
    payload_len: usize,
) -> Result<bool> {
    Ok(Capacity::compute(carrier.len(), format, alignment, payload_len)?.fits())
}

/// Largest payload, in bytes, a carrier of `carrier_len` bytes can hold.
pub fn max_payload_len(
    carrier_len: usize,
    format: &CarrierFormat,
    alignment: Alignment,
) -> Result<usize> {
    let addressing = BitAddressing::new(format, alignment, Direction::Embed)?;
    Ok(addressing.slots(carrier_len).saturating_sub(HEADER_BITS) / BITS_PER_BYTE)
}
