//! LSB substitution of frame bits into a carrier buffer.

use crate::codec::addressing::{BitAddressing, Direction};
use crate::codec::capacity::Capacity;
use crate::codec::frame::PayloadFrame;
use crate::codec::stride::CarrierFormat;
use crate::config::Alignment;
use crate::error::Result;
use tracing::{debug, warn};

/// Embed `frame` into `carrier` in place.
///
/// Capacity and bounds are checked before the first write: on error the
/// carrier is unchanged. Only the least significant bit of each addressed
/// byte is replaced.
pub fn embed_in_place(
    carrier: &mut [u8],
    format: &CarrierFormat,
    alignment: Alignment,
    frame: &PayloadFrame,
) -> Result<Capacity> {
    let capacity = Capacity::compute(carrier.len(), format, alignment, frame.body().len())?.ensure()?;

    let addressing = BitAddressing::new(format, alignment, Direction::Embed)?;
    addressing.check_span(capacity.needed_bits, carrier.len())?;

    if format.big_endian && alignment == Alignment::Legacy {
        warn!("legacy alignment on a big-endian carrier: extraction will be misaligned");
    }

    let mut offset = addressing.base();
    for bit in frame.bits() {
        carrier[offset] = (carrier[offset] & 0xFE) | bit;
        offset += addressing.stride();
    }

    debug!(
        bits = capacity.needed_bits,
        base = addressing.base(),
        stride = addressing.stride(),
        tag = %frame.tag(),
        "embedded frame"
    );
    Ok(capacity)
}

/// Embed `frame` into an owned carrier and hand it back.
pub fn embed(
    mut carrier: Vec<u8>,
    format: &CarrierFormat,
    alignment: Alignment,
    frame: &PayloadFrame,
) -> Result<Vec<u8>> {
    embed_in_place(&mut carrier, format, alignment, frame)?;
    Ok(carrier)
}
