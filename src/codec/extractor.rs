//! Recovery of a frame from carrier LSBs.

use crate::codec::addressing::{BitAddressing, Direction};
use crate::codec::frame::{decode_header, framed_bit_count, pack_byte, PayloadFrame};
use crate::codec::stride::CarrierFormat;
use crate::config::{Alignment, BITS_PER_BYTE, HEADER_BITS, HEADER_BYTES};
use crate::error::Result;
use tracing::debug;

/// Sequential reader of carrier LSBs.
struct BitReader<'a> {
    carrier: &'a [u8],
    addressing: BitAddressing,
    index: usize,
}

impl<'a> BitReader<'a> {
    fn read_bit(&mut self) -> Result<u8> {
        let offset = self.addressing.checked_offset(self.index, self.carrier.len())?;
        self.index += 1;
        Ok(self.carrier[offset] & 1)
    }

    fn read_byte(&mut self) -> Result<u8> {
        let mut bits = [0u8; BITS_PER_BYTE];
        for bit in bits.iter_mut() {
            *bit = self.read_bit()?;
        }
        Ok(pack_byte(bits))
    }

    fn read_into(&mut self, buf: &mut [u8]) -> Result<()> {
        for byte in buf.iter_mut() {
            *byte = self.read_byte()?;
        }
        Ok(())
    }
}

/// Extract a frame from `carrier`.
///
/// The length field is trusted: a carrier without an embedded payload yields
/// garbage rather than an error. A length that runs past the end of the
/// carrier is reported as [`Error::OutOfBounds`](crate::Error::OutOfBounds) before the body is read.
pub fn extract(carrier: &[u8], format: &CarrierFormat, alignment: Alignment) -> Result<PayloadFrame> {
    let addressing = BitAddressing::new(format, alignment, Direction::Extract)?;
    addressing.check_span(HEADER_BITS, carrier.len())?;

    let mut reader = BitReader {
        carrier,
        addressing,
        index: 0,
    };

    let mut header = [0u8; HEADER_BYTES];
    reader.read_into(&mut header)?;
    let (length, tag) = decode_header(&header);

    let length = length as usize;
    addressing.check_span(framed_bit_count(length), carrier.len())?;

    let mut body = vec![0u8; length];
    reader.read_into(&mut body)?;

    debug!(length, tag = %tag, base = addressing.base(), "extracted frame");
    PayloadFrame::new(tag, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::embedder::embed;
    use crate::error::Error;

    #[test]
    fn test_reads_hand_built_carrier() {
        // stride 1: one carrier byte per bit, value 0/1
        let mut carrier: Vec<u8> = Vec::new();
        for byte in [0u8, 0, 0, 1, b'b', b'i', b'n', 0xC3] {
            for shift in (0..8).rev() {
                carrier.push(0xF0 | ((byte >> shift) & 1));
            }
        }

        let frame = extract(&carrier, &CarrierFormat::new(8, false), Alignment::Symmetric).unwrap();
        assert_eq!(frame.length(), 1);
        assert_eq!(frame.tag().to_string(), "bin");
        assert_eq!(frame.body(), &[0xC3]);
    }

    #[test]
    fn test_blank_carrier_yields_empty_frame() {
        let frame = extract(&[0u8; 56], &CarrierFormat::new(8, false), Alignment::Symmetric).unwrap();
        assert_eq!(frame.length(), 0);
        assert_eq!(frame.tag().as_bytes(), &[0, 0, 0]);
        assert!(!frame.tag().is_printable());
    }

    #[test]
    fn test_carrier_shorter_than_header() {
        let err = extract(&[0u8; 55], &CarrierFormat::new(8, false), Alignment::Symmetric).unwrap_err();
        assert!(matches!(err, Error::OutOfBounds { .. }));
    }

    #[test]
    fn test_trailing_partial_sample_is_not_read() {
        // 63 full 16-bit samples plus one stray byte
        let format = CarrierFormat::new(16, false);
        let mut carrier = vec![0u8; 2 * 63 + 1];
        // length = 1, and the stray byte would be the 64th bit
        carrier[2 * 31] = 1;
        carrier[126] = 1;

        assert!(!crate::codec::fits(&carrier, &format, Alignment::Symmetric, 1).unwrap());
        let err = extract(&carrier, &format, Alignment::Symmetric).unwrap_err();
        assert!(matches!(err, Error::OutOfBounds { offset: 126, len: 127 }));
    }

    #[test]
    fn test_overrunning_length_is_out_of_bounds() {
        // every LSB set -> length = u32::MAX
        let err = extract(&[1u8; 128], &CarrierFormat::new(8, false), Alignment::Symmetric).unwrap_err();
        assert!(matches!(err, Error::OutOfBounds { len: 128, .. }));
    }

    #[test]
    fn test_repeat_extraction_is_stable() {
        let format = CarrierFormat::new(24, false);
        let frame = PayloadFrame::new("jpg".parse().unwrap(), b"abc".to_vec()).unwrap();
        let carrier = embed(vec![0x55u8; 3 * 200], &format, Alignment::Symmetric, &frame).unwrap();

        let first = extract(&carrier, &format, Alignment::Symmetric).unwrap();
        let second = extract(&carrier, &format, Alignment::Symmetric).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, frame);
    }

    #[test]
    fn test_legacy_big_endian_is_misaligned() {
        let format = CarrierFormat::new(16, true);
        let frame = PayloadFrame::new("png".parse().unwrap(), vec![0xFF]).unwrap();
        let carrier = embed(vec![0u8; 2 * 65], &format, Alignment::Legacy, &frame).unwrap();

        let symmetric = extract(&carrier, &format, Alignment::Symmetric).unwrap();
        assert_eq!(symmetric, frame);

        // legacy extraction reads one sample early: the first bit is an
        // untouched zero and every later bit is shifted right by one
        let legacy = extract(&carrier, &format, Alignment::Legacy);
        assert_ne!(legacy.ok(), Some(frame));
    }
}
