//! Mapping from logical bit index to physical carrier byte offset.

use crate::codec::stride::CarrierFormat;
use crate::config::Alignment;
use crate::error::{Error, Result};

/// Which pass the addressing is computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Embed,
    Extract,
}

/// Linear bit addressing: `offset(i) = base + i * stride`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitAddressing {
    base: usize,
    stride: usize,
}

impl BitAddressing {
    /// Build the addressing for one pass over a carrier of the given format.
    ///
    /// Little-endian carriers start at offset 0. Big-endian carriers start one
    /// sample later when embedding, and when extracting only under
    /// [`Alignment::Symmetric`].
    pub fn new(format: &CarrierFormat, alignment: Alignment, direction: Direction) -> Result<Self> {
        let stride = format.stride()?;
        let shifted = match (alignment, direction) {
            (_, Direction::Embed) => format.big_endian,
            (Alignment::Symmetric, Direction::Extract) => format.big_endian,
            (Alignment::Legacy, Direction::Extract) => false,
        };

        Ok(Self {
            base: if shifted { stride } else { 0 },
            stride,
        })
    }

    /// Offset of the first addressed byte.
    pub fn base(&self) -> usize {
        self.base
    }

    /// Bytes between addressed slots.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Physical byte offset of logical bit `index`, or `None` on overflow.
    pub fn offset(&self, index: usize) -> Option<usize> {
        index
            .checked_mul(self.stride)
            .and_then(|o| o.checked_add(self.base))
    }

    /// Offset of bit `index`, validated against a buffer of `len` bytes.
    ///
    /// The addressed sample must be complete: a trailing partial sample is
    /// never read or written.
    pub fn checked_offset(&self, index: usize, len: usize) -> Result<usize> {
        match self.offset(index) {
            Some(offset) if offset.saturating_add(self.stride) <= len => Ok(offset),
            Some(offset) => Err(Error::OutOfBounds { offset, len }),
            None => Err(Error::OutOfBounds {
                offset: usize::MAX,
                len,
            }),
        }
    }

    /// Number of addressable slots in a buffer of `len` bytes.
    ///
    /// Residual bytes past the last full sample are not counted.
    pub fn slots(&self, len: usize) -> usize {
        let samples = len / self.stride;
        samples.saturating_sub(self.base / self.stride)
    }

    /// Validate that bits `0..count` are all addressable in `len` bytes.
    pub fn check_span(&self, count: usize, len: usize) -> Result<()> {
        if count == 0 {
            return Ok(());
        }
        self.checked_offset(count - 1, len).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addressing(bits: u16, big_endian: bool, alignment: Alignment, dir: Direction) -> BitAddressing {
        BitAddressing::new(&CarrierFormat::new(bits, big_endian), alignment, dir).unwrap()
    }

    #[test]
    fn test_little_endian_starts_at_zero() {
        let a = addressing(16, false, Alignment::Symmetric, Direction::Embed);
        assert_eq!(a.offset(0), Some(0));
        assert_eq!(a.offset(1), Some(2));
        assert_eq!(a.offset(10), Some(20));
    }

    #[test]
    fn test_big_endian_embed_skips_one_sample() {
        let a = addressing(24, true, Alignment::Legacy, Direction::Embed);
        assert_eq!(a.base(), 3);
        assert_eq!(a.offset(0), Some(3));
        assert_eq!(a.offset(2), Some(9));
    }

    #[test]
    fn test_legacy_extract_ignores_endianness() {
        let a = addressing(16, true, Alignment::Legacy, Direction::Extract);
        assert_eq!(a.base(), 0);
    }

    #[test]
    fn test_symmetric_extract_matches_embed() {
        let embed = addressing(16, true, Alignment::Symmetric, Direction::Embed);
        let extract = addressing(16, true, Alignment::Symmetric, Direction::Extract);
        assert_eq!(embed, extract);
    }

    #[test]
    fn test_checked_offset_bounds() {
        let a = addressing(16, false, Alignment::Symmetric, Direction::Embed);
        assert_eq!(a.checked_offset(3, 8).unwrap(), 6);
        assert!(matches!(
            a.checked_offset(4, 8),
            Err(Error::OutOfBounds { offset: 8, len: 8 })
        ));
    }

    #[test]
    fn test_checked_offset_skips_partial_sample() {
        let a = addressing(16, false, Alignment::Symmetric, Direction::Extract);
        assert_eq!(a.checked_offset(62, 127).unwrap(), 124);
        assert!(matches!(
            a.checked_offset(63, 127),
            Err(Error::OutOfBounds { offset: 126, len: 127 })
        ));
        assert_eq!(a.slots(127), 63);
    }

    #[test]
    fn test_slots_ignore_residual_bytes() {
        let a = addressing(16, false, Alignment::Symmetric, Direction::Embed);
        assert_eq!(a.slots(64), 32);
        assert_eq!(a.slots(65), 32);
    }

    #[test]
    fn test_slots_account_for_base() {
        let a = addressing(16, true, Alignment::Symmetric, Direction::Embed);
        assert_eq!(a.slots(64), 31);
        assert_eq!(a.slots(1), 0);
    }

    #[test]
    fn test_check_span() {
        let a = addressing(8, false, Alignment::Symmetric, Direction::Embed);
        assert!(a.check_span(0, 0).is_ok());
        assert!(a.check_span(56, 56).is_ok());
        assert!(a.check_span(57, 56).is_err());
    }
}
