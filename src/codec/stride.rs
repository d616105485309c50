//! Carrier format and the sample stride derived from it.

use crate::config::BITS_PER_BYTE;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Format metadata of a raw sample buffer, as reported by the container reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarrierFormat {
    /// Sample width in bits. Must be a positive multiple of 8.
    pub bits_per_sample: u16,
    /// Whether multi-byte samples are stored most significant byte first.
    pub big_endian: bool,
}

impl CarrierFormat {
    /// Create a new carrier format.
    pub fn new(bits_per_sample: u16, big_endian: bool) -> Self {
        Self {
            bits_per_sample,
            big_endian,
        }
    }

    /// Byte distance between consecutive bit-carrying slots.
    ///
    /// Fractional-byte sample widths are rejected.
    pub fn stride(&self) -> Result<usize> {
        sample_stride(self.bits_per_sample)
    }
}

/// Derive the stride (bytes per sample) from a sample width in bits.
pub fn sample_stride(bits_per_sample: u16) -> Result<usize> {
    let bits = bits_per_sample as usize;
    if bits == 0 || bits % BITS_PER_BYTE != 0 {
        return Err(Error::Configuration(format!(
            "sample width must be a positive multiple of 8 bits, got {}",
            bits_per_sample
        )));
    }
    Ok(bits / BITS_PER_BYTE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_widths() {
        assert_eq!(sample_stride(8).unwrap(), 1);
        assert_eq!(sample_stride(16).unwrap(), 2);
        assert_eq!(sample_stride(24).unwrap(), 3);
        assert_eq!(sample_stride(32).unwrap(), 4);
    }

    #[test]
    fn test_rejects_fractional_bytes() {
        assert!(matches!(sample_stride(12), Err(Error::Configuration(_))));
        assert!(matches!(sample_stride(7), Err(Error::Configuration(_))));
    }

    #[test]
    fn test_rejects_zero() {
        assert!(matches!(sample_stride(0), Err(Error::Configuration(_))));
    }

    #[test]
    fn test_format_stride() {
        let format = CarrierFormat::new(24, true);
        assert_eq!(format.stride().unwrap(), 3);
    }
}
