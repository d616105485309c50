//! wavhide
//!
//! Hides a small file in the least significant bits of PCM audio samples and
//! recovers it byte for byte.
//!
//! # Features
//!
//! - **LSB codec**: one payload bit per sample, only the low bit of one byte
//!   per sample is ever touched
//! - **Self-describing frame**: 32-bit length and a 3-byte type tag ahead of
//!   the payload
//! - **WAV carriers**: 8, 16, 24 and 32-bit integer PCM via `hound`
//! - **CLI Interface**: `wavhide encode`, `decode`, `info`
//!
//! # Architecture
//!
//! ```text
//! payload + tag → frame → bits (MSB first) → carrier LSBs (stride = bytes/sample)
//! ```
//!
//! The frame has no magic number or checksum. Extraction trusts the length
//! field, so decoding a carrier that never held a payload returns garbage.
//!
//! # Example
//!
//! ```
//! use wavhide::codec::{CarrierFormat, Codec, PayloadFrame};
//!
//! let format = CarrierFormat::new(16, false);
//! let carrier = vec![0u8; 128];
//! let frame = PayloadFrame::new("png".parse().unwrap(), vec![0xFF]).unwrap();
//!
//! let codec = Codec::default();
//! let encoded = codec.embed(carrier, &format, &frame).unwrap();
//! let recovered = codec.extract(&encoded, &format).unwrap();
//!
//! assert_eq!(recovered, frame);
//! ```

pub mod audio;
pub mod codec;
pub mod config;
pub mod drift;
pub mod error;
pub mod payload;
pub mod stego;

pub use codec::{CarrierFormat, Codec, PayloadFrame, Tag};
pub use config::{Alignment, StegoConfig};
pub use error::{Error, Result};
