//! Error types for wavhide.

use thiserror::Error;

/// Result type alias for wavhide operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while hiding or recovering a payload.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Unusable carrier format or configuration value.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The framed payload does not fit in the carrier.
    #[error("Carrier too small: need {needed_bits} sample slots, have {available_slots}")]
    InsufficientCapacity {
        needed_bits: usize,
        available_slots: usize,
    },

    /// An addressed byte lies outside the carrier buffer.
    #[error("Carrier offset {offset} out of bounds for buffer of {len} bytes")]
    OutOfBounds { offset: usize, len: usize },

    /// Payload type tag is not exactly three ASCII bytes.
    #[error("Invalid payload tag: {0:?}")]
    InvalidTag(String),

    /// Payload body does not fit the 32-bit length field.
    #[error("Payload of {0} bytes exceeds the 32-bit length field")]
    PayloadTooLarge(usize),

    /// Error reported by the WAV reader or writer.
    #[error("Audio error: {0}")]
    Audio(String),

    /// Container format the carrier reader cannot handle.
    #[error("Unsupported audio format: {0}")]
    UnsupportedFormat(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<hound::Error> for Error {
    fn from(e: hound::Error) -> Self {
        match e {
            hound::Error::IoError(io) => Error::Io(io),
            hound::Error::Unsupported => {
                Error::UnsupportedFormat("unsupported WAV feature".to_string())
            }
            other => Error::Audio(other.to_string()),
        }
    }
}
