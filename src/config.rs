//! Configuration constants and types for wavhide.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Bits in one payload or carrier byte.
pub const BITS_PER_BYTE: usize = 8;

/// Width of the big-endian payload length field.
pub const LENGTH_FIELD_BYTES: usize = 4;

/// Width of the payload type tag (e.g. `png`).
pub const TAG_BYTES: usize = 3;

/// Fixed frame header: length field followed by the tag.
pub const HEADER_BYTES: usize = LENGTH_FIELD_BYTES + TAG_BYTES;

/// Carrier slots consumed by the frame header.
pub const HEADER_BITS: usize = HEADER_BYTES * BITS_PER_BYTE;

/// Where bit addressing starts for big-endian carriers.
///
/// Little-endian carriers always start at offset 0. Big-endian carriers are
/// shifted by one full sample when embedding; this setting decides whether
/// extraction applies the same shift.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Alignment {
    /// Embed and extract both skip the first sample of big-endian carriers.
    #[default]
    Symmetric,
    /// Only embedding skips the first sample. Big-endian carriers written this
    /// way do not round-trip; kept for compatibility with existing files.
    Legacy,
}

/// Runtime configuration, loadable from a JSON file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StegoConfig {
    /// Big-endian base offset policy.
    pub alignment: Alignment,

    /// Write a sample drift CSV here after encoding.
    pub drift_log: Option<PathBuf>,

    /// Replace existing output files.
    pub overwrite: bool,
}

impl StegoConfig {
    /// Load a configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: StegoConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save the configuration as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if let Some(path) = &self.drift_log {
            if path.as_os_str().is_empty() {
                return Err(Error::Configuration(
                    "drift_log must not be an empty path".to_string(),
                ));
            }
        }
        Ok(())
    }
}
