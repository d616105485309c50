//! Sample drift diagnostics: original vs. encoded sample values as CSV.

use crate::codec::CarrierFormat;
use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Decode each full sample of `bytes` to a value in `[-1.0, 1.0)`.
///
/// Samples are read as signed integers in the carrier's byte order. Residual
/// bytes past the last full sample are ignored.
pub fn decode_samples(bytes: &[u8], format: &CarrierFormat) -> Result<Vec<f64>> {
    let width = format.stride()?;
    if width > 8 {
        return Err(Error::Configuration(format!(
            "{}-bit samples cannot be decoded",
            format.bits_per_sample
        )));
    }
    let scale = 2f64.powi(format.bits_per_sample as i32 - 1);
    let shift = 64 - 8 * width as u32;

    Ok(bytes
        .chunks_exact(width)
        .map(|chunk| {
            let raw = if format.big_endian {
                chunk.iter().fold(0u64, |acc, &b| (acc << 8) | b as u64)
            } else {
                chunk.iter().rev().fold(0u64, |acc, &b| (acc << 8) | b as u64)
            };
            let value = ((raw << shift) as i64) >> shift;
            value as f64 / scale
        })
        .collect())
}

/// Write original and encoded sample values side by side.
pub fn write_drift_csv(path: &Path, original: &[f64], encoded: &[f64]) -> Result<()> {
    if original.len() != encoded.len() {
        return Err(Error::Configuration(format!(
            "sample count mismatch: {} original, {} encoded",
            original.len(),
            encoded.len()
        )));
    }

    let mut out = BufWriter::new(File::create(path)?);
    out.write_all(b"Original,Encoded\r\n")?;
    for (a, b) in original.iter().zip(encoded) {
        write!(out, "{},{}\r\n", a, b)?;
    }
    out.flush()?;

    info!(path = %path.display(), samples = original.len(), "wrote drift log");
    Ok(())
}

/// Decode both buffers and write the drift CSV.
pub fn log_drift(path: &Path, original: &[u8], encoded: &[u8], format: &CarrierFormat) -> Result<()> {
    let before = decode_samples(original, format)?;
    let after = decode_samples(encoded, format)?;
    write_drift_csv(path, &before, &after)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_decode_little_endian_16() {
        let format = CarrierFormat::new(16, false);
        let samples = decode_samples(&[0x00, 0x40, 0x00, 0xC0, 0xFF, 0x7F], &format).unwrap();
        assert_eq!(samples, vec![0.5, -0.5, 32767.0 / 32768.0]);
    }

    #[test]
    fn test_decode_big_endian_24() {
        let format = CarrierFormat::new(24, true);
        let samples = decode_samples(&[0x80, 0x00, 0x00, 0x00, 0x00, 0x01], &format).unwrap();
        assert_eq!(samples, vec![-1.0, 1.0 / 8_388_608.0]);
    }

    #[test]
    fn test_decode_ignores_residual() {
        let format = CarrierFormat::new(16, false);
        assert_eq!(decode_samples(&[0, 0, 1], &format).unwrap().len(), 1);
    }

    #[test]
    fn test_write_csv() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log.csv");

        write_drift_csv(&path, &[0.5, -0.25], &[0.5, -0.125]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "Original,Encoded\r\n0.5,0.5\r\n-0.25,-0.125\r\n");
    }

    #[test]
    fn test_length_mismatch_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log.csv");

        assert!(write_drift_csv(&path, &[0.0], &[]).is_err());
        assert!(!path.exists());
    }
}
