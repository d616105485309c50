//! WAV carrier I/O.
//!
//! Integer PCM samples are flattened into a raw little-endian byte buffer,
//! which is what the codec operates on, and re-wrapped with the original
//! spec on save.

use crate::codec::CarrierFormat;
use crate::error::{Error, Result};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use serde::Serialize;
use std::io::{Cursor, Read, Seek, Write};
use std::path::Path;
use tracing::debug;

/// Format properties of a carrier, for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarrierInfo {
    pub channels: u16,
    pub sample_rate: u32,
    pub bits_per_sample: u16,
    pub big_endian: bool,
    /// Bytes per frame (one sample of every channel).
    pub frame_size: usize,
    /// Total samples across all channels.
    pub sample_count: usize,
    pub duration_secs: f64,
    /// Length of the raw sample buffer in bytes.
    pub byte_len: usize,
}

/// A WAV file loaded as raw sample bytes.
#[derive(Debug, Clone)]
pub struct WavCarrier {
    spec: WavSpec,
    samples: Vec<u8>,
}

impl WavCarrier {
    /// Load a carrier from a WAV file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = WavReader::open(path)?;
        Self::from_reader(reader)
    }

    /// Load a carrier from in-memory WAV bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let reader = WavReader::new(Cursor::new(bytes))?;
        Self::from_reader(reader)
    }

    fn from_reader<R: Read>(reader: WavReader<R>) -> Result<Self> {
        let spec = reader.spec();

        if spec.sample_format != SampleFormat::Int {
            return Err(Error::UnsupportedFormat(format!(
                "only integer PCM is supported, got {:?}",
                spec.sample_format
            )));
        }
        let width = sample_width(spec.bits_per_sample)?;

        let mut samples = Vec::with_capacity(reader.len() as usize * width);
        for sample in reader.into_samples::<i32>() {
            samples.extend_from_slice(&sample?.to_le_bytes()[..width]);
        }

        debug!(
            channels = spec.channels,
            bits = spec.bits_per_sample,
            bytes = samples.len(),
            "loaded WAV carrier"
        );
        Ok(Self { spec, samples })
    }

    pub fn spec(&self) -> &WavSpec {
        &self.spec
    }

    /// Raw little-endian sample bytes.
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// Codec view of this carrier. RIFF WAV is always little-endian.
    pub fn format(&self) -> CarrierFormat {
        CarrierFormat::new(self.spec.bits_per_sample, false)
    }

    pub fn info(&self) -> CarrierInfo {
        let width = (self.spec.bits_per_sample as usize) / 8;
        let sample_count = self.samples.len() / width.max(1);
        let frames = sample_count / (self.spec.channels as usize).max(1);
        CarrierInfo {
            channels: self.spec.channels,
            sample_rate: self.spec.sample_rate,
            bits_per_sample: self.spec.bits_per_sample,
            big_endian: false,
            frame_size: width * self.spec.channels as usize,
            sample_count,
            duration_secs: frames as f64 / self.spec.sample_rate as f64,
            byte_len: self.samples.len(),
        }
    }

    /// Write `samples` to `path` as a WAV file with this carrier's spec.
    ///
    /// `samples` must be a raw buffer of the same layout, typically this
    /// carrier's bytes after embedding.
    pub fn save<P: AsRef<Path>>(&self, path: P, samples: &[u8]) -> Result<()> {
        let writer = WavWriter::create(path, self.spec)?;
        write_samples(writer, self.spec, samples)
    }

    /// Encode `samples` as in-memory WAV bytes with this carrier's spec.
    pub fn to_wav_bytes(&self, samples: &[u8]) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        {
            let writer = WavWriter::new(Cursor::new(&mut bytes), self.spec)?;
            write_samples(writer, self.spec, samples)?;
        }
        Ok(bytes)
    }
}

fn sample_width(bits_per_sample: u16) -> Result<usize> {
    match bits_per_sample {
        8 | 16 | 24 | 32 => Ok(bits_per_sample as usize / 8),
        other => Err(Error::UnsupportedFormat(format!(
            "{}-bit integer PCM is not supported",
            other
        ))),
    }
}

/// Sign-extend a little-endian sample of `bytes.len()` bytes.
fn sample_from_le(bytes: &[u8]) -> i32 {
    let mut buf = [0u8; 4];
    buf[..bytes.len()].copy_from_slice(bytes);
    let shift = 32 - 8 * bytes.len() as u32;
    (i32::from_le_bytes(buf) << shift) >> shift
}

fn write_samples<W: Write + Seek>(mut writer: WavWriter<W>, spec: WavSpec, samples: &[u8]) -> Result<()> {
    let width = sample_width(spec.bits_per_sample)?;
    if samples.len() % width != 0 {
        return Err(Error::Configuration(format!(
            "sample buffer of {} bytes is not a multiple of {}",
            samples.len(),
            width
        )));
    }

    for chunk in samples.chunks_exact(width) {
        writer.write_sample(sample_from_le(chunk))?;
    }
    writer.finalize()?;
    Ok(())
}
