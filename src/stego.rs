//! File-level encode and decode.
//!
//! These tie the codec to its collaborators: WAV carriers in, WAV carriers
//! out, and the hidden file on disk.

use crate::audio::{CarrierInfo, WavCarrier};
use crate::codec::{Codec, PayloadFrame, Tag};
use crate::config::StegoConfig;
use crate::drift;
use crate::error::Result;
use crate::payload::{decoded_output_path, read_payload};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Summary of a completed encode.
#[derive(Debug, Clone)]
pub struct EncodeReport {
    pub output: PathBuf,
    pub tag: Tag,
    pub payload_len: usize,
    /// Carrier slots written.
    pub used_slots: usize,
    pub available_slots: usize,
    /// Hex SHA-256 of the payload.
    pub payload_sha256: String,
}

/// Summary of a completed decode.
#[derive(Debug, Clone)]
pub struct DecodeReport {
    pub output: PathBuf,
    pub tag: Tag,
    pub payload_len: usize,
    /// Hex SHA-256 of the recovered payload.
    pub payload_sha256: String,
}

fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

fn ensure_writable(path: &Path, config: &StegoConfig) -> Result<()> {
    if path.exists() && !config.overwrite {
        return Err(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            format!("{} already exists", path.display()),
        )
        .into());
    }
    Ok(())
}

/// Hide the file at `payload_path` inside `carrier_path`, writing `output`.
///
/// Nothing is written when the payload does not fit. A drift log that cannot
/// be written is reported as a warning; the encoded carrier is kept.
pub fn encode_file(
    carrier_path: &Path,
    payload_path: &Path,
    output: &Path,
    config: &StegoConfig,
) -> Result<EncodeReport> {
    ensure_writable(output, config)?;

    let carrier = WavCarrier::open(carrier_path)?;
    let format = carrier.format();
    let (body, tag) = read_payload(payload_path)?;
    let codec = Codec::new(config.alignment);

    let capacity = codec
        .capacity(carrier.samples(), &format, body.len())?
        .ensure()?;

    let payload_sha256 = sha256_hex(&body);
    let payload_len = body.len();
    let frame = PayloadFrame::new(tag, body)?;
    let encoded = codec.embed(carrier.samples().to_vec(), &format, &frame)?;

    carrier.save(output, &encoded)?;

    if let Some(log_path) = &config.drift_log {
        if let Err(e) = drift::log_drift(log_path, carrier.samples(), &encoded, &format) {
            warn!(path = %log_path.display(), error = %e, "drift log not written");
        }
    }

    info!(
        output = %output.display(),
        tag = %tag,
        alignment = ?codec.alignment(),
        payload_len,
        used = capacity.needed_bits,
        available = capacity.available_slots,
        "payload hidden"
    );

    Ok(EncodeReport {
        output: output.to_path_buf(),
        tag,
        payload_len,
        used_slots: capacity.needed_bits,
        available_slots: capacity.available_slots,
        payload_sha256,
    })
}

/// Recover the hidden file from `carrier_path`.
///
/// Without an explicit `output`, the file is named after the carrier (see
/// [`decoded_output_path`]). A carrier that holds no payload still produces a
/// file: the frame has no signature to check.
pub fn decode_file(
    carrier_path: &Path,
    output: Option<&Path>,
    config: &StegoConfig,
) -> Result<DecodeReport> {
    let carrier = WavCarrier::open(carrier_path)?;
    let codec = Codec::new(config.alignment);

    let frame = codec.extract(carrier.samples(), &carrier.format())?;
    let (tag, body) = frame.into_parts();
    if !tag.is_printable() {
        warn!(tag = ?tag.as_bytes(), "tag is not printable ASCII; carrier may hold no payload");
    }

    let output = match output {
        Some(path) => path.to_path_buf(),
        None => decoded_output_path(carrier_path, &tag),
    };
    ensure_writable(&output, config)?;
    std::fs::write(&output, &body)?;

    info!(output = %output.display(), tag = %tag, payload_len = body.len(), "payload recovered");

    Ok(DecodeReport {
        payload_sha256: sha256_hex(&body),
        payload_len: body.len(),
        output,
        tag,
    })
}

/// Carrier properties and the largest payload it can hold, in bytes.
pub fn inspect(carrier_path: &Path, config: &StegoConfig) -> Result<(CarrierInfo, usize)> {
    let carrier = WavCarrier::open(carrier_path)?;
    let max = Codec::new(config.alignment).max_payload_len(carrier.samples(), &carrier.format())?;
    Ok((carrier.info(), max))
}
