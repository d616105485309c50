//! wavhide - hide a file in the low bits of a WAV file.

mod logging;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use logging::{init_logging, LogFormat, LogLevel};
use std::path::{Path, PathBuf};
use wavhide::payload::encoded_output_path;
use wavhide::{stego, Alignment, StegoConfig};

#[derive(Parser)]
#[command(name = "wavhide")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Hide a file in the least significant bits of a WAV file",
    long_about = "Embeds a small file (typically an image) one bit per sample into integer PCM audio, and recovers it exactly."
)]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Big-endian base offset policy
    #[arg(long, global = true, value_enum)]
    alignment: Option<AlignmentArg>,

    /// Log verbosity
    #[arg(long, global = true, value_enum, default_value = "warn")]
    log_level: LogLevel,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value = "text")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum AlignmentArg {
    Symmetric,
    Legacy,
}

impl From<AlignmentArg> for Alignment {
    fn from(arg: AlignmentArg) -> Self {
        match arg {
            AlignmentArg::Symmetric => Alignment::Symmetric,
            AlignmentArg::Legacy => Alignment::Legacy,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Hide a file inside a WAV carrier
    Encode {
        /// Carrier WAV file
        carrier: PathBuf,

        /// File to hide; its 3-letter extension is stored as the type tag
        payload: PathBuf,

        /// Output WAV (default: <carrier>_encoded.wav)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write original vs. encoded sample values to this CSV
        #[arg(long)]
        drift_log: Option<PathBuf>,

        /// Overwrite an existing output file
        #[arg(long)]
        force: bool,
    },

    /// Recover a hidden file from a WAV carrier
    Decode {
        /// Encoded WAV file
        carrier: PathBuf,

        /// Output file (default: derived from the carrier name and tag)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite an existing output file
        #[arg(long)]
        force: bool,
    },

    /// Show carrier properties and capacity
    Info {
        /// WAV file
        carrier: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => StegoConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => StegoConfig::default(),
    };
    if let Some(alignment) = cli.alignment {
        config.alignment = alignment.into();
    }

    match cli.command {
        Commands::Encode {
            carrier,
            payload,
            output,
            drift_log,
            force,
        } => {
            if drift_log.is_some() {
                config.drift_log = drift_log;
            }
            config.overwrite |= force;
            cmd_encode(&carrier, &payload, output, &config)
        }

        Commands::Decode {
            carrier,
            output,
            force,
        } => {
            config.overwrite |= force;
            cmd_decode(&carrier, output.as_deref(), &config)
        }

        Commands::Info { carrier, json } => cmd_info(&carrier, json, &config),
    }
}

fn cmd_encode(
    carrier: &Path,
    payload: &Path,
    output: Option<PathBuf>,
    config: &StegoConfig,
) -> anyhow::Result<()> {
    let output = output.unwrap_or_else(|| encoded_output_path(carrier));
    let report = stego::encode_file(carrier, payload, &output, config)
        .with_context(|| format!("hiding {} in {}", payload.display(), carrier.display()))?;

    println!("Payload hidden successfully!");
    println!("  Output:     {}", report.output.display());
    println!("  Tag:        {}", report.tag);
    println!("  Payload:    {} bytes", report.payload_len);
    println!(
        "  Slots used: {} of {}",
        report.used_slots, report.available_slots
    );
    println!("  SHA-256:    {}", report.payload_sha256);

    Ok(())
}

fn cmd_decode(carrier: &Path, output: Option<&Path>, config: &StegoConfig) -> anyhow::Result<()> {
    let report = stego::decode_file(carrier, output, config)
        .with_context(|| format!("recovering payload from {}", carrier.display()))?;

    println!("Payload recovered");
    println!("  Output:   {}", report.output.display());
    println!("  Tag:      {}", report.tag);
    println!("  Payload:  {} bytes", report.payload_len);
    println!("  SHA-256:  {}", report.payload_sha256);

    Ok(())
}

fn cmd_info(carrier: &Path, json: bool, config: &StegoConfig) -> anyhow::Result<()> {
    let (info, max_payload) = stego::inspect(carrier, config)
        .with_context(|| format!("reading {}", carrier.display()))?;

    if json {
        let value = serde_json::json!({
            "carrier": info,
            "max_payload_bytes": max_payload,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("Carrier Information");
    println!("===================");
    println!("File:             {}", carrier.display());
    println!("Channels:         {}", info.channels);
    println!("Sample rate:      {} Hz", info.sample_rate);
    println!("Sample size:      {} bits", info.bits_per_sample);
    println!("Big endian:       {}", info.big_endian);
    println!("Frame size:       {} bytes", info.frame_size);
    println!("Samples:          {}", info.sample_count);
    println!("Duration:         {:.2} s", info.duration_secs);
    println!("Sample data:      {} bytes", info.byte_len);
    println!();
    println!("Capacity:         {} bytes", max_payload);

    Ok(())
}
