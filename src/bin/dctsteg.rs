// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! dctsteg CLI - hide and recover text in grayscale images.

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use log::{debug, LevelFilter};

use dctsteg_core::stego::frame::framed_bit_len;
use dctsteg_core::{
    capacity, decode_with_report, encode, load_luma, save_luma, to_grayscale, StegoConfig,
    DEFAULT_STRENGTH,
};

/// DCT steganography tool.
///
/// Hides one bit per 8x8 block in the sign of a mid-frequency DCT
/// coefficient of the image's luminance.
#[derive(Parser, Debug)]
#[command(name = "dctsteg")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "\
EXAMPLES:
    dctsteg embed -i cover.png -m \"hello\" -o stego.png          Hide a message
    dctsteg embed -i cover.png -m \"hello\" -o stego.png -s 8     Survive 8-bit rounding
    dctsteg extract -i stego.png                                Recover the message
    dctsteg extract -i stego.png -l 48                          Read exactly 48 bits
    dctsteg capacity -i cover.png                               Show how much fits")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Embed a message in an image
    Embed {
        /// Path to cover image
        #[arg(short, long, value_name = "PATH")]
        image: PathBuf,

        /// Message to hide
        #[arg(short, long)]
        message: String,

        /// Output image path (use a lossless format such as PNG)
        #[arg(short, long, value_name = "PATH")]
        output: PathBuf,

        /// Embedding strength; higher is more robust but more visible
        #[arg(short, long, visible_alias = "alpha", short_alias = 'a', default_value_t = DEFAULT_STRENGTH)]
        strength: f64,
    },
    /// Extract a message from an image
    Extract {
        /// Path to stego image
        #[arg(short, long, value_name = "PATH")]
        image: PathBuf,

        /// Message length in bits (reads up to the terminator if omitted)
        #[arg(short, long, value_name = "BITS")]
        length: Option<usize>,

        /// Strength used at embed time (only affects diagnostics)
        #[arg(short, long, default_value_t = DEFAULT_STRENGTH)]
        strength: f64,
    },
    /// Show the embedding capacity of an image
    Capacity {
        /// Path to image
        #[arg(short, long, value_name = "PATH")]
        image: PathBuf,
    },
    /// Re-encode an image as 8-bit grayscale
    Grayscale {
        /// Input image path
        #[arg(short, long, value_name = "PATH")]
        image: PathBuf,

        /// Output image path
        #[arg(short, long, value_name = "PATH")]
        output: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Embed { image, message, output, strength } => {
            let config = StegoConfig::with_strength(strength)?;
            let cover = load_luma(&image)?;
            let info = capacity(&cover);
            debug!("{}: {} bits capacity", image.display(), info.bits);

            let stego = encode(&cover, message.as_bytes(), &config)
                .with_context(|| format!("cannot embed into {}", image.display()))?;
            let stats = save_luma(&stego, &output)?;

            println!("Message embedded successfully. Output saved to {}", output.display());
            println!("{}", embed_summary(&message, info.bits));
            if stats.clipped > 0 {
                println!("Warning: {} samples were clipped; extraction may fail", stats.clipped);
            }
        }
        Command::Extract { image, length, strength } => {
            let config = StegoConfig::with_strength(strength)?;
            let stego = load_luma(&image)?;
            let (bytes, report) = decode_with_report(&stego, &config, length)
                .with_context(|| format!("cannot extract from {}", image.display()))?;
            debug!("{report:?}");
            println!("Extracted message: {}", render_text(&bytes));
        }
        Command::Capacity { image } => {
            let img = load_luma(&image)?;
            let info = capacity(&img);
            println!("Image: {} ({}x{})", image.display(), img.width(), img.height());
            println!("Blocks: {}x{}", info.blocks_wide, info.blocks_tall);
            println!("Capacity: {} bits", info.bits);
            println!("Max message length: {} bytes", info.max_message_bytes);
        }
        Command::Grayscale { image, output } => {
            let img = to_grayscale(&image, &output)?;
            println!(
                "Grayscale image ({}x{}) saved to {}",
                img.width(),
                img.height(),
                output.display()
            );
        }
    }
    Ok(())
}

fn embed_summary(message: &str, available_bits: usize) -> String {
    format!("Embedded {} bits out of {available_bits} available", framed_bit_len(message.len()))
}

/// Decode as UTF-8 (lossy) and keep printable characters plus tab, newline
/// and carriage return.
fn render_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .chars()
        .filter(|c| !c.is_control() || matches!(c, '\t' | '\n' | '\r'))
        .collect()
}
