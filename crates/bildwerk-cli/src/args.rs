// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line arguments and the flag parsers behind them.

use std::path::PathBuf;

use bildwerk_core::config::EngineConfig;
use bildwerk_core::types::{ClampPolicy, Operation};
use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "bildwerk")]
#[command(author, version, about = "Deterministic pixel transforms for RGB images")]
#[command(long_about = "
Applies one pixel transform to an image and writes the result.

Examples:
  bildwerk greyscale photo.png -o grey.png
  bildwerk sepia photo.png -o old.png --clamp legacy
  bildwerk histogram photo.png -o chart.png --print-histogram
  bildwerk subtract actor.png -b beach.png -o composite.png --key-color 0,255,0 --threshold 8
")]
pub struct Cli {
    /// Operation: copy, greyscale, invert, sepia, histogram, subtract
    #[arg(value_parser = parse_operation)]
    pub operation: Operation,

    /// Source image (the foreground, for subtract)
    pub input: PathBuf,

    /// Background image, required by subtract
    #[arg(short, long)]
    pub background: Option<PathBuf>,

    /// Where to write the result; the format follows the extension
    #[arg(short, long)]
    pub output: PathBuf,

    /// JSON engine configuration
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Chroma-key color as R,G,B
    #[arg(long, value_parser = parse_rgb)]
    pub key_color: Option<[u8; 3]>,

    /// Chroma-key luma threshold
    #[arg(long)]
    pub threshold: Option<u32>,

    /// Sepia clamping: symmetric or legacy
    #[arg(long, value_parser = parse_clamp)]
    pub clamp: Option<ClampPolicy>,

    /// Print non-empty histogram bins as `intensity count` lines
    #[arg(long)]
    pub print_histogram: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Apply command-line overrides on top of `config`.
    pub fn apply_overrides(&self, mut config: EngineConfig) -> EngineConfig {
        if let Some(key_color) = self.key_color {
            config.chroma_key.key_color = key_color;
        }
        if let Some(threshold) = self.threshold {
            config.chroma_key.threshold = threshold;
        }
        if let Some(clamp) = self.clamp {
            config.sepia.clamp = clamp;
        }
        config
    }
}

fn parse_operation(s: &str) -> Result<Operation, String> {
    Operation::from_name(s).ok_or_else(|| {
        let names: Vec<_> = Operation::ALL.iter().map(Operation::name).collect();
        format!("unknown operation '{s}' (expected one of: {})", names.join(", "))
    })
}

fn parse_clamp(s: &str) -> Result<ClampPolicy, String> {
    ClampPolicy::from_name(s)
        .ok_or_else(|| format!("unknown clamp policy '{s}' (expected symmetric or legacy)"))
}

fn parse_rgb(s: &str) -> Result<[u8; 3], String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(format!("expected R,G,B, got '{s}'"));
    }
    let mut rgb = [0u8; 3];
    for (slot, part) in rgb.iter_mut().zip(&parts) {
        *slot = part
            .parse()
            .map_err(|_| format!("channel '{part}' is not in 0..=255"))?;
    }
    Ok(rgb)
}
