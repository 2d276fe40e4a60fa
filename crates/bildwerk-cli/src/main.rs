// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bildwerk — command-line front end.
//
// Entry point. Initialises logging, loads the engine configuration, decodes
// the inputs, runs one operation, and writes the result.

mod args;

use std::io::Write;

use anyhow::{Context, Result, bail};
use bildwerk_core::config::EngineConfig;
use bildwerk_core::types::{HistogramTable, Operation};
use bildwerk_transform::{Engine, io};
use clap::Parser;
use tracing::info;

use args::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();

    run(&cli, &mut std::io::stdout().lock())
}

/// Execute one command. Histogram bins go to `out` when requested.
fn run(cli: &Cli, out: &mut impl Write) -> Result<()> {
    check_flags(cli)?;

    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    let engine = Engine::new(cli.apply_overrides(config));

    let mut inputs = vec![
        io::open(&cli.input).with_context(|| format!("reading {}", cli.input.display()))?,
    ];
    if let Some(path) = &cli.background {
        inputs.push(io::open(path).with_context(|| format!("reading {}", path.display()))?);
    }

    let output = engine
        .run(cli.operation, &inputs)
        .with_context(|| format!("running {}", cli.operation))?;

    io::save(&output.image, &cli.output)
        .with_context(|| format!("writing {}", cli.output.display()))?;
    info!(op = %cli.operation, output = %cli.output.display(), "Result written");

    if let Some(table) = output.histogram.as_ref().filter(|_| cli.print_histogram) {
        print_histogram(table, out)?;
    }
    Ok(())
}

/// Reject flag combinations the operation cannot honour, before any file is
/// read or written.
fn check_flags(cli: &Cli) -> Result<()> {
    match (cli.operation, &cli.background) {
        (Operation::Subtract, None) => bail!("subtract needs a --background image"),
        (op, Some(_)) if op != Operation::Subtract => {
            bail!("{op} does not take a --background image")
        }
        _ => {}
    }
    if cli.print_histogram && cli.operation != Operation::Histogram {
        bail!("--print-histogram only applies to the histogram operation");
    }
    Ok(())
}

fn print_histogram(table: &HistogramTable, out: &mut impl Write) -> Result<()> {
    for (intensity, count) in table.iter().filter(|&(_, count)| count > 0) {
        writeln!(out, "{intensity} {count}")?;
    }
    Ok(())
}
