// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Elementwise maps — copy, greyscale, inversion, and sepia tone. Each reads
// the source and writes a new buffer of identical dimensions.

use bildwerk_core::config::SepiaConfig;
use bildwerk_core::error::{BildwerkError, Result};
use bildwerk_core::types::ClampPolicy;
use image::{Rgb, RgbImage};
use tracing::{debug, info, instrument};

use super::pixel::{ensure_valid, luma, map_pixels, try_map_pixels};

const CHANNEL_NAMES: [&str; 3] = ["r", "g", "b"];

/// Duplicate `src` into a new, independently owned buffer.
#[instrument(skip_all, fields(width = src.width(), height = src.height()))]
pub fn copy(src: &RgbImage) -> Result<RgbImage> {
    ensure_valid(src)?;
    debug!("Copying image");
    Ok(src.clone())
}

/// Replace each pixel with its floored channel average on all three channels.
#[instrument(skip_all, fields(width = src.width(), height = src.height()))]
pub fn greyscale(src: &RgbImage) -> Result<RgbImage> {
    ensure_valid(src)?;
    info!("Converting to greyscale");
    Ok(map_pixels(src, |pixel| {
        let grey = luma(pixel);
        Rgb([grey, grey, grey])
    }))
}

/// Invert every channel: `255 - c`.
#[instrument(skip_all, fields(width = src.width(), height = src.height()))]
pub fn invert(src: &RgbImage) -> Result<RgbImage> {
    ensure_valid(src)?;
    info!("Inverting colors");
    Ok(map_pixels(src, |pixel| {
        let [r, g, b] = pixel.0;
        Rgb([255 - r, 255 - g, 255 - b])
    }))
}

/// Apply the sepia tone matrix from `config`.
///
/// Each output channel is the dot product of its matrix row with the source
/// `(R, G, B)`, computed in `f64` and truncated toward zero. Values above 255
/// always clamp to 255. Negative values clamp to 0 under
/// [`ClampPolicy::Symmetric`] and fail with
/// [`BildwerkError::ChannelOverflow`] under [`ClampPolicy::UpperOnlyLegacy`].
#[instrument(skip_all, fields(width = src.width(), height = src.height(), clamp = ?config.clamp))]
pub fn sepia(src: &RgbImage, config: &SepiaConfig) -> Result<RgbImage> {
    ensure_valid(src)?;
    info!("Applying sepia tone");

    try_map_pixels(src, |pixel| {
        let mut out = [0u8; 3];
        for (channel, weights) in config.matrix.iter().enumerate() {
            out[channel] = sepia_channel(weights, pixel.0, channel, config.clamp)?;
        }
        Ok(Rgb(out))
    })
}

fn sepia_channel(
    weights: &[f64; 3],
    [r, g, b]: [u8; 3],
    channel: usize,
    clamp: ClampPolicy,
) -> Result<u8> {
    let value = (weights[0] * r as f64 + weights[1] * g as f64 + weights[2] * b as f64) as i64;
    match clamp {
        ClampPolicy::Symmetric => Ok(value.clamp(0, 255) as u8),
        ClampPolicy::UpperOnlyLegacy if value < 0 => Err(BildwerkError::ChannelOverflow {
            channel: CHANNEL_NAMES[channel],
            value,
        }),
        ClampPolicy::UpperOnlyLegacy => Ok(value.min(255) as u8),
    }
}
