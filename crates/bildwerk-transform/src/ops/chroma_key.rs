// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Chroma-key background subtraction. Foreground pixels whose intensity lies
// within `threshold` of the key color's intensity are replaced by the
// background pixel at the same coordinate.
//
// Only average intensity is compared, not hue: a dark grey or any other
// color averaging close to the key's luma is keyed out as well.

use bildwerk_core::config::ChromaKeyConfig;
use bildwerk_core::error::Result;
use image::{ImageBuffer, Rgb, RgbImage};
use tracing::{debug, info, instrument};

use super::pixel::{ensure_same_dimensions, ensure_valid, luma};

/// Whether `pixel` is close enough to the key color to be replaced.
pub fn is_key_pixel(pixel: &Rgb<u8>, config: &ChromaKeyConfig) -> bool {
    let distance = (luma(pixel) as i32 - config.key_luma() as i32).unsigned_abs();
    distance <= config.threshold
}

/// Composite `foreground` over `background`, dropping key-colored pixels.
///
/// Both images must be non-empty and share the same dimensions.
#[instrument(
    skip_all,
    fields(
        width = foreground.width(),
        height = foreground.height(),
        key = ?config.key_color,
        threshold = config.threshold,
    )
)]
pub fn subtract(
    foreground: &RgbImage,
    background: &RgbImage,
    config: &ChromaKeyConfig,
) -> Result<RgbImage> {
    ensure_valid(foreground)?;
    ensure_valid(background)?;
    ensure_same_dimensions(foreground, background)?;

    info!(key_luma = config.key_luma(), "Subtracting key color");

    let mut keyed = 0u64;
    let out = ImageBuffer::from_fn(foreground.width(), foreground.height(), |x, y| {
        let pixel = foreground.get_pixel(x, y);
        if is_key_pixel(pixel, config) {
            keyed += 1;
            *background.get_pixel(x, y)
        } else {
            *pixel
        }
    });

    debug!(keyed, "Chroma key complete");
    Ok(out)
}
