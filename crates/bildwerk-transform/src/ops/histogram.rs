// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Intensity histogram — greyscale conversion, tally, and bar-chart rendering.

use bildwerk_core::config::HistogramConfig;
use bildwerk_core::error::Result;
use bildwerk_core::types::{HistogramTable, INTENSITY_LEVELS};
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use tracing::{debug, info, instrument, warn};

use super::pixel::{ensure_valid, luma};

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

/// Everything the histogram pass produces.
#[derive(Debug, Clone)]
pub struct HistogramReport {
    /// Pixel count per intensity.
    pub table: HistogramTable,
    /// `256 x chart_height` bar chart, black bars on white.
    pub chart: RgbImage,
    /// The source after the in-place greyscale conversion pass.
    pub greyscaled: RgbImage,
}

/// Compute and render the intensity histogram of `source`.
///
/// The source is taken by value and greyscaled in place; the converted
/// buffer comes back as [`HistogramReport::greyscaled`]. Callers that still
/// need the original colors must keep their own copy.
///
/// ## Passes
///
/// 1. Overwrite each pixel with `(grey, grey, grey)`, `grey = (R+G+B)/3`
/// 2. Count pixels per grey value
/// 3. Draw one bar per intensity, `min(count / bin_scale, chart_height - 1)`
///    pixels tall, rising from the bottom row
#[instrument(skip_all, fields(width = source.width(), height = source.height()))]
pub fn histogram(mut source: RgbImage, config: &HistogramConfig) -> Result<HistogramReport> {
    ensure_valid(&source)?;
    config.validate()?;

    info!("Computing intensity histogram");

    greyscale_in_place(&mut source);
    let table = tally(&source);
    debug!(
        total = table.total(),
        peak = ?table.max_bin(),
        "Histogram tallied"
    );

    let chart = render_chart(&table, config);

    Ok(HistogramReport {
        table,
        chart,
        greyscaled: source,
    })
}

/// Count the pixels of `image` per intensity.
pub fn tally(image: &RgbImage) -> HistogramTable {
    let mut table = HistogramTable::new();
    for pixel in image.pixels() {
        table.increment(luma(pixel));
    }
    table
}

/// Render `table` as a white chart with one black bar per intensity column.
pub fn render_chart(table: &HistogramTable, config: &HistogramConfig) -> RgbImage {
    let height = config.chart_height;
    let mut chart = RgbImage::from_pixel(INTENSITY_LEVELS as u32, height, WHITE);

    let max_bar = height.saturating_sub(1) as u64;
    let mut clipped = 0usize;
    for (intensity, count) in table.iter() {
        let scaled = count / config.bin_scale.max(1) as u64;
        if scaled > max_bar {
            clipped += 1;
        }
        let bar = scaled.min(max_bar) as u32;
        if bar == 0 {
            continue;
        }
        let top = (height - bar) as i32;
        draw_filled_rect_mut(&mut chart, Rect::at(intensity as i32, top).of_size(1, bar), BLACK);
    }

    if clipped > 0 {
        warn!(clipped, max_bar, "Histogram bars clipped at chart height");
    }

    chart
}

fn greyscale_in_place(image: &mut RgbImage) {
    for pixel in image.pixels_mut() {
        let grey = luma(pixel);
        *pixel = Rgb([grey, grey, grey]);
    }
}
