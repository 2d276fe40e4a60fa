// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// bildwerk-transform — The pixel transform engine.
//
// Provides elementwise maps (copy, greyscale, inversion, sepia), intensity
// histogram computation and chart rendering, chroma-key background
// subtraction, and a thin image I/O adapter for loading and saving buffers.

pub mod engine;
pub mod io;
pub mod ops;

// Re-export the primary entry points so callers can use
// `bildwerk_transform::sepia` etc.
pub use engine::{Engine, EngineOutput};
pub use ops::chroma_key::{is_key_pixel, subtract};
pub use ops::elementwise::{copy, greyscale, invert, sepia};
pub use ops::histogram::{HistogramReport, histogram, render_chart, tally};
pub use ops::pixel::luma;
