// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Bildwerk.

use thiserror::Error;

/// Top-level error type for all Bildwerk operations.
///
/// Every transform either returns a complete output image or one of these;
/// no operation hands back a partially written buffer.
#[derive(Debug, Error)]
pub enum BildwerkError {
    // -- Input validation --
    #[error("invalid image: {width}x{height} has no pixels")]
    InvalidImage { width: u32, height: u32 },

    #[error(
        "image dimensions differ: expected {}x{}, got {}x{}",
        expected.0, expected.1, actual.0, actual.1
    )]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    // -- Pixel arithmetic --
    #[error("channel {channel} overflowed the 8-bit range: {value}")]
    ChannelOverflow { channel: &'static str, value: i64 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // -- Codec / persistence --
    #[error("image codec failed: {0}")]
    ImageError(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, BildwerkError>;
