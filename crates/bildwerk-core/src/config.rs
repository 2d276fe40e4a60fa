// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Engine configuration: sepia tone matrix, chroma-key parameters, and
// histogram chart geometry.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{BildwerkError, Result};
use crate::types::ClampPolicy;

/// Classic sepia tone rows, one per output channel (R, G, B).
pub const DEFAULT_SEPIA_MATRIX: [[f64; 3]; 3] = [
    [0.393, 0.769, 0.189],
    [0.349, 0.686, 0.168],
    [0.272, 0.534, 0.131],
];

/// Parameters for chroma-key background subtraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChromaKeyConfig {
    /// The solid color the foreground was shot against.
    pub key_color: [u8; 3],
    /// Maximum luma distance from the key that still counts as key.
    pub threshold: u32,
}

impl ChromaKeyConfig {
    /// Average intensity of the key color (integer floor).
    pub fn key_luma(&self) -> u8 {
        let [r, g, b] = self.key_color;
        ((r as u16 + g as u16 + b as u16) / 3) as u8
    }
}

impl Default for ChromaKeyConfig {
    fn default() -> Self {
        Self {
            key_color: [0, 0, 255],
            threshold: 5,
        }
    }
}

/// Parameters for the sepia tone map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SepiaConfig {
    /// Row `i` holds the R, G, B weights for output channel `i`.
    pub matrix: [[f64; 3]; 3],
    pub clamp: ClampPolicy,
}

impl Default for SepiaConfig {
    fn default() -> Self {
        Self {
            matrix: DEFAULT_SEPIA_MATRIX,
            clamp: ClampPolicy::Symmetric,
        }
    }
}

/// Geometry of the rendered histogram chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistogramConfig {
    /// Pixels counted per bar pixel.
    pub bin_scale: u32,
    /// Chart height in pixels. The width is always 256.
    pub chart_height: u32,
}

impl Default for HistogramConfig {
    fn default() -> Self {
        Self {
            bin_scale: 5,
            chart_height: 800,
        }
    }
}

impl HistogramConfig {
    pub fn validate(&self) -> Result<()> {
        if self.bin_scale == 0 {
            return Err(BildwerkError::InvalidConfig(
                "histogram bin_scale must be at least 1".into(),
            ));
        }
        if self.chart_height == 0 {
            return Err(BildwerkError::InvalidConfig(
                "histogram chart_height must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Complete engine settings, persisted as pretty-printed JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub sepia: SepiaConfig,
    pub chroma_key: ChromaKeyConfig,
    pub histogram: HistogramConfig,
}

impl EngineConfig {
    /// Read a configuration file. Fields missing from the file keep their
    /// defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&data)?;
        config.validate()?;
        info!(path = %path.display(), "Engine config loaded");
        Ok(config)
    }

    /// Write the configuration as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        debug!(path = %path.display(), "Engine config saved");
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.histogram.validate()?;
        if self.sepia.matrix.iter().flatten().any(|w| !w.is_finite()) {
            return Err(BildwerkError::InvalidConfig(
                "sepia matrix weights must be finite".into(),
            ));
        }
        Ok(())
    }
}
