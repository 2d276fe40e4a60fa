// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Bildwerk transform engine.

use serde::{Deserialize, Serialize};

/// Number of distinct 8-bit intensity values.
pub const INTENSITY_LEVELS: usize = 256;

/// How an out-of-range channel value is brought back into `[0, 255]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClampPolicy {
    /// Clamp to `[0, 255]` on both ends.
    #[default]
    Symmetric,
    /// Clamp only values above 255. A negative intermediate is reported as
    /// `BildwerkError::ChannelOverflow` instead of being stored.
    UpperOnlyLegacy,
}

impl ClampPolicy {
    /// Parse a policy name as used on the command line.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "symmetric" => Some(Self::Symmetric),
            "legacy" | "upper_only_legacy" | "upper-only" => Some(Self::UpperOnlyLegacy),
            _ => None,
        }
    }
}

/// Per-intensity pixel counts of a greyscale image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistogramTable([u64; INTENSITY_LEVELS]);

impl HistogramTable {
    pub fn new() -> Self {
        Self([0; INTENSITY_LEVELS])
    }

    /// Count one more pixel at `intensity`.
    pub fn increment(&mut self, intensity: u8) {
        self.0[intensity as usize] += 1;
    }

    /// Number of pixels with the given intensity.
    pub fn count(&self, intensity: u8) -> u64 {
        self.0[intensity as usize]
    }

    /// Total number of pixels tallied.
    pub fn total(&self) -> u64 {
        self.0.iter().sum()
    }

    /// The most populated bin (lowest intensity wins ties), or `None` when
    /// nothing has been counted.
    pub fn max_bin(&self) -> Option<u8> {
        let mut best: Option<(u8, u64)> = None;
        for (intensity, count) in self.iter() {
            if count == 0 {
                continue;
            }
            match best {
                Some((_, best_count)) if best_count >= count => {}
                _ => best = Some((intensity, count)),
            }
        }
        best.map(|(intensity, _)| intensity)
    }

    /// Iterate `(intensity, count)` pairs in ascending intensity order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.0
            .iter()
            .enumerate()
            .map(|(intensity, &count)| (intensity as u8, count))
    }
}

impl Default for HistogramTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Every operation the engine exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Copy,
    Greyscale,
    Invert,
    Sepia,
    Histogram,
    /// Chroma-key background subtraction (foreground + background).
    Subtract,
}

impl Operation {
    pub const ALL: [Operation; 6] = [
        Self::Copy,
        Self::Greyscale,
        Self::Invert,
        Self::Sepia,
        Self::Histogram,
        Self::Subtract,
    ];

    /// Parse an operation name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "copy" => Some(Self::Copy),
            "greyscale" | "grayscale" => Some(Self::Greyscale),
            "invert" | "inversion" => Some(Self::Invert),
            "sepia" => Some(Self::Sepia),
            "histogram" => Some(Self::Histogram),
            "subtract" | "chroma-key" | "chroma_key" => Some(Self::Subtract),
            _ => None,
        }
    }

    /// Canonical lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Copy => "copy",
            Self::Greyscale => "greyscale",
            Self::Invert => "invert",
            Self::Sepia => "sepia",
            Self::Histogram => "histogram",
            Self::Subtract => "subtract",
        }
    }

    /// How many source images the operation consumes.
    pub fn input_count(&self) -> usize {
        match self {
            Self::Subtract => 2,
            _ => 1,
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operation_names_round_trip() {
        for op in Operation::ALL {
            assert_eq!(Operation::from_name(op.name()), Some(op));
        }
    }

    #[test]
    fn operation_aliases() {
        assert_eq!(Operation::from_name("GrayScale"), Some(Operation::Greyscale));
        assert_eq!(Operation::from_name("chroma-key"), Some(Operation::Subtract));
        assert_eq!(Operation::from_name("blur"), None);
    }

    #[test]
    fn only_subtract_takes_two_inputs() {
        for op in Operation::ALL {
            let expected = if op == Operation::Subtract { 2 } else { 1 };
            assert_eq!(op.input_count(), expected, "{op}");
        }
    }

    #[test]
    fn clamp_policy_defaults_to_symmetric() {
        assert_eq!(ClampPolicy::default(), ClampPolicy::Symmetric);
        assert_eq!(ClampPolicy::from_name("legacy"), Some(ClampPolicy::UpperOnlyLegacy));
        assert_eq!(ClampPolicy::from_name("lower"), None);
    }

    #[test]
    fn clamp_policy_serializes_snake_case() {
        let json = serde_json::to_string(&ClampPolicy::UpperOnlyLegacy).unwrap();
        assert_eq!(json, "\"upper_only_legacy\"");
    }

    #[test]
    fn histogram_table_counts() {
        let mut table = HistogramTable::new();
        assert_eq!(table.max_bin(), None);

        table.increment(90);
        table.increment(90);
        table.increment(10);
        table.increment(200);
        table.increment(200);

        assert_eq!(table.count(90), 2);
        assert_eq!(table.count(0), 0);
        assert_eq!(table.total(), 5);
        // 90 and 200 tie; the lower intensity wins.
        assert_eq!(table.max_bin(), Some(90));
        assert_eq!(table.iter().filter(|&(_, c)| c > 0).count(), 3);
    }
}
