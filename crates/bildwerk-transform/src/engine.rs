// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Operation dispatch — runs a named operation against its source images with
// a fixed engine configuration.

use bildwerk_core::config::EngineConfig;
use bildwerk_core::error::{BildwerkError, Result};
use bildwerk_core::types::{HistogramTable, Operation};
use image::RgbImage;
use tracing::{info, instrument};

use crate::ops::{chroma_key, elementwise, histogram};

/// Stateless apart from its configuration; one engine can serve any number
/// of calls.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: EngineConfig,
}

/// Result of [`Engine::run`].
#[derive(Debug, Clone)]
pub struct EngineOutput {
    /// The produced image (the chart, for [`Operation::Histogram`]).
    pub image: RgbImage,
    /// Intensity counts, only set for [`Operation::Histogram`].
    pub histogram: Option<HistogramTable>,
}

impl EngineOutput {
    fn image(image: RgbImage) -> Self {
        Self {
            image,
            histogram: None,
        }
    }
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run `op` on `inputs`.
    ///
    /// Subtraction expects `[foreground, background]`; every other operation
    /// expects exactly one image. Inputs are never modified: the histogram
    /// pass greyscales its own copy.
    #[instrument(skip(self, inputs), fields(op = %op, inputs = inputs.len()))]
    pub fn run(&self, op: Operation, inputs: &[RgbImage]) -> Result<EngineOutput> {
        if inputs.len() != op.input_count() {
            return Err(BildwerkError::InvalidConfig(format!(
                "{op} takes {} input image(s), got {}",
                op.input_count(),
                inputs.len()
            )));
        }

        let output = match op {
            Operation::Copy => EngineOutput::image(elementwise::copy(&inputs[0])?),
            Operation::Greyscale => EngineOutput::image(elementwise::greyscale(&inputs[0])?),
            Operation::Invert => EngineOutput::image(elementwise::invert(&inputs[0])?),
            Operation::Sepia => {
                EngineOutput::image(elementwise::sepia(&inputs[0], &self.config.sepia)?)
            }
            Operation::Histogram => {
                let report = histogram::histogram(inputs[0].clone(), &self.config.histogram)?;
                EngineOutput {
                    image: report.chart,
                    histogram: Some(report.table),
                }
            }
            Operation::Subtract => EngineOutput::image(chroma_key::subtract(
                &inputs[0],
                &inputs[1],
                &self.config.chroma_key,
            )?),
        };

        info!(
            width = output.image.width(),
            height = output.image.height(),
            "Operation complete"
        );
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bildwerk_core::types::ClampPolicy;
    use image::Rgb;

    fn grey_square() -> RgbImage {
        RgbImage::from_pixel(10, 10, Rgb([90, 90, 90]))
    }

    #[test]
    fn single_input_operations_dispatch_to_their_functions() {
        let engine = Engine::default();
        let src = RgbImage::from_fn(3, 7, |x, y| Rgb([(x * 70) as u8, 200, (y * 30) as u8]));
        let expected = [
            (Operation::Copy, elementwise::copy(&src).unwrap()),
            (Operation::Greyscale, elementwise::greyscale(&src).unwrap()),
            (Operation::Invert, elementwise::invert(&src).unwrap()),
            (
                Operation::Sepia,
                elementwise::sepia(&src, &engine.config().sepia).unwrap(),
            ),
        ];

        for (op, want) in &expected {
            let out = engine.run(*op, std::slice::from_ref(&src)).unwrap();
            assert_eq!(out.image, *want, "{op}");
            assert!(out.histogram.is_none());
        }
        // The four results are pairwise different, so a swapped arm cannot pass.
        for (i, (a, img_a)) in expected.iter().enumerate() {
            for (b, img_b) in &expected[i + 1..] {
                assert_ne!(img_a, img_b, "{a} vs {b}");
            }
        }
    }

    #[test]
    fn histogram_dispatch_matches_free_function() {
        let engine = Engine::default();
        let src = RgbImage::from_fn(6, 4, |x, y| Rgb([(x * 40) as u8, (y * 60) as u8, 17]));

        let out = engine.run(Operation::Histogram, std::slice::from_ref(&src)).unwrap();
        let report = histogram::histogram(src, &engine.config().histogram).unwrap();
        assert_eq!(out.image, report.chart);
        assert_eq!(out.histogram, Some(report.table));
    }

    #[test]
    fn histogram_returns_table_and_leaves_input_alone() {
        let engine = Engine::default();
        let src = RgbImage::from_pixel(4, 4, Rgb([0, 90, 180]));
        let inputs = [src.clone()];

        let out = engine.run(Operation::Histogram, &inputs).unwrap();
        assert_eq!(out.image.dimensions(), (256, 800));
        assert_eq!(out.histogram.unwrap().count(90), 16);
        assert_eq!(inputs[0], src);
    }

    #[test]
    fn subtract_uses_configured_key() {
        let mut config = EngineConfig::default();
        config.chroma_key.key_color = [90, 90, 90];
        config.chroma_key.threshold = 0;
        let engine = Engine::new(config);

        let background = RgbImage::from_pixel(10, 10, Rgb([1, 2, 3]));
        let out = engine
            .run(Operation::Subtract, &[grey_square(), background.clone()])
            .unwrap();
        assert_eq!(out.image, background);
    }

    #[test]
    fn sepia_uses_configured_clamp() {
        let mut config = EngineConfig::default();
        config.sepia.matrix = [[0.0, 0.0, -1.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
        config.sepia.clamp = ClampPolicy::UpperOnlyLegacy;
        let engine = Engine::new(config);

        let err = engine.run(Operation::Sepia, &[grey_square()]).unwrap_err();
        assert!(matches!(err, BildwerkError::ChannelOverflow { channel: "r", value: -90 }));
    }

    #[test]
    fn wrong_input_count_is_rejected() {
        let engine = Engine::default();
        assert!(matches!(
            engine.run(Operation::Subtract, &[grey_square()]),
            Err(BildwerkError::InvalidConfig(_))
        ));
        assert!(matches!(
            engine.run(Operation::Invert, &[]),
            Err(BildwerkError::InvalidConfig(_))
        ));
    }
}
