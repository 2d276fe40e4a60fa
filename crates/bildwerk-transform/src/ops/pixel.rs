// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Shared pixel primitives: intensity, input validation, and per-pixel maps
// into freshly allocated buffers.

use bildwerk_core::error::{BildwerkError, Result};
use image::{ImageBuffer, Rgb, RgbImage};

/// Unweighted average of the three channels, floored.
#[inline]
pub fn luma(pixel: &Rgb<u8>) -> u8 {
    let [r, g, b] = pixel.0;
    ((r as u16 + g as u16 + b as u16) / 3) as u8
}

/// Reject images with no pixels.
pub fn ensure_valid(image: &RgbImage) -> Result<()> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(BildwerkError::InvalidImage { width, height });
    }
    Ok(())
}

/// Reject a pair of images whose dimensions differ.
pub fn ensure_same_dimensions(expected: &RgbImage, actual: &RgbImage) -> Result<()> {
    if expected.dimensions() != actual.dimensions() {
        return Err(BildwerkError::DimensionMismatch {
            expected: expected.dimensions(),
            actual: actual.dimensions(),
        });
    }
    Ok(())
}

/// Apply `f` to every pixel of `src`, writing into a new image of the same
/// size.
pub fn map_pixels<F>(src: &RgbImage, f: F) -> RgbImage
where
    F: Fn(&Rgb<u8>) -> Rgb<u8>,
{
    ImageBuffer::from_fn(src.width(), src.height(), |x, y| f(src.get_pixel(x, y)))
}

/// Fallible [`map_pixels`]. The first error aborts the map and the partially
/// written buffer is dropped.
pub fn try_map_pixels<F>(src: &RgbImage, f: F) -> Result<RgbImage>
where
    F: Fn(&Rgb<u8>) -> Result<Rgb<u8>>,
{
    let mut out = RgbImage::new(src.width(), src.height());
    for (dst, pixel) in out.pixels_mut().zip(src.pixels()) {
        *dst = f(pixel)?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn luma_floors_without_overflow() {
        assert_eq!(luma(&Rgb([255, 255, 255])), 255);
        assert_eq!(luma(&Rgb([0, 0, 255])), 85);
        assert_eq!(luma(&Rgb([1, 1, 0])), 0);
        assert_eq!(luma(&Rgb([100, 50, 21])), 57);
    }

    #[test]
    fn zero_sized_images_are_invalid() {
        let empty = RgbImage::new(0, 4);
        assert!(matches!(
            ensure_valid(&empty),
            Err(BildwerkError::InvalidImage { width: 0, height: 4 })
        ));
        assert!(ensure_valid(&RgbImage::new(1, 1)).is_ok());
    }

    #[test]
    fn dimension_check_reports_both_sizes() {
        let a = RgbImage::new(2, 1);
        let b = RgbImage::new(1, 2);
        match ensure_same_dimensions(&a, &b) {
            Err(BildwerkError::DimensionMismatch { expected, actual }) => {
                assert_eq!(expected, (2, 1));
                assert_eq!(actual, (1, 2));
            }
            other => panic!("expected DimensionMismatch, got {other:?}"),
        }
    }

    #[test]
    fn try_map_stops_at_first_error() {
        let src = RgbImage::from_pixel(3, 3, Rgb([7, 7, 7]));
        let result = try_map_pixels(&src, |_| {
            Err(BildwerkError::ChannelOverflow {
                channel: "r",
                value: -1,
            })
        });
        assert!(result.is_err());
    }
}
