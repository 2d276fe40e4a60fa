// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image I/O adapter — decode files or bytes into 8-bit RGB buffers and encode
// buffers back out. The transform operations never touch the filesystem;
// this is the boundary callers use around them.

use std::io::Cursor;
use std::path::Path;

use bildwerk_core::error::{BildwerkError, Result};
use image::{DynamicImage, ImageFormat, ImageReader, RgbImage};
use tracing::{debug, info, instrument};

/// Decode the file at `path` into an RGB buffer. The container format is
/// sniffed from the leading bytes, so a misnamed extension still decodes.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn open(path: impl AsRef<Path>) -> Result<RgbImage> {
    let path = path.as_ref();
    let reader = ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|err| {
            BildwerkError::Io(std::io::Error::new(
                err.kind(),
                format!("{}: {err}", path.display()),
            ))
        })?;
    let decoded = reader
        .decode()
        .map_err(|err| BildwerkError::ImageError(format!("{}: {err}", path.display())))?;

    let rgb = flatten_to_rgb(decoded);
    info!(width = rgb.width(), height = rgb.height(), "Image loaded");
    Ok(rgb)
}

/// Decode an in-memory encoded image (PNG, BMP, JPEG, ...).
#[instrument(skip(data), fields(data_len = data.len()))]
pub fn from_bytes(data: &[u8]) -> Result<RgbImage> {
    let decoded = ImageReader::new(Cursor::new(data))
        .with_guessed_format()?
        .decode()
        .map_err(|err| BildwerkError::ImageError(format!("in-memory image: {err}")))?;
    Ok(flatten_to_rgb(decoded))
}

/// Drop any alpha channel and widen or narrow samples to 8-bit RGB.
fn flatten_to_rgb(decoded: DynamicImage) -> RgbImage {
    let color = decoded.color();
    if color != image::ColorType::Rgb8 {
        debug!(?color, "Converting decoded pixels to RGB8");
    }
    decoded.into_rgb8()
}

/// Write the image to a file. The format is inferred from the file extension.
#[instrument(skip(image), fields(path = %path.as_ref().display()))]
pub fn save(image: &RgbImage, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    image
        .save(path)
        .map_err(|err| BildwerkError::ImageError(format!("{}: {err}", path.display())))?;
    debug!("Image saved");
    Ok(())
}

/// Encode the image as PNG bytes.
pub fn to_png_bytes(image: &RgbImage) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .map_err(|err| BildwerkError::ImageError(format!("PNG encoding failed: {err}")))?;
    Ok(buffer)
}
