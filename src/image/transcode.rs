//! Image transcoding to lossy WebP.
//!
//! Decode (format sniffed from the bytes) → flatten to RGB → downscale to a
//! maximum width → encode. The output is written atomically: a failed encode
//! or write never leaves a valid-looking file behind.

use std::path::{Path, PathBuf};

use image::{RgbImage, imageops::FilterType};
use thiserror::Error;

use crate::config::ImageConfig;
use crate::utils::path::write_atomic;

/// libwebp effort level, 0 (fast) to 6 (smallest output).
const WEBP_METHOD: i32 = 6;

#[derive(Debug, Error)]
pub enum TranscodeError {
    #[error("failed to decode image")]
    Decode(#[from] image::ImageError),

    #[error("image has zero width or height")]
    Empty,

    #[error("WebP encoding failed: {0}")]
    Encode(String),

    #[error("failed to write `{0}`")]
    Io(PathBuf, #[source] std::io::Error),
}

/// Dimensions and size of a written file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transcoded {
    pub width: u32,
    pub height: u32,
    pub bytes: usize,
}

/// Decode and flatten. Alpha and palettes are dropped: inputs are photos.
pub fn decode(bytes: &[u8]) -> Result<RgbImage, TranscodeError> {
    let img = image::load_from_memory(bytes)?;
    if img.width() == 0 || img.height() == 0 {
        return Err(TranscodeError::Empty);
    }
    Ok(img.to_rgb8())
}

/// Output size for an image fitted to `max_width`.
///
/// Never upscales. Height keeps the aspect ratio, rounded to nearest.
pub fn target_size(width: u32, height: u32, max_width: u32) -> (u32, u32) {
    if width <= max_width {
        return (width, height);
    }
    let scaled = (f64::from(height) * f64::from(max_width) / f64::from(width)).round();
    // scaled <= height, which fits in u32
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let scaled = scaled as u32;
    (max_width, scaled.max(1))
}

/// Downscale `img` to at most `max_width` pixels wide (Lanczos3).
pub fn fit_width(img: &RgbImage, max_width: u32) -> Option<RgbImage> {
    let (width, height) = img.dimensions();
    let (new_width, new_height) = target_size(width, height, max_width);
    (new_width != width)
        .then(|| image::imageops::resize(img, new_width, new_height, FilterType::Lanczos3))
}

/// Encode RGB pixels as lossy WebP.
pub fn encode_webp(img: &RgbImage, quality: u8) -> Result<Vec<u8>, TranscodeError> {
    let (width, height) = img.dimensions();
    let encoder = webp::Encoder::from_rgb(img.as_raw(), width, height);

    let mut config = webp::WebPConfig::new()
        .map_err(|()| TranscodeError::Encode("invalid encoder configuration".into()))?;
    config.quality = f32::from(quality);
    config.method = WEBP_METHOD;

    let memory = encoder
        .encode_advanced(&config)
        .map_err(|err| TranscodeError::Encode(format!("{err:?}")))?;
    Ok(memory.to_vec())
}

/// Fit, encode and write one output file.
pub fn write_webp(
    img: &RgbImage,
    max_width: u32,
    config: &ImageConfig,
    dest: &Path,
) -> Result<Transcoded, TranscodeError> {
    let resized = fit_width(img, max_width);
    let img = resized.as_ref().unwrap_or(img);

    let webp = encode_webp(img, config.quality)?;
    write_atomic(dest, &webp).map_err(|err| TranscodeError::Io(dest.to_path_buf(), err))?;

    let (width, height) = img.dimensions();
    Ok(Transcoded {
        width,
        height,
        bytes: webp.len(),
    })
}

#[cfg(test)]
pub(crate) fn test_png(width: u32, height: u32) -> Vec<u8> {
    use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    let img = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, 128, if x % 2 == 0 { 255 } else { 64 }])
    });
    let mut buf = Vec::new();
    DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .unwrap();
    buf
}
