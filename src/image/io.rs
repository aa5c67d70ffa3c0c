//! Convenience helpers for loading and saving images via the `image` crate.
//!
//! Available when the `image-io` feature is enabled. Alpha is discarded on
//! load; comparisons only see the RGB channels.

use crate::image::{Rgb, RgbImage};
use crate::util::{ShiftDiffError, ShiftDiffResult};
use std::path::Path;

/// Creates an owned image from an 8-bit RGB image buffer.
pub fn owned_from_rgb_image(img: &image::RgbImage) -> ShiftDiffResult<RgbImage> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    let data = img.pixels().map(|p| Rgb::from(p.0)).collect();
    RgbImage::new(data, width, height)
}

/// Creates an owned image from a dynamic image, converting to 8-bit RGB.
pub fn owned_from_dynamic_image(img: &image::DynamicImage) -> ShiftDiffResult<RgbImage> {
    owned_from_rgb_image(&img.to_rgb8())
}

/// Converts an owned image into an `image` crate buffer for encoding.
pub fn to_rgb_buffer(img: &RgbImage) -> ShiftDiffResult<image::RgbImage> {
    let width = u32::try_from(img.width()).map_err(|_| ShiftDiffError::InvalidDimensions {
        width: img.width(),
        height: img.height(),
    })?;
    let height = u32::try_from(img.height()).map_err(|_| ShiftDiffError::InvalidDimensions {
        width: img.width(),
        height: img.height(),
    })?;
    let raw: Vec<u8> = img
        .data()
        .iter()
        .flat_map(|c| <[u8; 3]>::from(*c))
        .collect();
    image::RgbImage::from_raw(width, height, raw).ok_or(ShiftDiffError::BufferTooSmall {
        needed: img.width() * img.height() * 3,
        got: img.data().len() * 3,
    })
}

/// Loads an image from disk and converts it to an owned RGB image.
pub fn load_rgb_image<P: AsRef<Path>>(path: P) -> ShiftDiffResult<RgbImage> {
    let img = image::open(path).map_err(|err| ShiftDiffError::ImageIo {
        reason: err.to_string(),
    })?;
    owned_from_dynamic_image(&img)
}

/// Encodes an owned image to disk; the format follows the file extension.
pub fn save_rgb_image<P: AsRef<Path>>(img: &RgbImage, path: P) -> ShiftDiffResult<()> {
    to_rgb_buffer(img)?
        .save(path)
        .map_err(|err| ShiftDiffError::ImageIo {
            reason: err.to_string(),
        })
}
