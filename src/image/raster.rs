//! Owned contiguous RGB raster.

use crate::image::{ImageView, Rgb};
use crate::util::{ShiftDiffError, ShiftDiffResult};

/// Owned contiguous RGB image buffer (`stride == width`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbImage {
    data: Vec<Rgb>,
    width: usize,
    height: usize,
}

impl RgbImage {
    /// Creates an image from a row-major buffer of exactly `width * height` pixels.
    pub fn new(data: Vec<Rgb>, width: usize, height: usize) -> ShiftDiffResult<Self> {
        let needed = pixel_count(width, height)?;
        if data.len() < needed {
            return Err(ShiftDiffError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        if data.len() > needed {
            return Err(ShiftDiffError::InvalidDimensions { width, height });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Creates an image filled with a single color.
    pub fn filled(width: usize, height: usize, color: Rgb) -> ShiftDiffResult<Self> {
        let needed = pixel_count(width, height)?;
        Ok(Self {
            data: vec![color; needed],
            width,
            height,
        })
    }

    /// Creates an image from packed `0x??RRGGBB` values.
    pub fn from_packed(packed: &[u32], width: usize, height: usize) -> ShiftDiffResult<Self> {
        let data = packed.iter().copied().map(Rgb::from_packed).collect();
        Self::new(data, width, height)
    }

    /// Deep-copies a (possibly strided) view into a contiguous buffer.
    pub fn from_view(view: ImageView<'_, Rgb>) -> ShiftDiffResult<Self> {
        let width = view.width();
        let height = view.height();
        let mut data = Vec::with_capacity(pixel_count(width, height)?);
        for y in 0..height {
            let row = view.row(y).ok_or(ShiftDiffError::BufferTooSmall {
                needed: (y + 1).saturating_mul(view.stride()),
                got: y.saturating_mul(view.stride()),
            })?;
            data.extend_from_slice(row);
        }
        Self::new(data, width, height)
    }

    /// Returns a borrowed view of the image.
    pub fn view(&self) -> ImageView<'_, Rgb> {
        ImageView {
            data: &self.data,
            width: self.width,
            height: self.height,
            stride: self.width,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the row-major pixel buffer.
    pub fn data(&self) -> &[Rgb] {
        &self.data
    }

    /// Consumes the image and returns its pixel buffer.
    pub fn into_data(self) -> Vec<Rgb> {
        self.data
    }

    /// Returns the pixel at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x).copied()
    }

    /// Overwrites the pixel at `(x, y)`; out-of-bounds writes are ignored.
    pub fn put(&mut self, x: usize, y: usize, color: Rgb) {
        if x < self.width && y < self.height {
            self.data[y * self.width + x] = color;
        }
    }
}

fn pixel_count(width: usize, height: usize) -> ShiftDiffResult<usize> {
    if width == 0 || height == 0 {
        return Err(ShiftDiffError::InvalidDimensions { width, height });
    }
    width
        .checked_mul(height)
        .ok_or(ShiftDiffError::InvalidDimensions { width, height })
}
