//! RGB raster views and owned buffers.
//!
//! `ImageView` is a borrowed 2D view into a 1D buffer with an explicit stride.
//! The stride counts elements between the starts of consecutive rows, so a
//! stride larger than the width represents padded rows. Comparison inputs are
//! `ImageView<'_, Rgb>`; rendered outputs are owned [`RgbImage`] buffers.

use crate::util::{ShiftDiffError, ShiftDiffResult};

#[cfg(feature = "image-io")]
pub mod io;
mod pixel;
mod raster;

pub use pixel::{Pixel, Rgb};
pub use raster::RgbImage;

/// Borrowed 2D image view with an explicit stride.
#[derive(Copy, Clone, Debug)]
pub struct ImageView<'a, T> {
    data: &'a [T],
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a, T> ImageView<'a, T> {
    /// Creates a contiguous view with `stride == width`.
    pub fn from_slice(data: &'a [T], width: usize, height: usize) -> ShiftDiffResult<Self> {
        Self::new(data, width, height, width)
    }

    /// Creates a view with an explicit stride.
    pub fn new(data: &'a [T], width: usize, height: usize, stride: usize) -> ShiftDiffResult<Self> {
        let needed = required_len(width, height, stride)?;
        if data.len() < needed {
            return Err(ShiftDiffError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the stride in elements between row starts.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns `(width, height)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Returns the element at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<&'a T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y.checked_mul(self.stride)?.checked_add(x)?;
        self.data.get(idx)
    }

    /// Returns a contiguous slice for row `y` with length `width`.
    pub fn row(&self, y: usize) -> Option<&'a [T]> {
        if y >= self.height {
            return None;
        }
        let start = y.checked_mul(self.stride)?;
        let end = start.checked_add(self.width)?;
        self.data.get(start..end)
    }
}

impl<'a, T: Copy> ImageView<'a, T> {
    /// Reads the element at `(x, y)` for coordinates already known to be in bounds.
    ///
    /// Callers in the matcher clamp coordinates before reading, and the view
    /// constructor guarantees the buffer covers every in-bounds index.
    #[inline]
    pub(crate) fn at(&self, x: usize, y: usize) -> T {
        debug_assert!(x < self.width && y < self.height);
        self.data[y * self.stride + x]
    }
}

fn required_len(width: usize, height: usize, stride: usize) -> ShiftDiffResult<usize> {
    if width == 0 || height == 0 {
        return Err(ShiftDiffError::InvalidDimensions { width, height });
    }
    if stride < width {
        return Err(ShiftDiffError::InvalidStride { width, stride });
    }
    let needed = (height - 1)
        .checked_mul(stride)
        .and_then(|v| v.checked_add(width))
        .ok_or(ShiftDiffError::InvalidDimensions { width, height })?;
    Ok(needed)
}
