//! Raster views over surface-energy-balance products.
//!
//! `RasterView` is a borrowed 2D view into a 1D `f32` buffer with an explicit
//! stride. The stride counts elements between the starts of consecutive
//! lines, so ROI crops are zero-copy views that keep the parent stride.
//! NaN and infinite values mark invalid pixels.

use crate::util::{EndmemberError, EndmemberResult};

mod bands;
#[cfg(feature = "tiff-io")]
pub mod io;
mod owned;

pub use bands::SceneBands;
pub use owned::OwnedRaster;

/// Returns true when a pixel value carries a measurement.
#[inline]
pub fn is_valid(value: f32) -> bool {
    value.is_finite()
}

/// Borrowed 2D raster view with an explicit stride.
#[derive(Copy, Clone, Debug)]
pub struct RasterView<'a> {
    data: &'a [f32],
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a> RasterView<'a> {
    /// Creates a contiguous, row-major view with `stride == width`.
    pub fn from_slice(data: &'a [f32], width: usize, height: usize) -> EndmemberResult<Self> {
        Self::new(data, width, height, width)
    }

    /// Creates a view with an explicit stride.
    pub fn new(
        data: &'a [f32],
        width: usize,
        height: usize,
        stride: usize,
    ) -> EndmemberResult<Self> {
        let needed = required_len(width, height, stride)?;
        if data.len() < needed {
            return Err(EndmemberError::BufferTooSmall {
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

    /// Returns the raster width (columns).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the raster height (lines).
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the stride in elements between line starts.
    pub fn stride(&self) -> usize {
        self.stride
    }

    pub(crate) fn len(&self) -> usize {
        self.width * self.height
    }

    /// Returns the value at `(line, col)` if it is within bounds.
    pub fn get(&self, line: usize, col: usize) -> Option<f32> {
        if col >= self.width || line >= self.height {
            return None;
        }
        let idx = line.checked_mul(self.stride)?.checked_add(col)?;
        self.data.get(idx).copied()
    }

    /// Returns line `line` as a slice of length `width`.
    pub fn row(&self, line: usize) -> Option<&'a [f32]> {
        if line >= self.height {
            return None;
        }
        let start = line.checked_mul(self.stride)?;
        let end = start.checked_add(self.width)?;
        self.data.get(start..end)
    }

    /// Iterates over lines in order.
    pub fn rows(&self) -> impl Iterator<Item = &'a [f32]> {
        let view = *self;
        (0..self.height).filter_map(move |line| view.row(line))
    }

    /// Iterates over all finite values in row-major order.
    pub fn valid_values(&self) -> impl Iterator<Item = f32> + 'a {
        self.rows()
            .flat_map(|row| row.iter().copied())
            .filter(|&v| is_valid(v))
    }

    /// Returns a zero-copy crop starting at `(line, col)`.
    pub fn roi(
        &self,
        line: usize,
        col: usize,
        width: usize,
        height: usize,
    ) -> EndmemberResult<RasterView<'a>> {
        if width == 0 || height == 0 {
            return Err(EndmemberError::InvalidDimensions { width, height });
        }

        let out_of_bounds = EndmemberError::RoiOutOfBounds {
            col,
            line,
            width,
            height,
            raster_width: self.width,
            raster_height: self.height,
        };
        let end_col = col.checked_add(width).ok_or_else(|| out_of_bounds.clone())?;
        let end_line = line
            .checked_add(height)
            .ok_or_else(|| out_of_bounds.clone())?;
        if end_col > self.width || end_line > self.height {
            return Err(out_of_bounds);
        }

        let start = line
            .checked_mul(self.stride)
            .and_then(|v| v.checked_add(col))
            .ok_or(EndmemberError::InvalidDimensions {
                width: self.width,
                height: self.height,
            })?;
        let data = self
            .data
            .get(start..)
            .ok_or(EndmemberError::BufferTooSmall {
                needed: start.saturating_add(1),
                got: self.data.len(),
            })?;

        RasterView::new(data, width, height, self.stride)
    }
}

fn required_len(width: usize, height: usize, stride: usize) -> EndmemberResult<usize> {
    if width == 0 || height == 0 {
        return Err(EndmemberError::InvalidDimensions { width, height });
    }
    if stride < width {
        return Err(EndmemberError::InvalidStride { width, stride });
    }
    (height - 1)
        .checked_mul(stride)
        .and_then(|v| v.checked_add(width))
        .ok_or(EndmemberError::InvalidDimensions { width, height })
}
