//! Owned contiguous raster buffers.

use crate::raster::RasterView;
use crate::util::{EndmemberError, EndmemberResult};

/// Owned, row-major `f32` raster.
#[derive(Clone, Debug)]
pub struct OwnedRaster {
    data: Vec<f32>,
    width: usize,
    height: usize,
}

impl OwnedRaster {
    /// Wraps a buffer of exactly `width * height` values.
    pub fn new(data: Vec<f32>, width: usize, height: usize) -> EndmemberResult<Self> {
        if width == 0 || height == 0 {
            return Err(EndmemberError::InvalidDimensions { width, height });
        }
        let needed = width
            .checked_mul(height)
            .ok_or(EndmemberError::InvalidDimensions { width, height })?;
        if data.len() < needed {
            return Err(EndmemberError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        if data.len() > needed {
            return Err(EndmemberError::InvalidDimensions { width, height });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Copies a (possibly strided) view into a contiguous buffer.
    pub fn from_view(view: RasterView<'_>) -> EndmemberResult<Self> {
        let mut data = Vec::with_capacity(view.len());
        for row in view.rows() {
            data.extend_from_slice(row);
        }
        Self::new(data, view.width(), view.height())
    }

    /// Returns a borrowed view of the raster.
    pub fn view(&self) -> RasterView<'_> {
        RasterView {
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
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }
}
