//! Dense 2-D scalar grids.
//!
//! `ImageView` borrows a caller-owned buffer and is never mutated through the
//! view; `Image` owns its storage (every filter output is an `Image`, fully
//! disconnected from the input it was computed from). Dimensions are fixed at
//! construction and the buffer length is checked up front.

use thiserror::Error;

/// Errors raised when constructing a grid from a raw buffer.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ImageError {
    #[error("buffer length {got} does not match {width}x{height} = {expected}")]
    BufferLength {
        width: usize,
        height: usize,
        expected: usize,
        got: usize,
    },
    #[error("image has no samples")]
    EmptyImage,
}

/// Non-owning view of a row-major `f32` grid.
#[derive(Clone, Copy, Debug)]
pub struct ImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [f32], // row-major, len = w*h
}

/// Owned row-major `f32` grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    pub width: usize,
    pub height: usize,
    pub data: Vec<f32>,
}

/// Owned row-major `i32` grid, used for solver result buffers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<i32>,
}

fn check_len(width: usize, height: usize, got: usize) -> Result<(), ImageError> {
    let expected = width * height;
    if got != expected {
        return Err(ImageError::BufferLength {
            width,
            height,
            expected,
            got,
        });
    }
    Ok(())
}

impl<'a> ImageView<'a> {
    /// Wrap a caller-owned buffer, failing fast on a length mismatch.
    pub fn new(width: usize, height: usize, data: &'a [f32]) -> Result<Self, ImageError> {
        check_len(width, height, data.len())?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sample at `(x, y)`. Callers are expected to stay in bounds.
    #[inline]
    pub fn at(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.width + x]
    }

    /// Observed minimum and maximum sample values.
    pub fn min_max(&self) -> Result<(f32, f32), ImageError> {
        if self.is_empty() {
            return Err(ImageError::EmptyImage);
        }
        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        for &v in self.data {
            min = min.min(v);
            max = max.max(v);
        }
        Ok((min, max))
    }

    /// Standalone copy of the viewed buffer.
    pub fn to_owned_image(&self) -> Image {
        Image {
            width: self.width,
            height: self.height,
            data: self.data.to_vec(),
        }
    }
}

impl Image {
    /// Take ownership of a buffer, failing fast on a length mismatch.
    pub fn from_vec(width: usize, height: usize, data: Vec<f32>) -> Result<Self, ImageError> {
        check_len(width, height, data.len())?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Grid filled with a single value.
    pub fn filled(width: usize, height: usize, value: f32) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    /// Convert an 8-bit grayscale buffer into the float pipeline domain.
    pub fn from_luma8(width: usize, height: usize, data: &[u8]) -> Result<Self, ImageError> {
        check_len(width, height, data.len())?;
        Ok(Self {
            width,
            height,
            data: data.iter().map(|&v| v as f32).collect(),
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn at(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.width + x]
    }

    /// Borrow as a view for the next pipeline stage.
    #[inline]
    pub fn as_view(&self) -> ImageView<'_> {
        ImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }
}

impl LabelImage {
    pub fn from_vec(width: usize, height: usize, data: Vec<i32>) -> Result<Self, ImageError> {
        check_len(width, height, data.len())?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn zeros(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
