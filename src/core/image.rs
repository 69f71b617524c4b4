//! Immutable two-dimensional pixel grids.
//!
//! An [`Image`] owns its pixels in a row-major buffer. Every operation that changes
//! pixels returns a new image and leaves the receiver untouched.

use crate::core::error::{ModelError, ModelResult};
use crate::core::pixel::Pixel;
use crate::filters::{OneFilter, TwoFilter};

/// A height x width grid of pixels, both dimensions at least 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    height: usize,
    width: usize,
    pixels: Vec<Pixel>,
}

impl Image {
    /// Create an image filled with [`Pixel::BLANK`].
    pub fn blank(height: usize, width: usize) -> ModelResult<Self> {
        Self::filled(height, width, Pixel::BLANK)
    }

    /// Create an image where every pixel is `pixel`.
    pub fn filled(height: usize, width: usize, pixel: Pixel) -> ModelResult<Self> {
        let count = check_dimensions(height, width)?;
        Ok(Self {
            height,
            width,
            pixels: vec![pixel; count],
        })
    }

    /// Create an image from a row-major pixel buffer.
    pub fn from_pixels(height: usize, width: usize, pixels: Vec<Pixel>) -> ModelResult<Self> {
        let count = check_dimensions(height, width)?;
        if pixels.len() != count {
            return Err(ModelError::PixelCountMismatch {
                expected: count,
                found: pixels.len(),
            });
        }
        Ok(Self { height, width, pixels })
    }

    /// Create an image from rows of pixels. All rows must have the same width.
    pub fn from_rows(rows: Vec<Vec<Pixel>>) -> ModelResult<Self> {
        let height = rows.len();
        let width = rows.first().map(Vec::len).unwrap_or(0);
        let count = check_dimensions(height, width)?;

        let mut pixels = Vec::with_capacity(count);
        for (row_index, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(ModelError::RaggedRows {
                    row: row_index,
                    expected: width,
                    found: row.len(),
                });
            }
            pixels.extend(row);
        }

        Ok(Self { height, width, pixels })
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// The pixel at row `y`, column `x`, if it exists.
    pub fn pixel(&self, y: usize, x: usize) -> Option<Pixel> {
        if y >= self.height || x >= self.width {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }

    /// Iterate over the rows of the image, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Pixel]> {
        self.pixels.chunks(self.width)
    }

    /// An independent row-major copy of the pixels.
    pub fn pixels(&self) -> Vec<Vec<Pixel>> {
        self.rows().map(<[Pixel]>::to_vec).collect()
    }

    /// Composite `other` over a copy of this image with its top-left corner at
    /// (`start_y`, `start_x`).
    ///
    /// `other` must fit entirely inside this image. Pixels outside the placed region
    /// are carried over unchanged.
    pub fn combine(&self, other: &Image, start_y: i64, start_x: i64) -> ModelResult<Image> {
        if start_y < 0 || start_y as usize + other.height > self.height {
            return Err(ModelError::OutOfBoundsY {
                start: start_y,
                height: other.height,
                limit: self.height,
            });
        }
        if start_x < 0 || start_x as usize + other.width > self.width {
            return Err(ModelError::OutOfBoundsX {
                start: start_x,
                width: other.width,
                limit: self.width,
            });
        }

        let (start_y, start_x) = (start_y as usize, start_x as usize);
        let mut pixels = self.pixels.clone();

        for (oy, row) in other.rows().enumerate() {
            let offset = (start_y + oy) * self.width + start_x;
            for (target, top) in pixels[offset..offset + other.width].iter_mut().zip(row) {
                *target = target.combine(top);
            }
        }

        Ok(Image {
            height: self.height,
            width: self.width,
            pixels,
        })
    }

    /// Apply a single-image filter to every pixel.
    pub fn apply_filter(&self, filter: &dyn OneFilter) -> Image {
        Image {
            height: self.height,
            width: self.width,
            pixels: self.pixels.iter().map(|p| filter.filter_pixel(*p)).collect(),
        }
    }

    /// Apply a dual-image filter pairwise, with this image as the top and `other` as
    /// the lower reference. Both images must have the same dimensions.
    pub fn apply_two_filter(&self, filter: &dyn TwoFilter, other: &Image) -> ModelResult<Image> {
        if self.height != other.height || self.width != other.width {
            return Err(ModelError::DimensionMismatch {
                top_height: self.height,
                top_width: self.width,
                bottom_height: other.height,
                bottom_width: other.width,
            });
        }

        Ok(Image {
            height: self.height,
            width: self.width,
            pixels: self
                .pixels
                .iter()
                .zip(&other.pixels)
                .map(|(top, bottom)| filter.blend_pixel(*top, *bottom))
                .collect(),
        })
    }
}

/// Validate a grid size and return its pixel count.
///
/// Sizes whose buffer could not be addressed are rejected like empty ones.
pub(crate) fn check_dimensions(height: usize, width: usize) -> ModelResult<usize> {
    let invalid = ModelError::InvalidDimensions { height, width };
    if height < 1 || width < 1 {
        return Err(invalid);
    }
    let count = height.checked_mul(width).ok_or_else(|| invalid.clone())?;
    match count.checked_mul(std::mem::size_of::<Pixel>()) {
        Some(bytes) if bytes <= isize::MAX as usize => Ok(count),
        _ => Err(invalid),
    }
}
