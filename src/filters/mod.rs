//! Filter module.
//!
//! Filters are pure, pixel-wise transforms. A [`OneFilter`] maps each pixel of a single
//! image; a [`TwoFilter`] combines each pixel of a layer with the co-located pixel of a
//! lower reference image. The set of filters a layer can carry is the closed
//! [`FilterName`] catalog.

pub mod builtin;
pub mod catalog;

pub use catalog::{FilterCategory, FilterInfo, FilterName};

use crate::core::image::Image;
use crate::core::pixel::Pixel;
use crate::core::error::ModelResult;
use serde::{Deserialize, Serialize};

/// A transform applied independently to every pixel of one image.
pub trait OneFilter: Send + Sync {
    /// Produce the filtered version of `pixel`.
    fn filter_pixel(&self, pixel: Pixel) -> Pixel;

    /// Apply the filter to a whole image.
    fn apply(&self, image: &Image) -> Image
    where
        Self: Sized,
    {
        image.apply_filter(self)
    }
}

/// A transform combining a layer's pixel with a lower reference pixel.
///
/// Every dual-image filter also works on a single image: the lower reference is then
/// [`Pixel::BLANK`], which is what its [`OneFilter`] implementation must do.
pub trait TwoFilter: OneFilter {
    /// Combine `top` (the layer being filtered) with `bottom` (the lower reference).
    fn blend_pixel(&self, top: Pixel, bottom: Pixel) -> Pixel;

    /// Apply the filter to two images of equal size.
    fn apply_two(&self, top: &Image, bottom: &Image) -> ModelResult<Image>
    where
        Self: Sized,
    {
        top.apply_two_filter(self, bottom)
    }
}

/// A color channel of a pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Red channel.
    Red,
    /// Green channel.
    Green,
    /// Blue channel.
    Blue,
}
