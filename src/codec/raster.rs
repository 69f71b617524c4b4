//! Conversion between [`Image`] and the `image` crate's buffers.

use crate::codec::CodecResult;
use crate::core::image::Image;
use crate::core::pixel::Pixel;
use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};

/// Convert an image to a [`DynamicImage`].
///
/// With `keep_alpha` the raw RGBA channels are kept. Without it the result is an RGB
/// buffer of the premultiplied colors.
pub fn to_dynamic(image: &Image, keep_alpha: bool) -> DynamicImage {
    let (width, height) = (image.width() as u32, image.height() as u32);
    let at = |x: u32, y: u32| image.pixel(y as usize, x as usize).unwrap_or_default();

    if keep_alpha {
        DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
            Rgba(at(x, y).as_rgba())
        }))
    } else {
        DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            Rgb(at(x, y).as_rgb())
        }))
    }
}

/// Convert a decoded raster into an image, taking its RGBA samples as they are.
pub fn from_dynamic(raster: &DynamicImage) -> CodecResult<Image> {
    let rgba = raster.to_rgba8();
    let pixels = rgba
        .pixels()
        .map(|&Rgba([r, g, b, a])| Pixel::new(r, g, b, a))
        .collect();

    Ok(Image::from_pixels(
        rgba.height() as usize,
        rgba.width() as usize,
        pixels,
    )?)
}
