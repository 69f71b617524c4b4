//! Dual-image filters: Multiply, Screen, Difference.
//!
//! In every filter the top pixel is read premultiplied (`as_rgb`) and the bottom pixel
//! raw (`as_rgba`); the result always takes the bottom pixel's alpha.

use crate::core::color::{hsl_to_rgb, rgb8_to_hsl};
use crate::core::pixel::Pixel;
use crate::filters::{OneFilter, TwoFilter};

/// Darkens by multiplying the lightness of both pixels.
#[derive(Debug, Clone, Copy, Default)]
pub struct Multiply;

/// Brightens by multiplying the complements of both lightnesses.
#[derive(Debug, Clone, Copy, Default)]
pub struct Screen;

/// Inverts by taking the per-channel absolute difference.
#[derive(Debug, Clone, Copy, Default)]
pub struct Difference;

/// Recolor `bottom` with a new lightness derived from both pixels' lightness.
fn blend_lightness(top: Pixel, bottom: Pixel, mix: impl Fn(f64, f64) -> f64) -> Pixel {
    let [br, bg, bb, ba] = bottom.as_rgba();
    let top_hsl = rgb8_to_hsl(top.as_rgb());
    let bottom_hsl = rgb8_to_hsl([br, bg, bb]);

    let lightness = mix(top_hsl.lightness, bottom_hsl.lightness);
    let [r, g, b] = hsl_to_rgb(bottom_hsl.with_lightness(lightness));

    Pixel::new(r, g, b, ba)
}

impl TwoFilter for Multiply {
    fn blend_pixel(&self, top: Pixel, bottom: Pixel) -> Pixel {
        blend_lightness(top, bottom, |t, b| t * b)
    }
}

impl TwoFilter for Screen {
    fn blend_pixel(&self, top: Pixel, bottom: Pixel) -> Pixel {
        blend_lightness(top, bottom, |t, b| 1.0 - (1.0 - t) * (1.0 - b))
    }
}

impl TwoFilter for Difference {
    fn blend_pixel(&self, top: Pixel, bottom: Pixel) -> Pixel {
        let [tr, tg, tb] = top.as_rgb();
        let [br, bg, bb, ba] = bottom.as_rgba();

        Pixel::new(tr.abs_diff(br), tg.abs_diff(bg), tb.abs_diff(bb), ba)
    }
}

impl OneFilter for Multiply {
    fn filter_pixel(&self, pixel: Pixel) -> Pixel {
        self.blend_pixel(pixel, Pixel::BLANK)
    }
}

impl OneFilter for Screen {
    fn filter_pixel(&self, pixel: Pixel) -> Pixel {
        self.blend_pixel(pixel, Pixel::BLANK)
    }
}

impl OneFilter for Difference {
    fn filter_pixel(&self, pixel: Pixel) -> Pixel {
        self.blend_pixel(pixel, Pixel::BLANK)
    }
}
