//! Identity and channel isolation filters.

use crate::core::pixel::Pixel;
use crate::filters::{Channel, OneFilter};

/// Leaves every pixel as it is.
#[derive(Debug, Clone, Copy, Default)]
pub struct Normal;

impl OneFilter for Normal {
    fn filter_pixel(&self, pixel: Pixel) -> Pixel {
        pixel
    }
}

/// Keeps one color channel and zeroes the other two. Alpha is preserved.
#[derive(Debug, Clone, Copy)]
pub struct ChannelIsolate(pub Channel);

impl OneFilter for ChannelIsolate {
    fn filter_pixel(&self, pixel: Pixel) -> Pixel {
        let [r, g, b, a] = pixel.as_rgba();
        match self.0 {
            Channel::Red => Pixel::new(r, 0, 0, a),
            Channel::Green => Pixel::new(0, g, 0, a),
            Channel::Blue => Pixel::new(0, 0, b, a),
        }
    }
}
