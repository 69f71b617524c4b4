//! Brighten and darken filters.
//!
//! Each filter derives one scalar from the pixel's original red, green and blue values,
//! then adds it to (brighten) or subtracts it from (darken) each of those channels,
//! clamping to 0..=255. Alpha is never touched.

use crate::core::pixel::Pixel;
use crate::filters::OneFilter;

/// How the brightness adjustment is measured from a pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measure {
    /// Average of the three channels.
    Intensity,
    /// ITU-R BT.709 weighted luma.
    Luma,
    /// Largest of the three channels.
    Max,
}

impl Measure {
    fn amount(&self, r: u8, g: u8, b: u8) -> i32 {
        let (r, g, b) = (r as f64, g as f64, b as f64);
        match self {
            Measure::Intensity => ((r + g + b) / 3.0).round() as i32,
            Measure::Luma => (r * 0.2126 + g * 0.7152 + b * 0.0722).round() as i32,
            Measure::Max => r.max(g).max(b) as i32,
        }
    }
}

/// Whether the measured amount is added or subtracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Add the amount.
    Brighten,
    /// Subtract the amount.
    Darken,
}

/// Brightens or darkens by a per-pixel [`Measure`].
#[derive(Debug, Clone, Copy)]
pub struct BrightenDarken {
    /// What to measure.
    pub measure: Measure,
    /// Which way to shift.
    pub direction: Direction,
}

impl BrightenDarken {
    /// Create a brighten/darken filter.
    pub const fn new(measure: Measure, direction: Direction) -> Self {
        Self { measure, direction }
    }
}

impl OneFilter for BrightenDarken {
    fn filter_pixel(&self, pixel: Pixel) -> Pixel {
        let [r, g, b, a] = pixel.as_rgba();
        let amount = self.measure.amount(r, g, b);
        let difference = match self.direction {
            Direction::Brighten => amount,
            Direction::Darken => -amount,
        };
        let shift = |c: u8| (c as i32 + difference).clamp(0, 255) as u8;

        Pixel::new(shift(r), shift(g), shift(b), a)
    }
}
