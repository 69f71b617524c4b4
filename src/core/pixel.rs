//! RGBA pixel values and source-over compositing.
//!
//! Every [`Pixel`] stores its channels on the 0..=255 scale no matter which scale it
//! was constructed from. Pixels are plain `Copy` values and never change after creation.

use crate::core::error::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An immutable RGBA sample with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pixel {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

impl Pixel {
    /// Largest value any channel can hold.
    pub const MAX: u8 = 255;

    /// Fully transparent white, the content of a freshly created layer.
    pub const BLANK: Pixel = Pixel::new(255, 255, 255, 0);

    /// Create a pixel from channels already on the 0..=255 scale.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque pixel from channels already on the 0..=255 scale.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: Self::MAX }
    }

    /// Create a pixel from four channels measured on a `0..=max` scale.
    ///
    /// Each channel is rescaled with `round(256 * (v + 1) / (max + 1) - 1)`, which keeps
    /// zero at zero and maps `max` to 255.
    pub fn from_scaled(r: i64, g: i64, b: i64, a: i64, max: i64) -> ModelResult<Self> {
        if max < 1 {
            return Err(ModelError::InvalidMaximum(max));
        }
        check_channel("Red", r, max)?;
        check_channel("Green", g, max)?;
        check_channel("Blue", b, max)?;
        check_channel("Alpha", a, max)?;

        Ok(Self {
            r: rescale(r, max),
            g: rescale(g, max),
            b: rescale(b, max),
            a: rescale(a, max),
        })
    }

    /// Create an opaque pixel from three channels measured on a `0..=max` scale.
    ///
    /// Channels are scaled linearly (`v * 255 / max`, truncated) and alpha is 255.
    pub fn opaque_scaled(r: i64, g: i64, b: i64, max: i64) -> ModelResult<Self> {
        if max < 1 {
            return Err(ModelError::InvalidMaximum(max));
        }
        check_channel("Red", r, max)?;
        check_channel("Green", g, max)?;
        check_channel("Blue", b, max)?;

        let scale = |v: i64| (v as i128 * Self::MAX as i128 / max as i128) as u8;
        Ok(Self::rgb(scale(r), scale(g), scale(b)))
    }

    /// Red channel.
    pub fn red(&self) -> u8 {
        self.r
    }

    /// Green channel.
    pub fn green(&self) -> u8 {
        self.g
    }

    /// Blue channel.
    pub fn blue(&self) -> u8 {
        self.b
    }

    /// Alpha channel.
    pub fn alpha(&self) -> u8 {
        self.a
    }

    /// Maximum channel value of the stored representation, always 255.
    pub fn max(&self) -> u8 {
        Self::MAX
    }

    /// Channels as `[r, g, b, a]`.
    pub fn as_rgba(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Color channels premultiplied by `alpha / 255`, rounded to the nearest integer.
    pub fn as_rgb(&self) -> [u8; 3] {
        let alpha = self.a as f64 / 255.0;
        let scale = |c: u8| (c as f64 * alpha).round() as u8;
        [scale(self.r), scale(self.g), scale(self.b)]
    }

    /// Composite `top` over this pixel (source-over).
    ///
    /// When both pixels are fully transparent the result is transparent black.
    pub fn combine(&self, top: &Pixel) -> Pixel {
        let top_alpha = top.a as f64 / 255.0;
        let this_alpha = self.a as f64 / 255.0;
        let out_alpha = top_alpha + this_alpha * (1.0 - top_alpha);

        if out_alpha <= 0.0 {
            return Pixel::new(0, 0, 0, 0);
        }

        let channel = |top_c: u8, this_c: u8| {
            let blended =
                top_alpha * top_c as f64 + this_c as f64 * this_alpha * (1.0 - top_alpha);
            (blended / out_alpha).round().clamp(0.0, 255.0) as u8
        };

        Pixel::new(
            channel(top.r, self.r),
            channel(top.g, self.g),
            channel(top.b, self.b),
            (out_alpha * 255.0).round().clamp(0.0, 255.0) as u8,
        )
    }
}

impl Default for Pixel {
    fn default() -> Self {
        Self::BLANK
    }
}

impl fmt::Display for Pixel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.r, self.g, self.b, self.a)
    }
}

fn check_channel(channel: &'static str, value: i64, max: i64) -> ModelResult<()> {
    if value < 0 || value > max {
        return Err(ModelError::ChannelOutOfRange { channel, value, max });
    }
    Ok(())
}

fn rescale(value: i64, max: i64) -> u8 {
    if value == 0 {
        return 0;
    }
    let scaled = (Pixel::MAX as f64 + 1.0) * ((value as f64 + 1.0) / (max as f64 + 1.0)) - 1.0;
    scaled.round().clamp(0.0, 255.0) as u8
}
