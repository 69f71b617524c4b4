//! Plain PPM (`P3`) images.
//!
//! Pixels read from PPM are opaque. Written pixels are premultiplied by their alpha,
//! since the format has no alpha channel.

use crate::codec::tokens::Tokens;
use crate::codec::CodecResult;
use crate::core::error::ModelError;
use crate::core::image::Image;
use crate::core::pixel::Pixel;

/// Magic token that opens every plain PPM file.
pub const HEADER: &str = "P3";

/// Parse plain PPM text into an image.
pub fn parse(text: &str) -> CodecResult<Image> {
    let mut tokens = Tokens::new(text);
    tokens.expect_header("PPM", HEADER)?;

    let width = tokens.next_size("image width")?;
    let height = tokens.next_size("image height")?;
    let max_value = tokens.next_int("maximum value")?;
    if height < 1 || width < 1 {
        return Err(ModelError::InvalidDimensions { height, width }.into());
    }

    let mut pixels = Vec::new();
    for _ in 0..height.saturating_mul(width) {
        let r = tokens.next_int("red value")?;
        let g = tokens.next_int("green value")?;
        let b = tokens.next_int("blue value")?;
        pixels.push(Pixel::opaque_scaled(r, g, b, max_value)?);
    }

    Ok(Image::from_pixels(height, width, pixels)?)
}

/// Render an image as plain PPM text, one line per row.
pub fn write(image: &Image) -> String {
    let mut out = format!("{HEADER}\n{} {}\n{}\n", image.width(), image.height(), Pixel::MAX);

    for row in image.rows() {
        let line: Vec<String> = row
            .iter()
            .map(|pixel| {
                let [r, g, b] = pixel.as_rgb();
                format!("{r} {g} {b}")
            })
            .collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }

    out
}
