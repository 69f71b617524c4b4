//! The plain-text collage project format.
//!
//! ```text
//! C1
//! <width> <height>
//! <max value>
//! <layer name> <filter name>
//! <r> <g> <b> <a>      one line per pixel, row-major
//! ...                  repeated for every layer, bottom to top
//! ```

use crate::codec::tokens::Tokens;
use crate::codec::CodecResult;
use crate::core::error::ModelError;
use crate::core::image::Image;
use crate::core::pixel::Pixel;
use crate::project::{Layer, Project};

/// Magic token that opens every collage file.
pub const HEADER: &str = "C1";

/// One parsed layer: its name, the filter name as written, and its pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerData {
    /// Layer name.
    pub name: String,
    /// Filter name, not yet checked against the catalog.
    pub filter: String,
    /// Pixels rescaled to 0..=255.
    pub image: Image,
}

/// The contents of a collage file.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectData {
    /// Canvas width.
    pub width: usize,
    /// Canvas height.
    pub height: usize,
    /// Channel scale the pixel values were written against.
    pub max_value: i64,
    /// Layers bottom to top.
    pub layers: Vec<LayerData>,
}

/// Parse collage text.
pub fn parse(text: &str) -> CodecResult<ProjectData> {
    let mut tokens = Tokens::new(text);
    tokens.expect_header("Collage", HEADER)?;

    let width = tokens.next_size("canvas width")?;
    let height = tokens.next_size("canvas height")?;
    let max_value = tokens.next_int("maximum value")?;
    if height < 1 || width < 1 {
        return Err(ModelError::InvalidDimensions { height, width }.into());
    }

    let mut layers = Vec::new();
    while tokens.has_next() {
        let name = tokens.next_token("layer name")?.to_string();
        let filter = tokens.next_token("filter name")?.to_string();

        let mut pixels = Vec::new();
        for _ in 0..height.saturating_mul(width) {
            let r = tokens.next_int("red value")?;
            let g = tokens.next_int("green value")?;
            let b = tokens.next_int("blue value")?;
            let a = tokens.next_int("alpha value")?;
            pixels.push(Pixel::from_scaled(r, g, b, a, max_value)?);
        }

        layers.push(LayerData {
            name,
            filter,
            image: Image::from_pixels(height, width, pixels)?,
        });
    }

    Ok(ProjectData {
        width,
        height,
        max_value,
        layers,
    })
}

/// Render a canvas and its layers as collage text. Pixels are written raw on the
/// 0..=255 scale.
pub fn write(height: usize, width: usize, layers: &[Layer]) -> String {
    let mut out = format!("{HEADER}\n{width} {height}\n{}\n", Pixel::MAX);

    for layer in layers {
        out.push_str(&format!("{} {}\n", layer.name(), layer.filter_name()));
        for pixel in layer.image().rows().flatten() {
            out.push_str(&format!("{pixel}\n"));
        }
    }

    out
}

/// Render a project as collage text.
pub fn write_project(project: &Project) -> CodecResult<String> {
    Ok(write(project.height(), project.width(), project.layers()?))
}
