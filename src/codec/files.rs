//! Reading and writing images and projects on disk.
//!
//! The file extension picks the format: `.png` and `.jpg`/`.jpeg` go through the
//! `image` crate, anything else is treated as plain PPM text.

use crate::codec::{collage, ppm, raster, CodecError, CodecResult};
use crate::core::image::Image;
use crate::project::Project;
use image::codecs::jpeg::JpegEncoder;
use image::ImageFormat;
use log::debug;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// On-disk image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterFormat {
    /// PNG, alpha kept.
    Png,
    /// JPEG, alpha dropped.
    Jpeg,
    /// Plain PPM text.
    Ppm,
}

impl RasterFormat {
    /// Pick the format from a path's extension.
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("png") => RasterFormat::Png,
            Some("jpg") | Some("jpeg") => RasterFormat::Jpeg,
            _ => RasterFormat::Ppm,
        }
    }
}

/// Read an image file.
pub fn load_image(path: impl AsRef<Path>) -> CodecResult<Image> {
    let path = path.as_ref();
    let image = match RasterFormat::from_path(path) {
        RasterFormat::Ppm => ppm::parse(&read_text(path)?)?,
        RasterFormat::Png | RasterFormat::Jpeg => {
            if !path.exists() {
                return Err(CodecError::NotFound(path.display().to_string()));
            }
            raster::from_dynamic(&image::open(path)?)?
        }
    };

    debug!(
        "Loaded {}x{} image from {}",
        image.height(),
        image.width(),
        path.display()
    );
    Ok(image)
}

/// Write an image file. `jpeg_quality` is only used for JPEG output.
pub fn save_image(path: impl AsRef<Path>, image: &Image, jpeg_quality: u8) -> CodecResult<()> {
    let path = path.as_ref();
    match RasterFormat::from_path(path) {
        RasterFormat::Png => {
            raster::to_dynamic(image, true).save_with_format(path, ImageFormat::Png)?;
        }
        RasterFormat::Jpeg => write_jpeg(fs::File::create(path)?, image, jpeg_quality)?,
        RasterFormat::Ppm => fs::write(path, ppm::write(image))?,
    }

    debug!("Saved image to {}", path.display());
    Ok(())
}

/// Encode `image` as JPEG into `sink`, dropping alpha.
fn write_jpeg(sink: impl Write, image: &Image, jpeg_quality: u8) -> CodecResult<()> {
    let rgb = raster::to_dynamic(image, false).to_rgb8();
    let mut output = BufWriter::new(sink);
    let mut encoder = JpegEncoder::new_with_quality(&mut output, jpeg_quality.clamp(1, 100));
    encoder.encode(
        &rgb,
        rgb.width(),
        rgb.height(),
        image::ExtendedColorType::Rgb8,
    )?;
    output.flush()?;
    Ok(())
}

/// Replace `project` with the collage file at `path`.
pub fn load_project(path: impl AsRef<Path>, project: &mut Project) -> CodecResult<()> {
    let path = path.as_ref();
    project.load_project(&read_text(path)?)?;
    debug!("Loaded project from {}", path.display());
    Ok(())
}

/// Write `project` as a collage file.
pub fn save_project(path: impl AsRef<Path>, project: &Project) -> CodecResult<()> {
    let path = path.as_ref();
    fs::write(path, collage::write_project(project)?)?;
    debug!("Saved project to {}", path.display());
    Ok(())
}

fn read_text(path: &Path) -> CodecResult<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => CodecError::NotFound(path.display().to_string()),
        _ => CodecError::Io(e),
    })
}
