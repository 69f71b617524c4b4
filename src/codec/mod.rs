//! Text and raster codecs for projects and images.
//!
//! - [`collage`]: the `C1` project format
//! - [`ppm`]: plain `P3` images
//! - [`raster`]: bridge to the `image` crate
//! - [`files`]: extension-dispatched loading and saving

pub mod collage;
pub mod files;
pub mod ppm;
pub mod raster;
pub mod tokens;

pub use crate::core::error::{CodecError, CodecResult};
pub use files::{load_image, load_project, save_image, save_project, RasterFormat};
