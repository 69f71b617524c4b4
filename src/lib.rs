//! # Collager - Layered Raster Compositing
//!
//! Collager composes a stack of raster layers, each carrying a pixel filter, into a
//! single flattened image, and stores projects and images in small text formats.
//!
//! ## Features
//!
//! - **Immutable model**: pixels, images and layers are values; every change returns a new one
//! - **Filter catalog**: channel isolation, brighten/darken, and HSL/difference blends
//! - **Flattening**: bottom-to-top source-over compositing with dual-image blend filters
//! - **Text formats**: `C1` collage projects and `P3` PPM images, plus PNG/JPEG via `image`
//! - **Scripting**: a command session for driving projects from text
//!
//! ## Quick Start
//!
//! ```rust
//! use collager::prelude::*;
//!
//! let mut project = Project::new();
//! project.create_project(2, 2).unwrap();
//! project.add_layer("background").unwrap();
//!
//! let magenta = Image::filled(1, 2, Pixel::rgb(255, 0, 255)).unwrap();
//! project.add_image("background", &magenta, 0, 0).unwrap();
//! project.set_filter("background", "blue_filter").unwrap();
//!
//! let flattened = project.final_image().unwrap();
//! assert_eq!(flattened.pixel(0, 0), Some(Pixel::rgb(0, 0, 255)));
//! assert_eq!(flattened.pixel(1, 0), Some(Pixel::new(0, 0, 255, 0)));
//! ```
//!
//! ## Architecture
//!
//! - [`core`]: pixels, images, color conversion and error types
//! - [`filters`]: filter traits, builtin transforms and the closed catalog
//! - [`project`]: layers, the project state machine and flattening
//! - [`codec`]: collage/PPM text formats and raster file I/O
//! - [`session`]: the text command interpreter and its configuration

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod core;
pub mod filters;
pub mod project;
pub mod session;

/// Prelude module for convenient imports.
///
/// Import everything commonly needed with:
/// ```rust,ignore
/// use collager::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use crate::core::color::{hsl_to_rgb, rgb_to_hsl, Hsl};
    pub use crate::core::image::Image;
    pub use crate::core::pixel::Pixel;

    // Errors
    pub use crate::core::error::{
        CodecError, CodecResult, CollagerError, CollagerResult, ErrorKind, ModelError,
        ModelResult,
    };

    // Filters
    pub use crate::filters::{
        Channel, FilterCategory, FilterInfo, FilterName, OneFilter, TwoFilter,
    };

    // Project
    pub use crate::project::{Layer, LayerSummary, Project, ProjectSummary};

    // Codecs
    pub use crate::codec::{load_image, load_project, save_image, save_project};

    // Session
    pub use crate::session::{Session, SessionConfig};
}

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_version() {
        assert!(!super::VERSION.is_empty());
        assert_eq!(super::NAME, "collager");
    }

    #[test]
    fn test_prelude_pipeline() {
        let mut project = Project::new();
        project.create_project(2, 3).unwrap();
        project.add_layer("base").unwrap();
        project
            .add_image("base", &Image::filled(2, 3, Pixel::rgb(40, 80, 120)).unwrap(), 0, 0)
            .unwrap();
        project.set_filter("base", "brighten_max").unwrap();

        let image = project.final_image().unwrap();
        assert_eq!(image.pixel(1, 2), Some(Pixel::rgb(160, 200, 240)));
    }

    #[test]
    fn test_dual_filter_over_stack() {
        let mut project = Project::new();
        project.create_project(1, 1).unwrap();
        project.add_layer("base").unwrap();
        project.add_layer("invert").unwrap();
        project
            .add_image("base", &Image::filled(1, 1, Pixel::rgb(200, 100, 50)).unwrap(), 0, 0)
            .unwrap();
        project
            .add_image("invert", &Image::filled(1, 1, Pixel::rgb(255, 255, 255)).unwrap(), 0, 0)
            .unwrap();
        project.set_filter("invert", "inversion_difference").unwrap();

        // The blend replaces the composite with |white - base|, then the layer's own
        // single-image form (white against a blank pixel, fully transparent) goes on top.
        let image = project.final_image().unwrap();
        assert_eq!(image.pixel(0, 0), Some(Pixel::rgb(55, 155, 205)));
    }
}
