//! Core types for the Collager compositing engine.
//!
//! This module contains the foundational value types that everything else builds on:
//! - Pixels and source-over compositing
//! - Immutable images
//! - RGB/HSL color conversion
//! - Error types

pub mod color;
pub mod error;
pub mod image;
pub mod pixel;

// Re-export commonly used types
pub use self::color::{hsl_to_rgb, rgb_to_hsl, Hsl};
pub use self::error::{CodecError, CollagerError, ErrorKind, ModelError};
pub use self::image::Image;
pub use self::pixel::Pixel;
