//! Error types for Collager.
//!
//! Uses thiserror for structured errors with context. Every failure raised by the
//! collage model falls into one of two kinds:
//! - invalid argument: the caller passed a value the operation can never accept
//! - invalid state: the project lifecycle does not allow the operation yet

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Coarse classification of a [`ModelError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A supplied value is out of range, unknown, or does not fit.
    InvalidArgument,
    /// The operation requires a project lifecycle precondition that is not met.
    InvalidState,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::InvalidArgument => write!(f, "invalid argument"),
            ErrorKind::InvalidState => write!(f, "invalid state"),
        }
    }
}

/// Errors raised by the pixel, image, layer and project model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Maximum value must be greater than 0 (min), got {0}")]
    InvalidMaximum(i64),

    #[error("{channel} value is invalid, must be between 0 and {max} (got {value})")]
    ChannelOutOfRange {
        channel: &'static str,
        value: i64,
        max: i64,
    },

    #[error("{channel} value must be between 0 and 255 (got {value})")]
    HslChannelOutOfRange { channel: &'static str, value: f64 },

    #[error("Invalid height or width was given ({height}x{width})")]
    InvalidDimensions { height: usize, width: usize },

    #[error("Image rows must all have the same width (row {row} has {found}, expected {expected})")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Pixel buffer holds {found} pixels, expected {expected}")]
    PixelCountMismatch { expected: usize, found: usize },

    #[error("Invalid coordinates were given ({y}, {x})")]
    NegativeOffset { y: i64, x: i64 },

    #[error("Invalid starting Y position or image height, image must be fully contained")]
    OutOfBoundsY { start: i64, height: usize, limit: usize },

    #[error("Invalid starting X position or image width, image must be fully contained")]
    OutOfBoundsX { start: i64, width: usize, limit: usize },

    #[error("Images must be same size ({top_height}x{top_width} vs {bottom_height}x{bottom_width})")]
    DimensionMismatch {
        top_height: usize,
        top_width: usize,
        bottom_height: usize,
        bottom_width: usize,
    },

    #[error("No filter with this name exists: {0}")]
    UnknownFilter(String),

    #[error("No layer with this name exists: {0}")]
    UnknownLayer(String),

    #[error("Name already exists: {0}")]
    DuplicateLayer(String),

    #[error("Layer name cannot be empty or contain whitespace: {0:?}")]
    InvalidLayerName(String),

    #[error("Filter '{0}' is not a dual-image filter")]
    NotDualFilter(&'static str),

    #[error("No project exists")]
    NoProject,

    #[error("There are no layers")]
    NoLayers,
}

impl ModelError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ModelError::NotDualFilter(_) | ModelError::NoProject | ModelError::NoLayers => {
                ErrorKind::InvalidState
            }
            _ => ErrorKind::InvalidArgument,
        }
    }

    /// Check if this error was caused by a bad argument.
    pub fn is_invalid_argument(&self) -> bool {
        self.kind() == ErrorKind::InvalidArgument
    }

    /// Check if this error was caused by an unmet lifecycle precondition.
    pub fn is_invalid_state(&self) -> bool {
        self.kind() == ErrorKind::InvalidState
    }

    /// Get suggestion for fixing this error.
    pub fn suggested_fix(&self) -> Option<String> {
        match self {
            ModelError::NoProject => Some("Create a project with 'new-project' first".to_string()),
            ModelError::NoLayers => Some("Add a layer with 'add-layer' first".to_string()),
            ModelError::UnknownFilter(_) => {
                Some("Run 'help' to see the available filters".to_string())
            }
            ModelError::OutOfBoundsX { .. } | ModelError::OutOfBoundsY { .. } => {
                Some("Place the image so that it fits entirely on the canvas".to_string())
            }
            _ => None,
        }
    }
}

/// Errors from reading or writing project and image files.
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Invalid {format} file: plain RAW file should begin with {expected}")]
    BadHeader {
        format: &'static str,
        expected: &'static str,
        found: String,
    },

    #[error("Unexpected end of input while reading {expected}")]
    UnexpectedEnd { expected: &'static str },

    #[error("Expected {expected}, found '{token}'")]
    InvalidNumber { expected: &'static str, token: String },

    #[error("File {0} not found")]
    NotFound(String),

    #[error("Unsupported image file: {0}")]
    UnsupportedFormat(String),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Top-level error type for Collager.
///
/// This enum encompasses all error categories and enables automatic
/// conversion between specific error types.
#[derive(Error, Debug)]
pub enum CollagerError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Session(String),
}

/// Result type alias for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Result type alias for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Result type alias for Collager operations.
pub type CollagerResult<T> = Result<T, CollagerError>;
