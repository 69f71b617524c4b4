//! Layers and projects.
//!
//! A [`Project`] owns a canvas size and a bottom-to-top stack of [`Layer`] values.
//! Layers are replaced wholesale whenever they change; the project flattens the stack
//! into a single image on demand.

pub mod layer;
pub mod stack;

pub use layer::{Layer, LayerSummary};
pub use stack::{Project, ProjectSummary};
