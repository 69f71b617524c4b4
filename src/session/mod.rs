//! Text command sessions.
//!
//! A [`Session`] reads commands such as `new-project`, `add-layer` and `save-image`
//! from any buffered reader and drives a [`Project`](crate::project::Project) with them.

pub mod config;
pub mod interpreter;
pub mod reader;

pub use config::SessionConfig;
pub use interpreter::{help_text, Session};
pub use reader::CommandReader;
