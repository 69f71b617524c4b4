//! Built-in filter implementations.
//!
//! This module contains the transforms behind every entry of the filter catalog.

mod blend;
mod brightness;
mod channel;

pub use blend::{Difference, Multiply, Screen};
pub use brightness::{BrightenDarken, Direction, Measure};
pub use channel::{ChannelIsolate, Normal};
