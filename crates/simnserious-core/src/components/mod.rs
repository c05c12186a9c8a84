//! Component definitions for the behaver registry.
//!
//! Components are pure data structs attached to entities.
//! Rolling and interpreting them lives in `profiles` and `behavior`.

mod color;
mod common;
mod creatures;

pub use color::*;
pub use common::*;
pub use creatures::*;
