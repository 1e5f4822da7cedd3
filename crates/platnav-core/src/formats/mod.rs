//! # Formats
//!
//! On-disk representation of mapped terrain. Pure byte transformations plus
//! the two file helpers the CLI and control loops load maps with.

mod persistence;

pub use persistence::*;
