//! # System Module
//!
//! Read-only metrics over a mapped layout and its navigation graph.

mod metrics;

pub use metrics::*;
