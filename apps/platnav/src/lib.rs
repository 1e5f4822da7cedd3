//! # platnav
//!
//! Command-line front end for `platnav-core`: builds maps from recorded
//! position traces and inspects or replays exploration over them.

pub mod cli;
