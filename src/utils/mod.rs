//! Utility functions and helpers.
//!
//! This module contains size formatting and parsing helpers used by the
//! renderer and the command-line interface.

pub mod size;

pub use size::{human_readable_size, parse_size};
