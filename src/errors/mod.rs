//! Error types for the scanner.
//!
//! This module defines the lexical errors the scanner reports instead of
//! aborting. It includes:
//!
//! - An error structure carrying the source position and file name
//! - One variant per kind of malformed input
//! - Helpful error names and suggestions for rendering

pub mod errors;
