//! Core abstractions for diagram normalization
//!
//! This module defines the traits every diagram plugin implements, plus the
//! text and parsing helpers they share.

pub mod chumsky_utils;
mod detector;
mod error;
pub mod logging;
mod normalizer;
mod report;
mod text;

pub use detector::*;
pub use error::*;
pub use logging::*;
pub use normalizer::*;
pub use report::*;
pub use text::*;
