//! # Formats Module
//!
//! Byte-level encoding of model artifacts. File access lives in the app.

mod persistence;

pub use persistence::*;
