//! Image input module
//!
//! Loads the picture the magnifier displays (image.rs).

pub mod image;
