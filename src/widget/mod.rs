//! Interactive widgets
//!
//! This module contains:
//! - The magnifier widget that drives selection and crop-and-fill

pub mod magnifier;
