//! Rendering module
//!
//! This module contains:
//! - Containment math shared by every drawing surface
//! - The renderer trait the magnifier draws through
//! - A tiny-skia implementation of that trait

pub mod geometry;
pub mod image;
pub mod surface;
