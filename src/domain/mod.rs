//! Pure domain types with minimal dependencies
//!
//! This module contains the geometry and selection state shared by the
//! renderer and the magnifier widget. Nothing here touches pixels.

pub mod error;
pub mod geometry;
pub mod selection;

pub use error::*;
pub use geometry::*;
pub use selection::*;
