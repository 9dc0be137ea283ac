//! Error types for geometry and selection

/// Invalid input to a geometric calculation
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("invalid dimension {width}x{height}: both sides must be positive and finite")]
    InvalidDimension { width: f64, height: f64 },
}

/// Why a drag could not produce a selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("pointer is outside the drawing surface")]
    OutOfBounds,

    #[error("selection has zero width or height")]
    Degenerate,
}
