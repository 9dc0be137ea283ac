//! Drawing surface abstraction used by the magnifier widget
//!
//! The widget never touches pixels directly. Everything it draws goes
//! through a [`Renderer`], which owns a primary display surface, a staging
//! surface and the selection indicator overlay.

use crate::capture::image::SourceImage;
use crate::domain::{Rect, Size};

use super::geometry::ContainResult;

/// Surfaces owned by a renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceId {
    /// Shows the base image and the crop result
    Primary,
    /// Intermediate used when reading back from the primary surface
    Staging,
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("could not allocate a {width}x{height} surface")]
    Allocation { width: u32, height: u32 },

    #[error("region {0:?} does not overlap the {1:?} surface")]
    EmptyRegion(Rect, SurfaceId),

    #[error("source image is empty")]
    EmptyImage,
}

/// Rendering collaborator for the magnifier
pub trait Renderer {
    /// Show the selection indicator at `rect`
    fn set_indicator(&mut self, rect: Rect);

    /// Hide the selection indicator
    fn hide_indicator(&mut self);

    /// Current indicator rectangle, if visible
    fn indicator(&self) -> Option<Rect>;

    fn surface_size(&self, surface: SurfaceId) -> Size;

    /// Clear `rect` on `surface` to transparent, or the whole surface if `None`
    fn clear(&mut self, surface: SurfaceId, rect: Option<Rect>);

    /// Draw `image` scaled into the placement rectangle
    fn draw_image_contained(
        &mut self,
        surface: SurfaceId,
        image: &SourceImage,
        placement: ContainResult,
    ) -> Result<(), RenderError>;

    /// Copy `src_rect` of `src` into `dst_rect` of `dst`, scaling as needed
    fn copy_region(
        &mut self,
        src: SurfaceId,
        src_rect: Rect,
        dst: SurfaceId,
        dst_rect: Rect,
    ) -> Result<(), RenderError>;
}
