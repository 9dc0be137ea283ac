//! Magnifier widget: drag a rectangle, rescale it to fill the view
//!
//! The widget forwards pointer input to the [`Selection`] state machine and
//! turns the resulting events into drawing calls on a [`Renderer`]:
//! - Started/Updated: move the indicator
//! - Cancelled: hide the indicator and drop the rectangle
//! - Finalized: hide the indicator, then crop-and-fill

use crate::capture::image::SourceImage;
use crate::domain::{GeometryError, PointerPosition, Rect, Selection, SelectionEvent};
use crate::render::geometry::compute_contain;
use crate::render::surface::{RenderError, Renderer, SurfaceId};
use crate::session::messages::{Msg, PointerEvent};

#[derive(Debug, thiserror::Error)]
pub enum MagnifierError {
    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error("no image loaded")]
    NoImage,
}

pub struct Magnifier<R: Renderer> {
    renderer: R,
    selection: Selection,
    image: Option<SourceImage>,
}

impl<R: Renderer> Magnifier<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            selection: Selection::new(),
            image: None,
        }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn image(&self) -> Option<&SourceImage> {
        self.image.as_ref()
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Replace the source image and draw it
    pub fn load(&mut self, image: SourceImage) -> Result<(), MagnifierError> {
        self.image = Some(image);
        self.selection.reset();
        self.renderer.hide_indicator();
        self.reset()
    }

    /// Process one message to completion
    pub fn update(&mut self, msg: Msg) -> Result<SelectionEvent, MagnifierError> {
        match msg {
            Msg::Pointer(event) => self.handle_pointer(event),
            Msg::Reset => {
                self.reset()?;
                Ok(SelectionEvent::Ignored)
            }
            Msg::Clear => {
                self.clear();
                Ok(SelectionEvent::Ignored)
            }
        }
    }

    /// Redraw the original image contained in the primary surface
    pub fn reset(&mut self) -> Result<(), MagnifierError> {
        let image = self.image.as_ref().ok_or(MagnifierError::NoImage)?;
        let container = self.renderer.surface_size(SurfaceId::Primary);
        let placement = compute_contain(container, image.size())?;
        self.renderer.clear(SurfaceId::Primary, None);
        self.renderer
            .draw_image_contained(SurfaceId::Primary, image, placement)?;
        log::debug!("Original image drawn at {:?}", placement);
        Ok(())
    }

    /// Clear the primary surface
    pub fn clear(&mut self) {
        self.renderer.clear(SurfaceId::Primary, None);
    }

    fn handle_pointer(&mut self, event: PointerEvent) -> Result<SelectionEvent, MagnifierError> {
        let (x, y) = event.coordinates();
        let bounds = self.renderer.surface_size(SurfaceId::Primary);
        let position = PointerPosition::from_device(x, y, bounds);

        let outcome = match event {
            PointerEvent::Down { .. } => self.selection.pointer_down(position),
            PointerEvent::Move { .. } => self.selection.pointer_move(position),
            PointerEvent::Up { .. } => self.selection.pointer_up(position),
        };

        match outcome {
            SelectionEvent::Started(rect) | SelectionEvent::Updated(rect) => {
                self.renderer.set_indicator(rect);
            }
            SelectionEvent::Cancelled(err) => {
                log::debug!("Selection wiped: {err}");
                self.renderer.hide_indicator();
            }
            SelectionEvent::Finalized(rect) => {
                self.renderer.hide_indicator();
                self.crop_and_fill(rect)?;
            }
            SelectionEvent::Ignored => {}
        }
        Ok(outcome)
    }

    /// Rescale `rect` of the primary surface to fill it
    ///
    /// The region goes through the staging surface first, since the primary
    /// surface is cleared before the result is drawn back.
    fn crop_and_fill(&mut self, rect: Rect) -> Result<(), MagnifierError> {
        let staging = self.renderer.surface_size(SurfaceId::Staging);
        let placement = compute_contain(staging, rect.size())?;

        self.renderer.clear(SurfaceId::Staging, None);
        self.renderer.copy_region(
            SurfaceId::Primary,
            rect,
            SurfaceId::Staging,
            placement.to_rect(),
        )?;

        let full = Rect::from_size(staging);
        self.renderer.clear(SurfaceId::Primary, None);
        self.renderer
            .copy_region(SurfaceId::Staging, full, SurfaceId::Primary, full)?;

        log::info!(
            "Magnified {}x{} region at ({}, {}) by {:.2}",
            rect.width(),
            rect.height(),
            rect.top_left().x,
            rect.top_left().y,
            placement.scale(rect.size())
        );
        Ok(())
    }
}
