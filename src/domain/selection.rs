//! Pointer-driven rectangle selection

use super::error::SelectionError;
use super::geometry::{Point, PointerPosition, Rect};

/// Normalize two corners into a top-left/bottom-right rectangle
///
/// Fails with [`SelectionError::OutOfBounds`] if either corner is outside
/// the drawing surface. The result does not depend on argument order.
pub fn normalize(
    a: impl Into<PointerPosition>,
    b: impl Into<PointerPosition>,
) -> Result<Rect, SelectionError> {
    let a = a.into().point()?;
    let b = b.into().point()?;
    Ok(Rect::from_corners(a, b))
}

/// State tracked between pointer-down and pointer-up
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionSession {
    pub origin: Point,
    pub current: Rect,
}

impl SelectionSession {
    fn new(origin: Point) -> Self {
        Self {
            origin,
            current: Rect::empty_at(origin),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum SelectionState {
    #[default]
    Idle,
    Dragging(SelectionSession),
    Finalized(Rect),
}

/// What changed after feeding a pointer event to the selection
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectionEvent {
    /// A new drag began at the given (empty) rectangle
    Started(Rect),
    /// The drag rectangle changed
    Updated(Rect),
    /// The drag ended with a usable rectangle
    Finalized(Rect),
    /// The drag ended without a usable rectangle; the session was discarded
    Cancelled(SelectionError),
    /// Nothing happened
    Ignored,
}

/// Selection state machine: Idle -> Dragging -> Finalized
#[derive(Debug, Clone, Default)]
pub struct Selection {
    state: SelectionState,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// Active drag session, if any
    pub fn session(&self) -> Option<&SelectionSession> {
        match &self.state {
            SelectionState::Dragging(session) => Some(session),
            _ => None,
        }
    }

    /// Last finalized rectangle, if the most recent drag succeeded
    pub fn finalized(&self) -> Option<Rect> {
        match self.state {
            SelectionState::Finalized(rect) => Some(rect),
            _ => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, SelectionState::Dragging(_))
    }

    /// Start a new drag. A press that lands outside the surface is ignored.
    pub fn pointer_down(&mut self, position: impl Into<PointerPosition>) -> SelectionEvent {
        let PointerPosition::Inside(origin) = position.into() else {
            return SelectionEvent::Ignored;
        };
        if self.is_dragging() {
            log::debug!("Pointer pressed mid-drag, restarting selection");
        }
        let session = SelectionSession::new(origin);
        self.state = SelectionState::Dragging(session);
        SelectionEvent::Started(session.current)
    }

    /// Track the pointer during a drag
    ///
    /// If the pointer has left the surface the previous rectangle is kept.
    pub fn pointer_move(&mut self, position: impl Into<PointerPosition>) -> SelectionEvent {
        let SelectionState::Dragging(session) = &mut self.state else {
            return SelectionEvent::Ignored;
        };
        match normalize(session.origin, position) {
            Ok(rect) => {
                session.current = rect;
                SelectionEvent::Updated(rect)
            }
            Err(_) => SelectionEvent::Ignored,
        }
    }

    /// End the drag, finalizing or discarding the rectangle
    pub fn pointer_up(&mut self, position: impl Into<PointerPosition>) -> SelectionEvent {
        let SelectionState::Dragging(session) = self.state else {
            return SelectionEvent::Ignored;
        };
        let result = normalize(session.origin, position).and_then(|rect| {
            if rect.is_degenerate() {
                Err(SelectionError::Degenerate)
            } else {
                Ok(rect)
            }
        });
        match result {
            Ok(rect) => {
                self.state = SelectionState::Finalized(rect);
                SelectionEvent::Finalized(rect)
            }
            Err(err) => {
                log::debug!("Selection discarded: {err}");
                self.state = SelectionState::Idle;
                SelectionEvent::Cancelled(err)
            }
        }
    }

    /// Drop any session or finalized rectangle
    pub fn reset(&mut self) {
        self.state = SelectionState::Idle;
    }
}
