//! Placement math shared by every surface that draws scaled content
//!
//! Content is placed with "contain" semantics: scaled as large as possible
//! without cropping, aspect ratio preserved, centered on the axis with
//! leftover space.

use crate::domain::{GeometryError, Rect, Size};

/// Destination offset and scaled size of contained content
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ContainResult {
    pub dx: f64,
    pub dy: f64,
    pub width: f64,
    pub height: f64,
}

impl ContainResult {
    /// Destination rectangle on the container
    pub fn to_rect(&self) -> Rect {
        Rect::from_xywh(self.dx, self.dy, self.width, self.height)
    }

    /// Scale factor applied to content of the given size
    pub fn scale(&self, content: Size) -> f64 {
        self.width / content.width
    }
}

fn valid(size: Size, allow_zero: bool) -> bool {
    let ok = |v: f64| v.is_finite() && if allow_zero { v >= 0.0 } else { v > 0.0 };
    ok(size.width) && ok(size.height)
}

/// Fit `content` inside `container`, preserving aspect ratio
///
/// The axes are compared by cross-multiplication, so no aspect ratio is ever
/// divided out. Offsets are floored to whole pixels; sizes are not.
pub fn compute_contain(container: Size, content: Size) -> Result<ContainResult, GeometryError> {
    if !valid(content, false) {
        return Err(GeometryError::InvalidDimension {
            width: content.width,
            height: content.height,
        });
    }
    if !valid(container, true) {
        return Err(GeometryError::InvalidDimension {
            width: container.width,
            height: container.height,
        });
    }

    let (cw, ch) = (container.width, container.height);
    let (nw, nh) = (content.width, content.height);

    // ch * nw / nh is exact when the result is whole; r * nw is not
    if cw * nh >= nw * ch {
        // content is relatively taller: fill the height
        let width = (ch * nw / nh).min(cw);
        Ok(ContainResult {
            dx: ((cw - width) / 2.0).floor().max(0.0),
            dy: 0.0,
            width,
            height: ch,
        })
    } else {
        let height = (cw * nh / nw).min(ch);
        Ok(ContainResult {
            dx: 0.0,
            dy: ((ch - height) / 2.0).floor().max(0.0),
            width: cw,
            height,
        })
    }
}
