//! Geometric types for drawing surfaces and pointer coordinates

use super::error::SelectionError;

/// A position on a drawing surface, in device pixels
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Coordinate value reserved for "outside the drawing surface"
    pub const SENTINEL: f64 = -1.0;

    /// A point carrying the sentinel on both axes
    pub const OUTSIDE: Point = Point {
        x: Self::SENTINEL,
        y: Self::SENTINEL,
    };

    /// Create a new point
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Whether either axis carries the sentinel (or any other negative or
    /// non-finite value, which no surface can contain)
    pub fn is_outside(&self) -> bool {
        let bad = |v: f64| !v.is_finite() || v < 0.0;
        bad(self.x) || bad(self.y)
    }
}

/// Width and height of a surface or image
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Create a new size
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Size of an integer pixel grid
    pub fn from_pixels(width: u32, height: u32) -> Self {
        Self {
            width: width as f64,
            height: height as f64,
        }
    }

    /// True when either dimension is zero
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Whether a point lies on a surface of this size
    pub fn contains(&self, point: Point) -> bool {
        !point.is_outside() && point.x < self.width && point.y < self.height
    }
}

/// Axis-aligned rectangle with ordered corners
///
/// `top_left` is never to the right of or below `bottom_right`, so
/// [`Rect::width`] and [`Rect::height`] are never negative.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    top_left: Point,
    bottom_right: Point,
}

impl Rect {
    /// Build a rectangle from two arbitrary corners
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            top_left: Point::new(a.x.min(b.x), a.y.min(b.y)),
            bottom_right: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Build a rectangle from its origin and size
    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::from_corners(Point::new(x, y), Point::new(x + width, y + height))
    }

    /// Empty rectangle anchored at a point
    pub fn empty_at(point: Point) -> Self {
        Self {
            top_left: point,
            bottom_right: point,
        }
    }

    /// Rectangle covering a whole surface
    pub fn from_size(size: Size) -> Self {
        Self::from_xywh(0.0, 0.0, size.width, size.height)
    }

    /// Get the top-left corner
    pub fn top_left(&self) -> Point {
        self.top_left
    }

    /// Get the bottom-right corner
    pub fn bottom_right(&self) -> Point {
        self.bottom_right
    }

    /// Get the width of the rectangle
    pub fn width(&self) -> f64 {
        self.bottom_right.x - self.top_left.x
    }

    /// Get the height of the rectangle
    pub fn height(&self) -> f64 {
        self.bottom_right.y - self.top_left.y
    }

    /// Get the size of the rectangle
    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// A rectangle with no area on at least one axis
    pub fn is_degenerate(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Calculate the intersection of two rectangles
    pub fn intersect(&self, other: Rect) -> Option<Rect> {
        let left = self.top_left.x.max(other.top_left.x);
        let top = self.top_left.y.max(other.top_left.y);
        let right = self.bottom_right.x.min(other.bottom_right.x);
        let bottom = self.bottom_right.y.min(other.bottom_right.y);
        if left < right && top < bottom {
            Some(Rect {
                top_left: Point::new(left, top),
                bottom_right: Point::new(right, bottom),
            })
        } else {
            None
        }
    }
}

/// Where the pointer is relative to a drawing surface
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerPosition {
    Inside(Point),
    Outside,
}

impl PointerPosition {
    /// Classify raw device coordinates against the bounds of a surface
    pub fn from_device(x: f64, y: f64, bounds: Size) -> Self {
        let point = Point::new(x, y);
        if bounds.contains(point) {
            PointerPosition::Inside(point)
        } else {
            PointerPosition::Outside
        }
    }

    /// The point under the pointer, or `OutOfBounds`
    pub fn point(self) -> Result<Point, SelectionError> {
        match self {
            PointerPosition::Inside(point) => Ok(point),
            PointerPosition::Outside => Err(SelectionError::OutOfBounds),
        }
    }
}

impl From<Point> for PointerPosition {
    fn from(point: Point) -> Self {
        if point.is_outside() {
            PointerPosition::Outside
        } else {
            PointerPosition::Inside(point)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_orders_corners() {
        let rect = Rect::from_corners(Point::new(50.0, 40.0), Point::new(10.0, 60.0));
        assert_eq!(rect.top_left(), Point::new(10.0, 40.0));
        assert_eq!(rect.bottom_right(), Point::new(50.0, 60.0));
        assert_eq!(rect.width(), 40.0);
        assert_eq!(rect.height(), 20.0);
    }

    #[test]
    fn test_empty_rect_is_degenerate() {
        let rect = Rect::empty_at(Point::new(3.0, 4.0));
        assert!(rect.is_degenerate());
        assert_eq!(rect.size(), Size::new(0.0, 0.0));

        let line = Rect::from_xywh(0.0, 0.0, 10.0, 0.0);
        assert!(line.is_degenerate());
    }

    #[test]
    fn test_intersect() {
        let a = Rect::from_xywh(0.0, 0.0, 10.0, 10.0);
        let b = Rect::from_xywh(5.0, 5.0, 10.0, 10.0);
        assert_eq!(a.intersect(b), Some(Rect::from_xywh(5.0, 5.0, 5.0, 5.0)));

        let c = Rect::from_xywh(20.0, 20.0, 1.0, 1.0);
        assert_eq!(a.intersect(c), None);
    }

    #[test]
    fn test_sentinel_point_is_outside() {
        assert!(Point::OUTSIDE.is_outside());
        assert!(Point::new(Point::SENTINEL, 5.0).is_outside());
        assert!(Point::new(5.0, Point::SENTINEL).is_outside());
        assert!(Point::new(f64::NAN, 5.0).is_outside());
        assert!(!Point::new(0.0, 0.0).is_outside());
        assert_eq!(
            PointerPosition::from(Point::new(-1.0, 3.0)),
            PointerPosition::Outside
        );
    }

    #[test]
    fn test_from_device_uses_surface_bounds() {
        let bounds = Size::new(100.0, 50.0);
        assert_eq!(
            PointerPosition::from_device(99.5, 49.0, bounds),
            PointerPosition::Inside(Point::new(99.5, 49.0))
        );
        assert_eq!(
            PointerPosition::from_device(100.0, 10.0, bounds),
            PointerPosition::Outside
        );
        assert_eq!(
            PointerPosition::from_device(10.0, -0.5, bounds),
            PointerPosition::Outside
        );
        assert_eq!(
            PointerPosition::Outside.point(),
            Err(SelectionError::OutOfBounds)
        );
    }
}
