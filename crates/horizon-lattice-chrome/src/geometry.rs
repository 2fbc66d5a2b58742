//! Integer geometry used by the chrome layout.
//!
//! Title bar layout works in whole logical pixels, so these types use `i32`
//! rather than the float geometry of the renderer.

use serde::{Deserialize, Serialize};

/// A size in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Zero size.
    pub const ZERO: Self = Self {
        width: 0,
        height: 0,
    };

    /// Check if the size has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

impl From<(i32, i32)> for Size {
    fn from((width, height): (i32, i32)) -> Self {
        Self { width, height }
    }
}

/// A rectangle in logical pixels, origin at the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Empty rectangle at origin.
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Left edge x coordinate.
    #[inline]
    pub fn left(&self) -> i32 {
        self.x
    }

    /// Top edge y coordinate.
    #[inline]
    pub fn top(&self) -> i32 {
        self.y
    }

    /// Right edge x coordinate.
    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Bottom edge y coordinate.
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// The size of the rectangle.
    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Check if the rectangle is empty (zero or negative size).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size().is_empty()
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left() && x < self.right() && y >= self.top() && y < self.bottom()
    }

    /// Mirror the rectangle about the vertical center line of a container
    /// of the given width.
    ///
    /// Applying this twice with the same width yields the original rectangle.
    #[inline]
    pub fn mirrored(&self, container_width: i32) -> Rect {
        Rect::new(
            container_width - self.x - self.width,
            self.y,
            self.width,
            self.height,
        )
    }

    /// Return the same rectangle moved to a new origin.
    #[inline]
    pub fn with_origin(&self, x: i32, y: i32) -> Rect {
        Rect::new(x, y, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let r = Rect::new(10, 5, 30, 20);
        assert_eq!(r.left(), 10);
        assert_eq!(r.right(), 40);
        assert_eq!(r.top(), 5);
        assert_eq!(r.bottom(), 25);
        assert_eq!(r.size(), Size::new(30, 20));
    }

    #[test]
    fn test_rect_contains_is_half_open() {
        let r = Rect::new(0, 0, 10, 10);
        assert!(r.contains(0, 0));
        assert!(r.contains(9, 9));
        assert!(!r.contains(10, 5));
        assert!(!r.contains(5, 10));
        assert!(!Rect::ZERO.contains(0, 0));
    }

    #[test]
    fn test_mirror_is_involution() {
        let r = Rect::new(7, 0, 46, 28);
        let mirrored = r.mirrored(400);
        assert_eq!(mirrored, Rect::new(347, 0, 46, 28));
        assert_eq!(mirrored.mirrored(400), r);
    }

    #[test]
    fn test_empty() {
        assert!(Rect::ZERO.is_empty());
        assert!(Rect::new(3, 3, 0, 10).is_empty());
        assert!(!Rect::new(3, 3, 1, 1).is_empty());
    }
}
