//! Plain geometry value types shared by the window core and its backends
//!
//! Rectangles are stored as origin + size. Whether a value is in logical
//! (DPI-independent) units or physical pixels is decided by the caller.

use serde::{Deserialize, Serialize};

/// Rectangle structure for layout calculations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Build a rectangle from its four edges
    pub const fn from_edges(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            x: left,
            y: top,
            width: right - left,
            height: bottom - top,
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> i32 {
        self.x + self.width / 2
    }

    pub fn center_y(&self) -> i32 {
        self.y + self.height / 2
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Same size, moved so its top-left corner sits at `origin`
    pub fn with_origin(&self, origin: Point) -> Rect {
        Rect::new(origin.x, origin.y, self.width, self.height)
    }

    /// Same origin, new size
    pub fn with_size(&self, size: Size) -> Rect {
        Rect::new(self.x, self.y, size.width, size.height)
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Grow every edge outward by the matching inset
    pub fn expand(&self, insets: Insets) -> Rect {
        Rect::from_edges(
            self.x - insets.left,
            self.y - insets.top,
            self.right() + insets.right,
            self.bottom() + insets.bottom,
        )
    }

    /// Pull every edge inward by the matching inset
    pub fn shrink(&self, insets: Insets) -> Rect {
        self.expand(insets.negate())
    }

    /// Rectangle of `size` centred inside `self`
    pub fn centre(&self, size: Size) -> Rect {
        Rect::new(
            self.x + (self.width - size.width) / 2,
            self.y + (self.height - size.height) / 2,
            size.width,
            size.height,
        )
    }

    pub fn is_degenerate(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

/// Point structure
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Size structure
///
/// Also used for min/max client constraints, where a zero component means
/// "no constraint" on that axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const ZERO: Size = Size::new(0, 0);

    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn is_zero(&self) -> bool {
        self.width == 0 && self.height == 0
    }
}

/// Per-edge distances, positive meaning "outward"
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Insets {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Insets {
    pub const ZERO: Insets = Insets::new(0, 0, 0, 0);

    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Edge-wise distance from `inner` out to `outer`
    pub fn between(outer: &Rect, inner: &Rect) -> Insets {
        Insets {
            left: inner.x - outer.x,
            top: inner.y - outer.y,
            right: outer.right() - inner.right(),
            bottom: outer.bottom() - inner.bottom(),
        }
    }

    pub fn negate(&self) -> Insets {
        Insets::new(-self.left, -self.top, -self.right, -self.bottom)
    }

    pub fn horizontal(&self) -> i32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> i32 {
        self.top + self.bottom
    }

    pub fn is_zero(&self) -> bool {
        *self == Insets::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_and_centre() {
        let r = Rect::from_edges(10, 20, 110, 70);
        assert_eq!(r, Rect::new(10, 20, 100, 50));
        assert_eq!(r.right(), 110);
        assert_eq!(r.bottom(), 70);

        let work = Rect::new(0, 0, 1920, 1080);
        let c = work.centre(Size::new(400, 400));
        assert_eq!((c.center_x(), c.center_y()), (960, 540));
    }

    #[test]
    fn insets_between_expand_and_shrink() {
        let outer = Rect::new(93, 100, 416, 439);
        let inner = Rect::new(100, 100, 402, 432);
        let insets = Insets::between(&outer, &inner);
        assert_eq!(insets, Insets::new(7, 0, 7, 7));
        assert_eq!(inner.expand(insets), outer);
        assert_eq!(outer.shrink(insets), inner);
        assert_eq!(insets.horizontal(), 14);
        assert_eq!(insets.vertical(), 7);
    }
}
