//! Core geometry types: Offset, Size, Region, Spacing.
//!
//! Positions and extents are measured in terminal cells.

use std::ops::Add;

// ---------------------------------------------------------------------------
// Offset
// ---------------------------------------------------------------------------

/// A 2D displacement or position in terminal cells.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Offset {
    pub x: i32,
    pub y: i32,
}

impl Offset {
    /// Create a new offset.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Offset {
    type Output = Offset;
    #[inline]
    fn add(self, rhs: Offset) -> Offset {
        Offset { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

// ---------------------------------------------------------------------------
// Size
// ---------------------------------------------------------------------------

/// Width and height in terminal cells.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
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

    /// Whether either dimension is zero or negative.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

// ---------------------------------------------------------------------------
// Region
// ---------------------------------------------------------------------------

/// A rectangular region in terminal cells defined by position and size.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Region {
    /// An empty region at the origin.
    pub const EMPTY: Region = Region { x: 0, y: 0, width: 0, height: 0 };

    /// Create a new region.
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// The right edge (exclusive): `x + width`.
    #[inline]
    pub const fn right(self) -> i32 {
        self.x + self.width
    }

    /// The bottom edge (exclusive): `y + height`.
    #[inline]
    pub const fn bottom(self) -> i32 {
        self.y + self.height
    }

    /// The top-left corner as an [`Offset`].
    #[inline]
    pub const fn offset(self) -> Offset {
        Offset { x: self.x, y: self.y }
    }

    /// The dimensions as a [`Size`].
    #[inline]
    pub const fn size(self) -> Size {
        Size { width: self.width, height: self.height }
    }

    /// Whether the point (x, y) lies inside this region.
    #[inline]
    pub const fn contains(self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Compute the intersection of two regions.
    ///
    /// Returns [`Region::EMPTY`] if the regions do not overlap.
    #[inline]
    pub const fn intersection(self, other: Region) -> Region {
        let x1 = if self.x > other.x { self.x } else { other.x };
        let y1 = if self.y > other.y { self.y } else { other.y };

        let sr = self.right();
        let or = other.right();
        let x2 = if sr < or { sr } else { or };

        let sb = self.bottom();
        let ob = other.bottom();
        let y2 = if sb < ob { sb } else { ob };

        let w = x2 - x1;
        let h = y2 - y1;

        if w <= 0 || h <= 0 {
            Region::EMPTY
        } else {
            Region { x: x1, y: y1, width: w, height: h }
        }
    }

    /// Translate the region by an [`Offset`].
    #[inline]
    pub const fn translate(self, offset: Offset) -> Region {
        Region { x: self.x + offset.x, y: self.y + offset.y, width: self.width, height: self.height }
    }

    /// Contract the region inward by the given [`Spacing`].
    ///
    /// Width and height are clamped to zero.
    #[inline]
    pub const fn shrink(self, margin: Spacing) -> Region {
        let w = self.width - margin.left - margin.right;
        let h = self.height - margin.top - margin.bottom;
        Region {
            x: self.x + margin.left,
            y: self.y + margin.top,
            width: if w > 0 { w } else { 0 },
            height: if h > 0 { h } else { 0 },
        }
    }
}

// ---------------------------------------------------------------------------
// Spacing
// ---------------------------------------------------------------------------

/// Spacing around the four sides of a rectangle, used for margin and padding.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Spacing {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl Spacing {
    /// Zero spacing on all sides.
    pub const ZERO: Spacing = Spacing { top: 0, right: 0, bottom: 0, left: 0 };

    /// Create spacing with explicit values for each side.
    #[inline]
    pub const fn new(top: i32, right: i32, bottom: i32, left: i32) -> Self {
        Self { top, right, bottom, left }
    }

    /// All four sides set to the same value.
    #[inline]
    pub const fn all(value: i32) -> Self {
        Self { top: value, right: value, bottom: value, left: value }
    }

    /// Symmetric spacing: `vertical` for top/bottom, `horizontal` for left/right.
    #[inline]
    pub const fn symmetric(vertical: i32, horizontal: i32) -> Self {
        Self { top: vertical, right: horizontal, bottom: vertical, left: horizontal }
    }

    /// Expand a CSS box shorthand of one to four values.
    ///
    /// Returns `None` for an empty slice or more than four values.
    pub fn from_shorthand(values: &[i32]) -> Option<Self> {
        match *values {
            [all] => Some(Self::all(all)),
            [vertical, horizontal] => Some(Self::symmetric(vertical, horizontal)),
            [top, horizontal, bottom] => Some(Self::new(top, horizontal, bottom, horizontal)),
            [top, right, bottom, left] => Some(Self::new(top, right, bottom, left)),
            _ => None,
        }
    }

    /// Total horizontal extent: `left + right`.
    #[inline]
    pub const fn width(self) -> i32 {
        self.left + self.right
    }

    /// Total vertical extent: `top + bottom`.
    #[inline]
    pub const fn height(self) -> i32 {
        self.top + self.bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_add() {
        assert_eq!(Offset::new(1, 2) + Offset::new(3, 4), Offset::new(4, 6));
    }

    #[test]
    fn size_is_empty() {
        assert!(Size::new(0, 3).is_empty());
        assert!(!Size::new(1, 1).is_empty());
    }

    #[test]
    fn region_edges() {
        let r = Region::new(2, 3, 10, 4);
        assert_eq!(r.right(), 12);
        assert_eq!(r.bottom(), 7);
        assert_eq!(r.offset(), Offset::new(2, 3));
        assert_eq!(r.size(), Size::new(10, 4));
    }

    #[test]
    fn region_contains_is_half_open() {
        let r = Region::new(0, 0, 5, 1);
        assert!(r.contains(0, 0));
        assert!(r.contains(4, 0));
        assert!(!r.contains(5, 0));
        assert!(!r.contains(0, 1));
        assert!(!r.contains(-1, 0));
    }

    #[test]
    fn region_intersection() {
        let a = Region::new(0, 0, 10, 10);
        let b = Region::new(5, 5, 10, 10);
        assert_eq!(a.intersection(b), Region::new(5, 5, 5, 5));
        let c = Region::new(20, 20, 1, 1);
        assert_eq!(a.intersection(c), Region::EMPTY);
    }

    #[test]
    fn region_translate() {
        let r = Region::new(1, 1, 2, 2).translate(Offset::new(3, -1));
        assert_eq!(r, Region::new(4, 0, 2, 2));
    }

    #[test]
    fn region_shrink_clamps() {
        let r = Region::new(0, 0, 5, 1).shrink(Spacing::symmetric(0, 2));
        assert_eq!(r, Region::new(2, 0, 1, 1));
        let tiny = Region::new(0, 0, 2, 1).shrink(Spacing::all(3));
        assert_eq!(tiny.width, 0);
        assert_eq!(tiny.height, 0);
    }

    #[test]
    fn spacing_shorthand() {
        assert_eq!(Spacing::from_shorthand(&[1]), Some(Spacing::all(1)));
        assert_eq!(Spacing::from_shorthand(&[0, 2]), Some(Spacing::new(0, 2, 0, 2)));
        assert_eq!(Spacing::from_shorthand(&[1, 2, 3]), Some(Spacing::new(1, 2, 3, 2)));
        assert_eq!(Spacing::from_shorthand(&[1, 2, 3, 4]), Some(Spacing::new(1, 2, 3, 4)));
        assert_eq!(Spacing::from_shorthand(&[]), None);
        assert_eq!(Spacing::from_shorthand(&[1, 2, 3, 4, 5]), None);
    }

    #[test]
    fn spacing_extents() {
        let s = Spacing::new(1, 2, 3, 4);
        assert_eq!(s.width(), 6);
        assert_eq!(s.height(), 4);
    }
}
