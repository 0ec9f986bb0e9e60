use ndarray::Ix;

pub(crate) type Coord = usize;

#[derive(Clone, Eq, Hash, Copy, PartialEq, Ord, PartialOrd, Debug, Default)]
/// A location `(x, y)` on a discrete grid, either a pixel of a [`Screenshot`](crate::Screenshot) or a cell/vertex of a puzzle.
/// The top left corner is `Location(0, 0)`.
pub struct Location(pub Coord, pub Coord);

impl Location {
    pub(crate) fn as_index(&self) -> (Coord, Coord) {
        (self.1, self.0)
    }

    /// Offsets wrap, so stepping off the top or left edge yields a location which fails any bounds check.
    pub(crate) fn offset_by(self, rhs: (isize, isize)) -> Self {
        Self(self.0.wrapping_add_signed(rhs.0), self.1.wrapping_add_signed(rhs.1))
    }

    /// Whether this location lies on a `(width, height)` grid.
    pub(crate) fn within(&self, dims: (Coord, Coord)) -> bool {
        self.0 < dims.0 && self.1 < dims.1
    }
}

impl From<(Ix, Ix)> for Location {
    fn from(value: (Ix, Ix)) -> Self {
        Self(value.1, value.0)
    }
}

/// A position in pixel space. Unlike [`Location`] this may lie off the image, e.g. while sampling around a cell center.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Point {
    /// Pixels from the left edge.
    pub x: i32,
    /// Pixels from the top edge.
    pub y: i32,
}

impl Point {
    /// Create a new point.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<Location> for Point {
    fn from(value: Location) -> Self {
        Self::new(value.0 as i32, value.1 as i32)
    }
}

/// An axis-aligned rectangle in pixel space, anchored at its top left corner.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Rect {
    /// Left edge.
    pub left: i32,
    /// Top edge.
    pub top: i32,
    /// Horizontal extent; `right() - left`.
    pub width: i32,
    /// Vertical extent; `bottom() - top`.
    pub height: i32,
}

impl Rect {
    /// Build a rectangle from its four edges.
    pub const fn from_edges(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, width: right - left, height: bottom - top }
    }

    /// Right edge.
    pub const fn right(&self) -> i32 {
        self.left + self.width
    }

    /// Bottom edge.
    pub const fn bottom(&self) -> i32 {
        self.top + self.height
    }

    /// `width / height`, or `0.0` if the rectangle has no height.
    pub fn aspect_ratio(&self) -> f64 {
        if self.height == 0 {
            return 0.0;
        }
        self.width as f64 / self.height as f64
    }
}
