//! Integer pixel coordinates
//!
//! Coordinates use a bottom-left origin: `y` increases upward, so "falling"
//! means decreasing `y`.

/// A pixel coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

impl Point {
    /// Create a new point
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// The 4-connected neighbors inside a `width` x `height` grid.
    ///
    /// Neighbors are yielded in the fixed scan order `+x, -x, +y, -y`;
    /// adjacency tie-breaks depend on this order.
    pub fn neighbors4(self, width: u32, height: u32) -> impl Iterator<Item = Point> {
        let Point { x, y } = self;
        [
            (x + 1 < width).then(|| Point::new(x + 1, y)),
            (x > 0).then(|| Point::new(x - 1, y)),
            (y + 1 < height).then(|| Point::new(x, y + 1)),
            (y > 0).then(|| Point::new(x, y - 1)),
        ]
        .into_iter()
        .flatten()
    }

    /// Row-major index of this point in a grid of the given width.
    #[inline]
    pub fn index(self, width: u32) -> usize {
        self.y as usize * width as usize + self.x as usize
    }

    /// Inverse of [`Point::index`].
    #[inline]
    pub fn from_index(index: usize, width: u32) -> Self {
        let w = width as usize;
        Point::new((index % w) as u32, (index / w) as u32)
    }
}

impl From<(u32, u32)> for Point {
    fn from((x, y): (u32, u32)) -> Self {
        Point::new(x, y)
    }
}
