// src/bsp/bsp_util.rs
// Grid geometry shared by the partition tree, rooms and corridors.

/// A single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point2D {
    pub x: i32,
    pub y: i32,
}

impl Point2D {
    pub fn new(x: i32, y: i32) -> Self {
        Point2D { x, y }
    }
}

/// An axis-aligned block of cells: columns `x..x + width`, rows `y..y + height`.
///
/// Used for node bounds, rooms and corridor segments alike. Fields are only
/// readable, so a `Rect` never changes after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

impl Rect {
    /// # Panics
    ///
    /// Panics if `width` or `height` is not positive. Node bounds, rooms and
    /// corridor segments are all built from ranges that keep both extents at least 1.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        assert!(width > 0 && height > 0, "empty rect {width}x{height}");
        Rect { x, y, width, height }
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// One past the last column.
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// One past the last row.
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn area(&self) -> i64 {
        self.width as i64 * self.height as i64
    }

    pub fn contains_point(&self, point: Point2D) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    pub fn contains_rect(&self, other: &Rect) -> bool {
        self.contains_with_margin(other, 0)
    }

    /// `other` fits inside `self` leaving at least `margin` cells free on all four sides.
    pub fn contains_with_margin(&self, other: &Rect, margin: i32) -> bool {
        other.x >= self.x + margin
            && other.y >= self.y + margin
            && other.right() <= self.right() - margin
            && other.bottom() <= self.bottom() - margin
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// All covered cells, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Point2D> {
        let Rect { x, y, width, height } = *self;
        (y..y + height).flat_map(move |row| (x..x + width).map(move |col| Point2D::new(col, row)))
    }
}
