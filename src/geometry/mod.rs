//! Geometric primitives and colors used by the drawing operations.
//!
//! All coordinates are in typesetting points (1 point = 1/72 inch), with the
//! origin at the lower-left corner of the page.

/// A 2D point in page space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl Point {
    /// Create a new point.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_plotter::geometry::Point;
    ///
    /// let point = Point::new(10.0, 20.0);
    /// assert_eq!(point.x, 10.0);
    /// assert_eq!(point.y, 20.0);
    /// ```
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Whether both coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// An axis-aligned rectangle given by its minimum and maximum corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Lower-left corner
    pub min: Point,
    /// Upper-right corner
    pub max: Point,
}

impl Default for Rect {
    fn default() -> Self {
        Self::new(Point::default(), Point::default())
    }
}

impl Rect {
    /// Create a rectangle from two corners.
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Create a rectangle from corner coordinates.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_plotter::geometry::Rect;
    ///
    /// let letter = Rect::from_coords(0.0, 0.0, 612.0, 792.0);
    /// assert_eq!(letter.extent_x(), 612.0);
    /// assert_eq!(letter.extent_y(), 792.0);
    /// ```
    pub fn from_coords(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self::new(Point::new(x0, y0), Point::new(x1, y1))
    }

    /// A rectangle that contains nothing; extending it by a point yields
    /// a zero-sized rectangle at that point.
    pub fn degenerate() -> Self {
        Self::from_coords(f64::MAX, f64::MAX, -f64::MAX, -f64::MAX)
    }

    /// Grow the rectangle to include `point`.
    pub fn extend_by(&mut self, point: Point) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
    }

    /// Grow the rectangle to include every point.
    pub fn extend_by_all(&mut self, points: &[Point]) {
        for &point in points {
            self.extend_by(point);
        }
    }

    /// Horizontal size.
    pub fn extent_x(&self) -> f64 {
        (self.max.x - self.min.x).abs()
    }

    /// Vertical size.
    pub fn extent_y(&self) -> f64 {
        (self.max.y - self.min.y).abs()
    }

    /// True when a minimum coordinate exceeds its maximum.
    pub fn is_degenerate(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    /// Swap coordinates so that `min` is the lower-left corner.
    pub fn normalize(&mut self) {
        if self.min.x > self.max.x {
            std::mem::swap(&mut self.min.x, &mut self.max.x);
        }
        if self.min.y > self.max.y {
            std::mem::swap(&mut self.min.y, &mut self.max.y);
        }
    }

    /// Corners in counter-clockwise order starting at `min`.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.min.x, self.min.y),
            Point::new(self.max.x, self.min.y),
            Point::new(self.max.x, self.max.y),
            Point::new(self.min.x, self.max.y),
        ]
    }

    /// Whether all coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }
}

/// An RGB color with channels in the range 0.0 - 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    /// Red channel
    pub r: f64,
    /// Green channel
    pub g: f64,
    /// Blue channel
    pub b: f64,
}

impl Color {
    /// Create a new color.
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Black.
    pub fn black() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// White.
    pub fn white() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }

    /// Mid gray at the given level.
    pub fn gray(level: f64) -> Self {
        Self::new(level, level, level)
    }

    /// Whether all channels are finite.
    pub fn is_finite(&self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite()
    }
}
