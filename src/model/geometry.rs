//! Platform-free geometry in Cocoa screen coordinates (origin at the bottom
//! left, y grows upwards).

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self { Self { x, y } }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self { Self { width, height } }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const fn new(origin: Point, size: Size) -> Self { Self { origin, size } }

    pub const fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(Point::new(x, y), Size::new(width, height))
    }

    pub fn mid_x(&self) -> f64 { self.origin.x + self.size.width / 2.0 }

    pub fn min_y(&self) -> f64 { self.origin.y }

    pub fn max_y(&self) -> f64 { self.origin.y + self.size.height }

    /// A rect of `size` whose horizontal center is `mid_x` and whose bottom
    /// edge is `min_y`.
    pub fn centered_at(mid_x: f64, min_y: f64, size: Size) -> Self {
        Self::new(Point::new(mid_x - size.width / 2.0, min_y), size)
    }
}
