#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Point {
        Point { x, y }
    }

    /// Equality at single precision, absorbing representation noise in
    /// paths that were produced by float-based upstream code.
    pub(crate) fn coincides(self, pt: Point) -> bool {
        self.x as f32 == pt.x as f32 && self.y as f32 == pt.y as f32
    }

    pub(crate) fn distance(self, pt: Point) -> f64 {
        let dx = pt.x - self.x;
        let dy = pt.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn offset(&self, tx: f64, ty: f64) -> Point {
        Point::new(self.x + tx, self.y + ty)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Point::new(x as f64, y as f64)
    }
}

#[derive(Debug, Copy, Clone, Default)]
pub struct Extent {
    pub width: f64,
    pub height: f64,
}

impl Extent {
    pub fn new(width: f64, height: f64) -> Extent {
        Extent { width, height }
    }
}

impl From<(f64, f64)> for Extent {
    fn from((width, height): (f64, f64)) -> Self {
        Extent::new(width, height)
    }
}

#[derive(Debug, Copy, Clone, Default)]
pub struct Rect {
    pub xy: Point,
    pub size: Extent,
}

impl Rect {
    pub fn new(xy: Point, size: Extent) -> Rect {
        Rect { xy, size }
    }
}

impl From<(f64, f64, f64, f64)> for Rect {
    fn from((x, y, w, h): (f64, f64, f64, f64)) -> Self {
        Rect::new((x, y).into(), (w, h).into())
    }
}

#[derive(Debug, Copy, Clone, Default)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

/// A cubic Bezier segment.
#[derive(Debug, Copy, Clone)]
pub struct Cubic {
    pub p0: Point,
    pub p1: Point,
    pub p2: Point,
    pub p3: Point,
}

impl Cubic {
    pub fn new(p0: Point, p1: Point, p2: Point, p3: Point) -> Cubic {
        Cubic { p0, p1, p2, p3 }
    }

    pub fn point_at(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        let a = mt * mt * mt;
        let b = 3.0 * mt * mt * t;
        let c = 3.0 * mt * t * t;
        let d = t * t * t;
        Point::new(
            a * self.p0.x + b * self.p1.x + c * self.p2.x + d * self.p3.x,
            a * self.p0.y + b * self.p1.y + c * self.p2.y + d * self.p3.y,
        )
    }

    /// Bounding box of the control polygon. Contains the curve, which is
    /// all the flattening heuristic needs from it.
    pub fn bounds(&self) -> Bounds {
        let min = Point::new(
            self.p0.x.min(self.p1.x).min(self.p2.x).min(self.p3.x),
            self.p0.y.min(self.p1.y).min(self.p2.y).min(self.p3.y),
        );
        let max = Point::new(
            self.p0.x.max(self.p1.x).max(self.p2.x).max(self.p3.x),
            self.p0.y.max(self.p1.y).max(self.p2.y).max(self.p3.y),
        );
        Bounds { min, max }
    }
}

pub(crate) fn fuzzy_is_null(value: f32) -> bool {
    value.abs() <= 1e-5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coincides_at_single_precision() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(1.0 + 1e-9, 2.0 - 1e-9);
        assert!(a.coincides(b));
        assert!(!a.coincides(Point::new(1.001, 2.0)));
    }

    #[test]
    fn cubic_endpoints() {
        let c = Cubic::new(
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(20.0, 10.0),
            Point::new(30.0, 10.0),
        );
        let start = c.point_at(0.0);
        let end = c.point_at(1.0);
        assert!(start.distance(Point::new(0.0, 0.0)) < 1e-12);
        assert!(end.distance(Point::new(30.0, 10.0)) < 1e-12);
    }

    #[test]
    fn cubic_bounds_contain_control_points() {
        let c = Cubic::new(
            Point::new(0.0, 5.0),
            Point::new(-10.0, 0.0),
            Point::new(20.0, 30.0),
            Point::new(10.0, 10.0),
        );
        let b = c.bounds();
        assert_eq!(b.min.x, -10.0);
        assert_eq!(b.min.y, 0.0);
        assert_eq!(b.max.x, 20.0);
        assert_eq!(b.max.y, 30.0);
        assert_eq!(b.width(), 30.0);
        assert_eq!(b.height(), 30.0);
    }

    #[test]
    fn straight_cubic_stays_on_chord() {
        let c = Cubic::new(
            Point::new(0.0, 0.0),
            Point::new(25.0, 0.0),
            Point::new(75.0, 0.0),
            Point::new(100.0, 0.0),
        );
        for i in 0..=10 {
            let p = c.point_at(i as f64 / 10.0);
            assert!(p.y.abs() < 1e-12);
            assert!(p.x >= -1e-12 && p.x <= 100.0 + 1e-12);
        }
    }
}
