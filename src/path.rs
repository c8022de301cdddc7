use crate::Point;

/// Per-command tag. `MoveTo` and `LineTo` own one point each, `CurveTo`
/// owns three (two control points and the endpoint).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Verb {
    MoveTo,
    LineTo,
    CurveTo,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PathEvent {
    MoveTo(Point),
    LineTo(Point),
    CurveTo(Point, Point, Point),
}

/// Command storage as two parallel growable sequences: coordinates and
/// per-command tags. Paths are consumed read-only by the stroker and the
/// dash segmenter; the segmenter also fills one as its output.
#[derive(Debug, Default, Clone)]
pub struct Path {
    points: Vec<Point>,
    verbs: Vec<Verb>,
    implicit_close: bool,
}

impl Path {
    pub fn new() -> Path {
        Default::default()
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.verbs.clear();
        self.implicit_close = false;
    }

    pub fn move_to<P: Into<Point>>(&mut self, pt: P) {
        self.points.push(pt.into());
        self.verbs.push(Verb::MoveTo);
    }

    pub fn line_to<P: Into<Point>>(&mut self, pt: P) {
        if self.verbs.is_empty() {
            self.move_to(pt);
            return;
        }
        self.points.push(pt.into());
        self.verbs.push(Verb::LineTo);
    }

    pub fn cubic_to<P: Into<Point>>(&mut self, cp1: P, cp2: P, pt: P) {
        if self.verbs.is_empty() {
            self.move_to(pt);
            return;
        }
        self.points.push(cp1.into());
        self.points.push(cp2.into());
        self.points.push(pt.into());
        self.verbs.push(Verb::CurveTo);
    }

    /// Marks the path as a closed loop even when its last point does not
    /// repeat the first one.
    pub fn close_implicit(&mut self) {
        self.implicit_close = true;
    }

    pub fn has_implicit_close(&self) -> bool {
        self.implicit_close
    }

    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }

    /// Number of commands in the path.
    pub fn len(&self) -> usize {
        self.verbs.len()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn verbs(&self) -> &[Verb] {
        &self.verbs
    }

    pub fn events(&self) -> PathEvents {
        PathEvents {
            path: self,
            verb: 0,
            point: 0,
        }
    }
}

pub struct PathEvents<'a> {
    path: &'a Path,
    verb: usize,
    point: usize,
}

impl<'a> Iterator for PathEvents<'a> {
    type Item = PathEvent;

    fn next(&mut self) -> Option<PathEvent> {
        let verb = *self.path.verbs.get(self.verb)?;
        self.verb += 1;
        let pts = &self.path.points;
        match verb {
            Verb::MoveTo => {
                let p = pts[self.point];
                self.point += 1;
                Some(PathEvent::MoveTo(p))
            }
            Verb::LineTo => {
                let p = pts[self.point];
                self.point += 1;
                Some(PathEvent::LineTo(p))
            }
            Verb::CurveTo => {
                let c1 = pts[self.point];
                let c2 = pts[self.point + 1];
                let p = pts[self.point + 2];
                self.point += 3;
                Some(PathEvent::CurveTo(c1, c2, p))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_follow_commands() {
        let mut path = Path::new();
        path.move_to((0.0, 0.0));
        path.line_to((10.0, 0.0));
        path.cubic_to((12.0, 0.0), (15.0, 3.0), (15.0, 6.0));

        let events: Vec<_> = path.events().collect();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0], PathEvent::MoveTo(Point::new(0.0, 0.0)));
        assert_eq!(events[1], PathEvent::LineTo(Point::new(10.0, 0.0)));
        assert_eq!(
            events[2],
            PathEvent::CurveTo(
                Point::new(12.0, 0.0),
                Point::new(15.0, 3.0),
                Point::new(15.0, 6.0)
            )
        );
    }

    #[test]
    fn leading_line_degrades_to_move() {
        let mut path = Path::new();
        path.line_to((5.0, 5.0));
        assert_eq!(path.verbs(), &[Verb::MoveTo]);
    }

    #[test]
    fn clear_resets_implicit_close() {
        let mut path = Path::new();
        path.move_to((0.0, 0.0));
        path.close_implicit();
        assert!(path.has_implicit_close());
        path.clear();
        assert!(!path.has_implicit_close());
        assert!(path.is_empty());
    }
}
