use crate::flatten::{CurveFlattener, FlattenParams};
use crate::math::{Cubic, Point, Rect};
use crate::path::{Path, PathEvent};
use crate::pen::{Pen, StrokeHints};
use crate::stroker::normalize;

/// Receiver for the dash machine's output commands.
///
/// The machine only ever produces moves and lines; curves are flattened
/// before segmentation because dash boundaries must be able to fall in the
/// middle of what was originally a curve.
pub trait PathSink {
    fn move_to(&mut self, pt: Point);
    fn line_to(&mut self, pt: Point);
    fn cubic_to(&mut self, _c1: Point, _c2: Point, _end: Point) {
        debug_assert!(false, "dash input must be flattened to lines before segmentation");
    }
}

impl PathSink for Path {
    fn move_to(&mut self, pt: Point) {
        Path::move_to(self, pt);
    }

    fn line_to(&mut self, pt: Point) {
        Path::line_to(self, pt);
    }
}

/// Position within the dash pattern: the entry index, the length left in
/// that entry, and whether the entry is "on". The values derived from the
/// pen's dash offset are kept so each sub-path can restart from them.
struct DashMachine<'a, S: PathSink> {
    sink: &'a mut S,
    pattern: &'a [f64],
    start_index: usize,
    start_remaining: f64,
    start_drawing: bool,
    index: usize,
    remaining: f64,
    drawing: bool,
    pen_down: bool,
    cur: Point,
    last: Point,
}

impl<'a, S: PathSink> DashMachine<'a, S> {
    fn new(sink: &'a mut S, pattern: &'a [f64], offset: f64) -> DashMachine<'a, S> {
        let (index, remaining, drawing) = pattern_phase(pattern, offset);
        DashMachine {
            sink,
            pattern,
            start_index: index,
            start_remaining: remaining,
            start_drawing: drawing,
            index,
            remaining,
            drawing,
            pen_down: false,
            cur: Point::default(),
            last: Point::default(),
        }
    }

    /// Each sub-path restarts the pattern at the offset phase.
    fn move_to(&mut self, pt: Point) {
        self.index = self.start_index;
        self.remaining = self.start_remaining;
        self.drawing = self.start_drawing;
        self.pen_down = false;
        self.cur = pt;
        self.last = pt;
    }

    fn line_to(&mut self, to: Point) {
        let seg_len = self.cur.distance(to);
        if seg_len == 0.0 {
            return;
        }
        let sx = self.cur.x;
        let sy = self.cur.y;
        let dx = (to.x - sx) / seg_len;
        let dy = (to.y - sy) / seg_len;

        let mut pos = 0.0;
        while self.remaining < seg_len - pos {
            pos += self.remaining;
            let boundary = Point::new(sx + dx * pos, sy + dy * pos);
            if self.drawing {
                self.draw_to(boundary);
            }
            self.last = boundary;
            self.index = (self.index + 1) % self.pattern.len();
            self.remaining = self.pattern[self.index];
            self.drawing = !self.drawing;
            if !self.drawing {
                self.pen_down = false;
            }
        }
        self.remaining -= seg_len - pos;
        if self.drawing && seg_len - pos > 0.0 {
            self.draw_to(to);
        }
        self.last = to;
        self.cur = to;
    }

    fn draw_to(&mut self, pt: Point) {
        if !self.pen_down {
            self.sink.move_to(self.last);
            self.pen_down = true;
        }
        self.sink.line_to(pt);
    }
}

/// Resolves a dash offset into a starting pattern position. Negative
/// offsets wrap backwards; the on/off flag toggles per consumed entry so
/// odd-length patterns alternate cyclically.
fn pattern_phase(pattern: &[f64], offset: f64) -> (usize, f64, bool) {
    let sum: f64 = pattern.iter().sum();
    let mut off = offset % sum;
    if off < 0.0 {
        off += sum;
    }
    let mut index = 0;
    let mut drawing = true;
    loop {
        let len = pattern[index];
        if off < len {
            return (index, len - off, drawing);
        }
        off -= len;
        index = (index + 1) % pattern.len();
        drawing = !drawing;
    }
}

/// Rewrites a path as the move/line sub-paths covering only the "on"
/// portions of the pen's dash pattern, ready to feed into a `Stroker`.
/// The output path is owned by the segmenter and reused across calls.
pub struct DashSegmenter {
    output: Path,
    inv_scale: f64,
}

impl Default for DashSegmenter {
    fn default() -> Self {
        DashSegmenter::new()
    }
}

impl DashSegmenter {
    pub fn new() -> DashSegmenter {
        DashSegmenter {
            output: Path::new(),
            inv_scale: 1.0,
        }
    }

    pub fn set_inv_scale(&mut self, inv_scale: f64) {
        self.inv_scale = inv_scale;
    }

    /// Segments `path` against the pen's dash pattern. A pen with no
    /// pattern passes the path through unchanged. The clip rectangle is
    /// accepted for interface parity and not consulted.
    pub fn process(&mut self, path: &Path, pen: &Pen, _clip: Rect, hints: StrokeHints) -> &Path {
        self.output.clear();

        if !pen.is_dashed() {
            self.output = path.clone();
            return &self.output;
        }

        let real_width = if pen.width <= 0.0 { 1.0 } else { pen.width };
        let params = FlattenParams::for_pen(real_width, hints, self.inv_scale);
        let events = normalize(path);
        let implicit_close = path.has_implicit_close();

        let mut machine = DashMachine::new(&mut self.output, pen.dash_pattern(), pen.dash_offset);
        let mut sub_start: Option<Point> = None;
        for ev in &events {
            match *ev {
                PathEvent::MoveTo(p) => {
                    if implicit_close {
                        if let Some(start) = sub_start {
                            if !machine.cur.coincides(start) {
                                machine.line_to(start);
                            }
                        }
                    }
                    machine.move_to(p);
                    sub_start = Some(p);
                }
                PathEvent::LineTo(p) => machine.line_to(p),
                PathEvent::CurveTo(c1, c2, p) => {
                    let cubic = Cubic::new(machine.cur, c1, c2, p);
                    for sample in CurveFlattener::new(cubic, &params) {
                        machine.line_to(sample);
                    }
                }
            }
        }
        if implicit_close {
            if let Some(start) = sub_start {
                if !machine.cur.coincides(start) {
                    machine.line_to(start);
                }
            }
        }

        &self.output
    }
}
