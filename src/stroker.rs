use clamped::Clamp;

use crate::arc::ArcTessellator;
use crate::flatten::{CurveFlattener, FlattenParams};
use crate::math::{fuzzy_is_null, Cubic, Point, Rect};
use crate::path::{Path, PathEvent};
use crate::pen::{CapStyle, JoinStyle, Pen, StrokeHints};

/// Current position and outward half-width normal of the walk. Only
/// meaningful while a single `process` call is underway.
#[derive(Debug, Copy, Clone, Default)]
struct RunState {
    cur: Point,
    nvx: f32,
    nvy: f32,
}

/// Converts a path and a pen into one continuous triangle strip.
///
/// Every emitted position comes as a pair of vertices offset by plus and
/// minus the half-width normal, so consecutive pairs form the quads of the
/// stroke body. Disjoint sub-paths are bridged with zero-area triangles
/// instead of starting a new strip.
///
/// The instance owns its vertex buffer; `process` truncates it (keeping
/// capacity) and refills it, so one `Stroker` can be reused across paths.
pub struct Stroker {
    vertices: Vec<f32>,
    state: RunState,
    inv_scale: f64,
    width: f32,
    miter_limit: f32,
    cap_style: CapStyle,
    join_style: JoinStyle,
    arc: ArcTessellator,
    flatten: FlattenParams,
}

impl Default for Stroker {
    fn default() -> Self {
        Stroker::new()
    }
}

impl Stroker {
    pub fn new() -> Stroker {
        Stroker {
            vertices: Vec::new(),
            state: RunState::default(),
            inv_scale: 1.0,
            width: 0.5,
            miter_limit: 2.0,
            cap_style: CapStyle::Square,
            join_style: JoinStyle::Bevel,
            arc: ArcTessellator::new(4),
            flatten: FlattenParams::for_pen(1.0, StrokeHints::empty(), 1.0),
        }
    }

    /// Inverse of the device scale factor currently applied by the caller's
    /// transform. Cosmetic pens multiply their width by it; geometric pens
    /// divide their flattening tolerance by it.
    pub fn set_inv_scale(&mut self, inv_scale: f64) {
        self.inv_scale = inv_scale;
    }

    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    /// Number of (x, y) vertices currently in the buffer.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 2
    }

    /// Strokes `path` into the vertex buffer and returns a view of it.
    ///
    /// The clip rectangle is accepted for interface parity with the dash
    /// pass and is not consulted. Degenerate input (fewer than two distinct
    /// points) yields an empty buffer rather than an error.
    pub fn process(
        &mut self,
        path: &Path,
        pen: &Pen,
        _clip: Rect,
        hints: StrokeHints,
    ) -> &[f32] {
        self.vertices.clear();

        let events = normalize(path);
        let point_count: usize = events
            .iter()
            .map(|ev| match ev {
                PathEvent::CurveTo(..) => 3,
                _ => 1,
            })
            .sum();
        if point_count < 2 {
            return &self.vertices;
        }

        let cosmetic = hints.contains(StrokeHints::COSMETIC_PEN);
        let real_width = if pen.width <= 0.0 { 1.0 } else { pen.width };
        self.width = (real_width / 2.0) as f32;
        if cosmetic {
            self.width *= self.inv_scale as f32;
        }
        self.miter_limit = (pen.miter_limit * real_width) as f32;
        self.flatten = FlattenParams::for_pen(real_width, hints, self.inv_scale);

        self.cap_style = pen.cap;
        self.join_style = pen.join;
        let roundness = if self.flatten.simplify {
            // Sub-pixel strokes gain nothing from curved caps and joins.
            if self.cap_style == CapStyle::Round {
                self.cap_style = CapStyle::Square;
            }
            if self.join_style == JoinStyle::Round {
                self.join_style = JoinStyle::Miter;
            }
            1
        } else {
            (((real_width * self.flatten.curviness_mul).round()) as i32).clamped(4, 24)
        };
        self.arc = ArcTessellator::new(roundness);

        let implicit_close = path.has_implicit_close();
        let mut previous: Option<(Point, Point, bool)> = None;

        let mut idx = 0;
        while idx < events.len() {
            let mut end = idx + 1;
            while end < events.len() && !matches!(events[end], PathEvent::MoveTo(_)) {
                end += 1;
            }
            let sub = &events[idx..end];
            idx = end;

            let start = match sub.first() {
                Some(PathEvent::MoveTo(p)) => *p,
                _ => continue,
            };

            // Coordinate pairs following the move, in storage order.
            let mut targets = Vec::new();
            for ev in &sub[1..] {
                match *ev {
                    PathEvent::LineTo(p) => targets.push(p),
                    PathEvent::CurveTo(c1, c2, p) => {
                        targets.push(c1);
                        targets.push(c2);
                        targets.push(p);
                    }
                    PathEvent::MoveTo(_) => break,
                }
            }
            let last = match targets.last() {
                Some(p) => *p,
                None => continue,
            };
            let first_distinct = match targets.iter().copied().find(|p| !p.coincides(start)) {
                Some(p) => p,
                None => continue,
            };
            let second = targets[0];
            let ends_at_start = start.coincides(last);

            if let Some((pstart, psecond, pends)) = previous.take() {
                self.end_cap_or_join_closed(pstart, psecond, implicit_close, pends);
            }

            // A closed loop has no visible cap at the seam.
            let cap = self.cap_style;
            if ends_at_start || implicit_close {
                self.cap_style = CapStyle::Flat;
            }
            self.move_to(start, first_distinct);
            self.cap_style = cap;

            let mut first_segment = true;
            for ev in &sub[1..] {
                match *ev {
                    PathEvent::MoveTo(_) => break,
                    PathEvent::LineTo(p) => {
                        if self.state.cur.coincides(p) {
                            continue;
                        }
                        if !first_segment {
                            self.join(p);
                        }
                        self.line_to(p);
                        first_segment = false;
                    }
                    PathEvent::CurveTo(c1, c2, p) => {
                        let cur = self.state.cur;
                        if cur.coincides(c1) && c1.coincides(c2) && c2.coincides(p) {
                            continue;
                        }
                        if !first_segment {
                            self.join(c1);
                        }
                        self.cubic_to(c1, c2, p);
                        first_segment = false;
                    }
                }
            }

            previous = Some((start, second, ends_at_start));
        }

        if let Some((start, second, ends_at_start)) = previous {
            self.end_cap_or_join_closed(start, second, implicit_close, ends_at_start);
        }

        &self.vertices
    }

    /// Normal of the segment `from -> to`, scaled to the half-width.
    /// `None` when the segment has exactly zero length.
    fn normal_vector(&self, from: Point, to: Point) -> Option<(f32, f32)> {
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        if dx == 0.0 && dy == 0.0 {
            return None;
        }
        let width = f64::from(self.width);
        let pw = if dx == 0.0 {
            width / dy.abs()
        } else if dy == 0.0 {
            width / dx.abs()
        } else {
            width / (dx * dx + dy * dy).sqrt()
        };
        Some(((-dy * pw) as f32, (dx * pw) as f32))
    }

    fn emit_line_segment(&mut self, x: f32, y: f32, vx: f32, vy: f32) {
        self.vertices.push(x + vx);
        self.vertices.push(y + vy);
        self.vertices.push(x - vx);
        self.vertices.push(y - vy);
    }

    /// Starts a sub-path at `pt`, emitting the start cap and the first
    /// vertex pair. `next` is the first following point distinct from `pt`
    /// and orients the initial normal.
    fn move_to(&mut self, pt: Point, next: Point) {
        self.state.cur = pt;
        let (nvx, nvy) = match self.normal_vector(pt, next) {
            Some(n) => n,
            None => {
                debug_assert!(false, "move target must be distinct from the start point");
                return;
            }
        };
        self.state.nvx = nvx;
        self.state.nvy = nvy;

        let cx = pt.x as f32;
        let cy = pt.y as f32;

        // When a previous sub-path already filled the buffer, duplicate this
        // strip's first vertex so the two strips connect through zero-area
        // triangles.
        let invisible_jump = !self.vertices.is_empty();

        match self.cap_style {
            CapStyle::Flat => {
                if invisible_jump {
                    self.vertices.push(cx + nvx);
                    self.vertices.push(cy + nvy);
                }
            }
            CapStyle::Square => {
                let sx = cx - nvy;
                let sy = cy + nvx;
                if invisible_jump {
                    self.vertices.push(sx + nvx);
                    self.vertices.push(sy + nvy);
                }
                self.emit_line_segment(sx, sy, nvx, nvy);
            }
            CapStyle::Round => {
                let pts = self.arc.arc_points(cx, cy, cx + nvx, cy + nvy, cx - nvx, cy - nvy);
                let n = pts.len() / 2;
                // Interleave arc points from the two ends toward the middle
                // so the cap stays a valid part of the strip.
                let mut order = Vec::with_capacity(n);
                let (mut front, mut end) = (0, n);
                while front != end {
                    order.push(end - 1);
                    end -= 1;
                    if front == end {
                        break;
                    }
                    order.push(front);
                    front += 1;
                }
                if invisible_jump {
                    if let Some(&first) = order.last() {
                        self.vertices.push(pts[2 * first]);
                        self.vertices.push(pts[2 * first + 1]);
                    }
                }
                for &i in order.iter().rev() {
                    self.vertices.push(pts[2 * i]);
                    self.vertices.push(pts[2 * i + 1]);
                }
            }
        }

        self.emit_line_segment(cx, cy, nvx, nvy);
    }

    fn line_to(&mut self, pt: Point) {
        self.emit_line_segment(pt.x as f32, pt.y as f32, self.state.nvx, self.state.nvy);
        self.state.cur = pt;
    }

    /// Flattens the curve and emits each sample like a line endpoint. The
    /// normal at each sample is taken against the previous sample rather
    /// than the true tangent; at these segment lengths the difference is
    /// not visible.
    fn cubic_to(&mut self, c1: Point, c2: Point, end: Point) {
        let cubic = Cubic::new(self.state.cur, c1, c2, end);
        let mut prev = self.state.cur;
        let mut nvx = self.state.nvx;
        let mut nvy = self.state.nvy;
        for sample in CurveFlattener::new(cubic, &self.flatten) {
            if let Some((vx, vy)) = self.normal_vector(prev, sample) {
                nvx = vx;
                nvy = vy;
            }
            self.emit_line_segment(sample.x as f32, sample.y as f32, nvx, nvy);
            prev = sample;
        }
        self.state.cur = prev;
        self.state.nvx = nvx;
        self.state.nvy = nvy;
    }

    /// Joins the stroke at the current point toward the next segment
    /// direction, then emits the vertex pair that starts that segment.
    /// A zero-length direction leaves the stroke untouched.
    fn join(&mut self, toward: Point) {
        let (nvx, nvy) = match self.normal_vector(self.state.cur, toward) {
            Some(n) => n,
            None => return,
        };
        let cx = self.state.cur.x as f32;
        let cy = self.state.cur.y as f32;

        match self.join_style {
            JoinStyle::Bevel => {}
            JoinStyle::Miter | JoinStyle::SvgMiter => {
                let count = self.vertices.len();
                debug_assert!(count >= 4, "join requires an open strip");
                if count >= 4 {
                    // The previous normal is recovered from the last vertex
                    // rather than carried as state.
                    let prev_nvx = self.vertices[count - 2] - cx;
                    let prev_nvy = self.vertices[count - 1] - cy;
                    let xprod = prev_nvx * nvy - prev_nvy * nvx;

                    // Parallel segments get a plain bevel.
                    if !fuzzy_is_null(xprod) {
                        let (px, py, qx, qy);
                        if xprod < 0.0 {
                            px = self.vertices[count - 2];
                            py = self.vertices[count - 1];
                            qx = cx - nvx;
                            qy = cy - nvy;
                        } else {
                            px = self.vertices[count - 4];
                            py = self.vertices[count - 3];
                            qx = cx + nvx;
                            qy = cy + nvy;
                        }

                        let pu = px * prev_nvx + py * prev_nvy;
                        let qv = qx * nvx + qy * nvy;
                        let ix = (nvy * pu - prev_nvy * qv) / xprod;
                        let iy = (prev_nvx * qv - nvx * pu) / xprod;

                        // Past the miter limit the spike is dropped and the
                        // corner stays beveled.
                        if (ix - qx) * (ix - qx) + (iy - qy) * (iy - qy)
                            <= self.miter_limit * self.miter_limit
                        {
                            self.vertices.push(ix);
                            self.vertices.push(iy);
                            self.vertices.push(ix);
                            self.vertices.push(iy);
                        }
                    }
                }
            }
            JoinStyle::Round => {
                let count = self.vertices.len();
                debug_assert!(count >= 2, "join requires an open strip");
                if count >= 2 {
                    let prev_nvx = self.vertices[count - 2] - cx;
                    let prev_nvy = self.vertices[count - 1] - cy;
                    if nvx * prev_nvy - nvy * prev_nvx < 0.0 {
                        let pts = self.arc.arc_points(0.0, 0.0, nvx, nvy, -prev_nvx, -prev_nvy);
                        for p in pts.chunks(2).rev() {
                            self.emit_line_segment(cx, cy, p[0], p[1]);
                        }
                    } else {
                        let pts = self.arc.arc_points(0.0, 0.0, -prev_nvx, -prev_nvy, nvx, nvy);
                        for p in pts.chunks(2) {
                            self.emit_line_segment(cx, cy, p[0], p[1]);
                        }
                    }
                }
            }
        }

        self.state.nvx = nvx;
        self.state.nvy = nvy;
        self.emit_line_segment(cx, cy, nvx, nvy);
    }

    fn end_cap(&mut self) {
        match self.cap_style {
            CapStyle::Flat => {}
            CapStyle::Square => {
                let cx = self.state.cur.x as f32;
                let cy = self.state.cur.y as f32;
                self.emit_line_segment(
                    cx + self.state.nvy,
                    cy - self.state.nvx,
                    self.state.nvx,
                    self.state.nvy,
                );
            }
            CapStyle::Round => {
                let count = self.vertices.len();
                debug_assert!(count >= 4, "round cap requires an open strip");
                if count >= 4 {
                    // Read the two edge vertices before any growing push.
                    let from_x = self.vertices[count - 2];
                    let from_y = self.vertices[count - 1];
                    let to_x = self.vertices[count - 4];
                    let to_y = self.vertices[count - 3];
                    let cx = self.state.cur.x as f32;
                    let cy = self.state.cur.y as f32;
                    let pts = self.arc.arc_points(cx, cy, from_x, from_y, to_x, to_y);
                    let n = pts.len() / 2;
                    let (mut front, mut end) = (0, n);
                    while front != end {
                        self.vertices.push(pts[2 * end - 2]);
                        self.vertices.push(pts[2 * end - 1]);
                        end -= 1;
                        if front == end {
                            break;
                        }
                        self.vertices.push(pts[2 * front]);
                        self.vertices.push(pts[2 * front + 1]);
                        front += 1;
                    }
                }
            }
        }
    }

    /// Finishes a sub-path. Closed loops get their seam joined instead of
    /// capped; an implicit close first draws the segment back to the start.
    /// Always ends by duplicating the last vertex so a following sub-path
    /// can bridge over.
    fn end_cap_or_join_closed(
        &mut self,
        start: Point,
        second: Point,
        implicit_close: bool,
        ends_at_start: bool,
    ) {
        if ends_at_start {
            self.join(second);
        } else if implicit_close {
            self.join(start);
            self.line_to(start);
            self.join(second);
        } else {
            self.end_cap();
        }

        let count = self.vertices.len();
        if count >= 2 {
            let x = self.vertices[count - 2];
            let y = self.vertices[count - 1];
            self.vertices.push(x);
            self.vertices.push(y);
        }
    }
}

/// Collapses consecutive duplicates at single precision: repeated line
/// targets vanish, fully degenerate curves vanish, runs of moves keep only
/// the last one. Zero-length segments have no defined normal and must not
/// reach the walk.
pub(crate) fn normalize(path: &Path) -> Vec<PathEvent> {
    let mut out: Vec<PathEvent> = Vec::with_capacity(path.len());
    let mut cur: Option<Point> = None;
    for ev in path.events() {
        match ev {
            PathEvent::MoveTo(p) => {
                if let Some(PathEvent::MoveTo(_)) = out.last() {
                    out.pop();
                }
                out.push(ev);
                cur = Some(p);
            }
            PathEvent::LineTo(p) => {
                if cur.map_or(false, |c| c.coincides(p)) {
                    continue;
                }
                out.push(ev);
                cur = Some(p);
            }
            PathEvent::CurveTo(c1, c2, p) => {
                if let Some(c) = cur {
                    if c.coincides(c1) && c1.coincides(c2) && c2.coincides(p) {
                        continue;
                    }
                }
                out.push(ev);
                cur = Some(p);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stroke(path: &Path, pen: &Pen) -> Vec<f32> {
        let mut stroker = Stroker::new();
        stroker
            .process(path, pen, Rect::default(), StrokeHints::empty())
            .to_vec()
    }

    fn assert_buffer_eq(got: &[f32], want: &[f32]) {
        assert_eq!(got.len(), want.len(), "buffer length\n{:?}\n{:?}", got, want);
        for (i, (g, w)) in got.iter().zip(want.iter()).enumerate() {
            assert!((g - w).abs() < 1e-4, "float {} differs: {} vs {}", i, g, w);
        }
    }

    #[test]
    fn horizontal_line_square_caps() {
        let mut path = Path::new();
        path.move_to((0.0, 0.0));
        path.line_to((100.0, 0.0));
        let pen = Pen::new(10.0);

        let verts = stroke(&path, &pen);
        assert_buffer_eq(
            &verts,
            &[
                -5.0, 5.0, -5.0, -5.0, // square start cap
                0.0, 5.0, 0.0, -5.0, // start point
                100.0, 5.0, 100.0, -5.0, // end point
                105.0, 5.0, 105.0, -5.0, // square end cap
                105.0, -5.0, // trailing bridge duplicate
            ],
        );
    }

    #[test]
    fn empty_and_degenerate_paths_emit_nothing() {
        let pen = Pen::new(4.0);
        assert!(stroke(&Path::new(), &pen).is_empty());

        let mut single = Path::new();
        single.move_to((3.0, 3.0));
        assert!(stroke(&single, &pen).is_empty());

        let mut dups = Path::new();
        dups.move_to((3.0, 3.0));
        dups.line_to((3.0, 3.0));
        dups.line_to((3.0, 3.0));
        assert!(stroke(&dups, &pen).is_empty());
    }

    #[test]
    fn zero_width_pen_strokes_as_hairline() {
        let mut path = Path::new();
        path.move_to((0.0, 0.0));
        path.line_to((10.0, 0.0));
        let mut pen = Pen::new(0.0);
        pen.cap = CapStyle::Flat;

        let verts = stroke(&path, &pen);
        assert_buffer_eq(
            &verts,
            &[0.0, 0.5, 0.0, -0.5, 10.0, 0.5, 10.0, -0.5, 10.0, -0.5],
        );
    }

    #[test]
    fn disjoint_sub_paths_are_bridged_with_degenerate_triangles() {
        let mut path = Path::new();
        path.move_to((0.0, 0.0));
        path.line_to((10.0, 0.0));
        path.move_to((0.0, 5.0));
        path.line_to((10.0, 5.0));
        let mut pen = Pen::new(2.0);
        pen.cap = CapStyle::Flat;

        let verts = stroke(&path, &pen);
        assert_buffer_eq(
            &verts,
            &[
                0.0, 1.0, 0.0, -1.0, 10.0, 1.0, 10.0, -1.0, //
                10.0, -1.0, // end-of-strip duplicate
                0.0, 6.0, // start-of-strip duplicate
                0.0, 6.0, 0.0, 4.0, 10.0, 6.0, 10.0, 4.0, //
                10.0, 4.0, // trailing duplicate
            ],
        );
    }

    #[test]
    fn miter_join_pinches_the_corner() {
        let mut path = Path::new();
        path.move_to((0.0, 0.0));
        path.line_to((10.0, 0.0));
        path.line_to((10.0, 10.0));
        let mut pen = Pen::new(2.0);
        pen.cap = CapStyle::Flat;
        pen.join = JoinStyle::Miter;

        let verts = stroke(&path, &pen);
        assert_buffer_eq(
            &verts,
            &[
                0.0, 1.0, 0.0, -1.0, 10.0, 1.0, 10.0, -1.0, //
                11.0, -1.0, 11.0, -1.0, // miter spike, twice
                9.0, 0.0, 11.0, 0.0, // post-join segment start
                9.0, 10.0, 11.0, 10.0, //
                11.0, 10.0, // trailing duplicate
            ],
        );
    }

    #[test]
    fn svg_miter_matches_miter() {
        let mut path = Path::new();
        path.move_to((0.0, 0.0));
        path.line_to((10.0, 0.0));
        path.line_to((10.0, 10.0));
        let mut pen = Pen::new(2.0);
        pen.cap = CapStyle::Flat;
        pen.join = JoinStyle::Miter;
        let miter = stroke(&path, &pen);
        pen.join = JoinStyle::SvgMiter;
        let svg = stroke(&path, &pen);
        assert_buffer_eq(&svg, &miter);
    }

    #[test]
    fn miter_limit_falls_back_to_bevel() {
        let mut path = Path::new();
        path.move_to((0.0, 0.0));
        path.line_to((10.0, 0.0));
        path.line_to((10.0, 10.0));
        let mut pen = Pen::new(2.0);
        pen.cap = CapStyle::Flat;
        pen.join = JoinStyle::Miter;
        pen.miter_limit = 0.1;

        let verts = stroke(&path, &pen);
        // Same as the miter case minus the two spike vertices.
        assert_buffer_eq(
            &verts,
            &[
                0.0, 1.0, 0.0, -1.0, 10.0, 1.0, 10.0, -1.0, //
                9.0, 0.0, 11.0, 0.0, //
                9.0, 10.0, 11.0, 10.0, //
                11.0, 10.0,
            ],
        );
    }

    #[test]
    fn parallel_segments_never_miter() {
        // Collinear continuation: the cross product of the normals is zero.
        let mut path = Path::new();
        path.move_to((0.0, 0.0));
        path.line_to((10.0, 0.0));
        path.line_to((20.0, 0.0));
        let mut pen = Pen::new(2.0);
        pen.cap = CapStyle::Flat;
        pen.join = JoinStyle::Miter;

        let verts = stroke(&path, &pen);
        assert_buffer_eq(
            &verts,
            &[
                0.0, 1.0, 0.0, -1.0, 10.0, 1.0, 10.0, -1.0, //
                10.0, 1.0, 10.0, -1.0, // join re-emit, no spike
                20.0, 1.0, 20.0, -1.0, //
                20.0, -1.0,
            ],
        );
    }

    #[test]
    fn thin_pen_simplifies_round_styles() {
        let mut path = Path::new();
        path.move_to((0.0, 0.0));
        path.line_to((10.0, 0.0));
        path.line_to((10.0, 10.0));

        let mut round_pen = Pen::new(1.0);
        round_pen.cap = CapStyle::Round;
        round_pen.join = JoinStyle::Round;
        let mut square_pen = Pen::new(1.0);
        square_pen.cap = CapStyle::Square;
        square_pen.join = JoinStyle::Miter;

        assert_buffer_eq(&stroke(&path, &round_pen), &stroke(&path, &square_pen));
    }

    #[test]
    fn round_join_fans_around_the_corner() {
        let mut path = Path::new();
        path.move_to((0.0, 0.0));
        path.line_to((10.0, 0.0));
        path.line_to((10.0, 10.0));
        let mut pen = Pen::new(10.0);
        pen.cap = CapStyle::Flat;
        pen.join = JoinStyle::Round;

        let verts = stroke(&path, &pen);
        assert_eq!(verts.len() % 2, 0);
        // Every fan pair sits symmetrically around the corner at half-width.
        let corner = (10.0f64, 0.0f64);
        let mut fan_pairs = 0;
        for quad in verts.chunks(4) {
            if quad.len() < 4 {
                continue;
            }
            let d0 = ((f64::from(quad[0]) - corner.0).powi(2)
                + (f64::from(quad[1]) - corner.1).powi(2))
            .sqrt();
            let d1 = ((f64::from(quad[2]) - corner.0).powi(2)
                + (f64::from(quad[3]) - corner.1).powi(2))
            .sqrt();
            if (d0 - 5.0).abs() < 1e-3 && (d1 - 5.0).abs() < 1e-3 {
                fan_pairs += 1;
            }
        }
        assert!(fan_pairs >= 3, "expected a fan, found {} pairs", fan_pairs);
    }

    #[test]
    fn round_cap_tessellation_is_bounded() {
        let mut path = Path::new();
        path.move_to((0.0, 0.0));
        path.line_to((1000.0, 0.0));
        let mut pen = Pen::new(200.0);
        pen.cap = CapStyle::Round;

        let verts = stroke(&path, &pen);
        // Two half-circle caps at 24 segments each, not one vertex per
        // degree of pen width.
        assert!(verts.len() >= 30, "caps missing, {} floats", verts.len());
        assert!(verts.len() < 160, "arc step unclamped, {} floats", verts.len());
        // The whole strip stays inside the stroke's bounding box.
        for pair in verts.chunks(2) {
            let (x, y) = (pair[0], pair[1]);
            assert!(x >= -100.001 && x <= 1100.001);
            assert!(y >= -100.001 && y <= 100.001);
        }
    }

    #[test]
    fn closed_path_skips_the_start_cap() {
        let mut path = Path::new();
        path.move_to((0.0, 0.0));
        path.line_to((10.0, 0.0));
        path.line_to((10.0, 10.0));
        path.line_to((0.0, 0.0));
        let mut pen = Pen::new(2.0);
        pen.cap = CapStyle::Square;
        pen.join = JoinStyle::Bevel;

        let verts = stroke(&path, &pen);
        // A square cap would start half a width before the first point; a
        // closed loop starts exactly on its first vertex pair.
        assert!((verts[0] - 0.0).abs() < 1e-4);
        assert!((verts[1] - 1.0).abs() < 1e-4);
        assert!((verts[2] - 0.0).abs() < 1e-4);
        assert!((verts[3] + 1.0).abs() < 1e-4);
    }

    #[test]
    fn implicit_close_draws_the_missing_segment() {
        let mut open = Path::new();
        open.move_to((0.0, 0.0));
        open.line_to((10.0, 0.0));
        open.line_to((10.0, 10.0));
        let mut closed = open.clone();
        closed.close_implicit();

        let mut pen = Pen::new(2.0);
        pen.cap = CapStyle::Flat;
        let open_len = stroke(&open, &pen).len();
        let closed_len = stroke(&closed, &pen).len();
        // The closing segment adds at least one more vertex pair.
        assert!(closed_len >= open_len + 4);
    }

    #[test]
    fn curves_are_flattened_into_the_strip() {
        let mut path = Path::new();
        path.move_to((0.0, 0.0));
        path.cubic_to((30.0, 0.0), (70.0, 40.0), (100.0, 40.0));
        let mut pen = Pen::new(4.0);
        pen.cap = CapStyle::Flat;

        let verts = stroke(&path, &pen);
        assert!(verts.len() >= 4 * 4);
        assert_eq!(verts.len() % 2, 0);
        // Last emitted pair before the trailing duplicate straddles the
        // curve endpoint.
        let n = verts.len();
        let ex = (verts[n - 6] + verts[n - 4]) / 2.0;
        let ey = (verts[n - 5] + verts[n - 3]) / 2.0;
        assert!((ex - 100.0).abs() < 1e-3);
        assert!((ey - 40.0).abs() < 1e-3);
    }

    #[test]
    fn cosmetic_pen_width_tracks_inv_scale() {
        let mut path = Path::new();
        path.move_to((0.0, 0.0));
        path.line_to((10.0, 0.0));
        let mut pen = Pen::new(4.0);
        pen.cap = CapStyle::Flat;

        let mut stroker = Stroker::new();
        stroker.set_inv_scale(0.5);
        let verts = stroker
            .process(&path, &pen, Rect::default(), StrokeHints::COSMETIC_PEN)
            .to_vec();
        // Half-width 2 scaled by 0.5.
        assert!((verts[1] - 1.0).abs() < 1e-4);
        assert!((verts[3] + 1.0).abs() < 1e-4);
    }

    #[test]
    fn buffer_resets_between_calls() {
        let mut path = Path::new();
        path.move_to((0.0, 0.0));
        path.line_to((10.0, 0.0));
        let pen = Pen::new(2.0);

        let mut stroker = Stroker::new();
        stroker.process(&path, &pen, Rect::default(), StrokeHints::empty());
        let first = stroker.vertices().to_vec();
        stroker.process(&path, &pen, Rect::default(), StrokeHints::empty());
        assert_eq!(stroker.vertices(), first.as_slice());
        assert_eq!(stroker.vertex_count() * 2, first.len());
    }

    #[test]
    fn normalize_collapses_duplicates() {
        let mut path = Path::new();
        path.move_to((0.0, 0.0));
        path.move_to((1.0, 1.0));
        path.line_to((1.0, 1.0));
        path.line_to((5.0, 5.0));
        path.cubic_to((5.0, 5.0), (5.0, 5.0), (5.0, 5.0));

        let events = normalize(&path);
        assert_eq!(
            events,
            vec![
                PathEvent::MoveTo(Point::new(1.0, 1.0)),
                PathEvent::LineTo(Point::new(5.0, 5.0)),
            ]
        );
    }
}
