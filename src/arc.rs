/// Incremental circle-point generator used for round caps and round joins.
///
/// Instead of calling `sin`/`cos` per vertex, the start vector is rotated
/// repeatedly by a fixed step using the precomputed sine and cosine of that
/// step. Sign tests on the cross and dot product against the target vector
/// decide how far is left to go, in three phases: more than 180 degrees,
/// more than 90 degrees, more than 0 degrees.
#[derive(Debug, Copy, Clone)]
pub(crate) struct ArcTessellator {
    cos_theta: f32,
    sin_theta: f32,
}

impl ArcTessellator {
    pub fn new(roundness: i32) -> ArcTessellator {
        let theta = std::f64::consts::PI / f64::from(roundness);
        ArcTessellator {
            cos_theta: theta.cos() as f32,
            sin_theta: theta.sin() as f32,
        }
    }

    /// Interleaved x,y points strictly between `from` and `to` on the circle
    /// centered at `(cx, cy)` through both. The endpoints themselves are not
    /// produced; the caller already has them. The last generated point always
    /// lands on or past the target, so it is dropped to avoid a jiggle at
    /// the seam.
    pub fn arc_points(
        &self,
        cx: f32,
        cy: f32,
        from_x: f32,
        from_y: f32,
        to_x: f32,
        to_y: f32,
    ) -> Vec<f32> {
        let mut dx1 = from_x - cx;
        let mut dy1 = from_y - cy;
        let dx2 = to_x - cx;
        let dy2 = to_y - cy;

        let mut points = Vec::new();
        let mut rotate = |dx1: &mut f32, dy1: &mut f32| {
            let tmp_x = *dx1 * self.cos_theta - *dy1 * self.sin_theta;
            let tmp_y = *dx1 * self.sin_theta + *dy1 * self.cos_theta;
            *dx1 = tmp_x;
            *dy1 = tmp_y;
            points.push(cx + tmp_x);
            points.push(cy + tmp_y);
        };

        // More than 180 degrees left.
        while dx1 * dy2 - dy1 * dx2 < 0.0 {
            rotate(&mut dx1, &mut dy1);
        }

        // More than 90 degrees left.
        while dx1 * dx2 + dy1 * dy2 < 0.0 {
            rotate(&mut dx1, &mut dy1);
        }

        // More than 0 degrees left.
        while dx1 * dy2 - dy1 * dx2 > 0.0 {
            rotate(&mut dx1, &mut dy1);
        }

        // The last rotation stepped onto or beyond the target.
        if points.len() > 1 {
            points.truncate(points.len() - 2);
        }
        points
    }
}
