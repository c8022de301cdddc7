use clamped::Clamp;

use crate::math::Cubic;
use crate::pen::StrokeHints;
use crate::Point;

/// Angular step, in radians, that one flattened segment is allowed to span
/// on a curve or a round cap. Smaller means smoother and more vertices.
pub(crate) const CURVE_FLATNESS: f64 = std::f64::consts::PI / 8.0;

/// Tolerance knobs derived once per stroke from the pen width and the
/// current zoom. `curviness_add`/`curviness_mul` feed the per-curve sample
/// count, `simplify` collapses round caps and joins for thin pens where
/// the extra geometry would not be visible anyway.
#[derive(Debug, Copy, Clone)]
pub(crate) struct FlattenParams {
    pub curviness_add: f64,
    pub curviness_mul: f64,
    pub simplify: bool,
}

impl FlattenParams {
    pub fn for_pen(width: f64, hints: StrokeHints, inv_scale: f64) -> FlattenParams {
        let cosmetic = hints.contains(StrokeHints::COSMETIC_PEN);
        if width < 2.5 && (cosmetic || inv_scale == 1.0) {
            FlattenParams {
                curviness_add: 0.5,
                curviness_mul: CURVE_FLATNESS,
                simplify: true,
            }
        } else if cosmetic {
            FlattenParams {
                curviness_add: width / 2.0,
                curviness_mul: CURVE_FLATNESS,
                simplify: false,
            }
        } else {
            FlattenParams {
                curviness_add: width / 2.0,
                curviness_mul: CURVE_FLATNESS / inv_scale,
                simplify: false,
            }
        }
    }
}

/// Uniform-parameter sampling of a cubic segment. The sample count scales
/// with the extent of the control polygon so that big curves get more
/// segments; the curve start point is never produced, the endpoint always
/// is.
pub(crate) struct CurveFlattener {
    cubic: Cubic,
    index: i32,
    count: i32,
}

impl CurveFlattener {
    pub fn new(cubic: Cubic, params: &FlattenParams) -> CurveFlattener {
        let bounds = cubic.bounds();
        let extent = bounds.width().max(bounds.height());
        let count =
            (((extent + params.curviness_add) * params.curviness_mul) as i32).clamped(4, 64);
        CurveFlattener {
            cubic,
            index: 1,
            count,
        }
    }
}

impl Iterator for CurveFlattener {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.index >= self.count {
            return None;
        }
        let t = f64::from(self.index) / f64::from(self.count - 1);
        self.index += 1;
        Some(self.cubic.point_at(t))
    }
}
