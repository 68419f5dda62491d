//! Spline curves used as rails for tube meshes.
//!
//! `CatmullRom3` follows the centripetal Catmull-Rom formulation used by
//! browser scene graphs, including the way end segments extrapolate a phantom
//! control point, so rails built here line up with curves authored for the
//! host renderer. Uniform sampling is by arc length.

use super::core::{Point3, Vec3};

/// Number of samples used to build the arc-length lookup table.
pub const ARC_LENGTH_DIVISIONS: usize = 200;

/// Distances below this are treated as coincident when computing the
/// non-uniform knot spacing.
const KNOT_EPSILON: f64 = 1e-4;

/// Centripetal knot spacing: `|p1 - p0|^0.5`, applied to squared distances.
const CENTRIPETAL_EXPONENT: f64 = 0.25;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CurveError {
    #[error("curve requires at least 2 control points, got {0}")]
    TooFewPoints(usize),
    #[error("curve control points must be finite")]
    NonFinitePoint,
    #[error("curve has zero length")]
    ZeroLength,
}

pub trait Curve3 {
    /// Point at parameter `t` in `[0, 1]`.
    fn point_at(&self, t: f64) -> Point3;

    /// Unnormalized derivative at parameter `t`.
    fn derivative_at(&self, t: f64) -> Vec3;

    #[must_use]
    fn tangent_at(&self, t: f64) -> Option<Vec3> {
        self.derivative_at(t).normalized()
    }
}

/// Open Catmull-Rom spline through a list of control points.
#[derive(Debug, Clone)]
pub struct CatmullRom3 {
    points: Vec<Point3>,
    arc_lengths: Vec<f64>,
}

/// Cubic `c0 + c1 t + c2 t^2 + c3 t^3` for one coordinate.
#[derive(Debug, Clone, Copy)]
struct Cubic {
    c0: f64,
    c1: f64,
    c2: f64,
    c3: f64,
}

impl Cubic {
    fn hermite(x0: f64, x1: f64, t0: f64, t1: f64) -> Self {
        Self {
            c0: x0,
            c1: t0,
            c2: -3.0 * x0 + 3.0 * x1 - 2.0 * t0 - t1,
            c3: 2.0 * x0 - 2.0 * x1 + t0 + t1,
        }
    }

    fn non_uniform(x0: f64, x1: f64, x2: f64, x3: f64, dt0: f64, dt1: f64, dt2: f64) -> Self {
        let t1 = ((x1 - x0) / dt0 - (x2 - x0) / (dt0 + dt1) + (x2 - x1) / dt1) * dt1;
        let t2 = ((x2 - x1) / dt1 - (x3 - x1) / (dt1 + dt2) + (x3 - x2) / dt2) * dt1;
        Self::hermite(x1, x2, t1, t2)
    }

    fn value(self, t: f64) -> f64 {
        let t2 = t * t;
        self.c0 + self.c1 * t + self.c2 * t2 + self.c3 * t2 * t
    }

    fn slope(self, t: f64) -> f64 {
        self.c1 + 2.0 * self.c2 * t + 3.0 * self.c3 * t * t
    }
}

impl CatmullRom3 {
    /// Centripetal spline through `points`.
    pub fn new(points: Vec<Point3>) -> Result<Self, CurveError> {
        if points.len() < 2 {
            return Err(CurveError::TooFewPoints(points.len()));
        }
        if points.iter().any(|p| !p.is_finite()) {
            return Err(CurveError::NonFinitePoint);
        }

        let mut curve = Self {
            points,
            arc_lengths: Vec::new(),
        };
        curve.arc_lengths = curve.compute_arc_lengths(ARC_LENGTH_DIVISIONS);

        if curve.length() <= 0.0 {
            return Err(CurveError::ZeroLength);
        }
        Ok(curve)
    }

    #[must_use]
    pub fn control_points(&self) -> &[Point3] {
        &self.points
    }

    /// Approximate arc length, from the lookup table.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.arc_lengths.last().copied().unwrap_or(0.0)
    }

    /// Map a normalized arc-length position `u` to the curve parameter `t`.
    #[must_use]
    pub fn parameter_at_length_ratio(&self, u: f64) -> f64 {
        let lengths = &self.arc_lengths;
        let last = lengths.len() - 1;
        let target = u.clamp(0.0, 1.0) * self.length();

        let idx = lengths.partition_point(|&l| l < target).min(last);
        if (lengths[idx] - target).abs() <= f64::EPSILON || idx == 0 {
            return idx as f64 / last as f64;
        }

        let before = lengths[idx - 1];
        let segment = lengths[idx] - before;
        let fraction = if segment > 0.0 { (target - before) / segment } else { 0.0 };
        ((idx - 1) as f64 + fraction) / last as f64
    }

    /// Point at normalized arc-length position `u`.
    #[must_use]
    pub fn point_at_length_ratio(&self, u: f64) -> Point3 {
        self.point_at(self.parameter_at_length_ratio(u))
    }

    #[must_use]
    pub fn tangent_at_length_ratio(&self, u: f64) -> Option<Vec3> {
        self.tangent_at(self.parameter_at_length_ratio(u))
    }

    fn compute_arc_lengths(&self, divisions: usize) -> Vec<f64> {
        let mut lengths = Vec::with_capacity(divisions + 1);
        let mut previous = self.point_at(0.0);
        let mut total = 0.0;
        lengths.push(total);

        for i in 1..=divisions {
            let current = self.point_at(i as f64 / divisions as f64);
            total += current.distance_to(previous);
            lengths.push(total);
            previous = current;
        }

        lengths
    }

    /// Segment index and local weight for parameter `t`.
    fn locate(&self, t: f64) -> (usize, f64) {
        let count = self.points.len();
        let p = (count - 1) as f64 * t.clamp(0.0, 1.0);
        let mut index = p.floor() as usize;
        let mut weight = p - index as f64;

        if index >= count - 1 {
            index = count - 2;
            weight = 1.0;
        }
        (index, weight)
    }

    /// The four control points around segment `index`; missing neighbours at
    /// the ends are mirrored through the end point.
    fn segment_points(&self, index: usize) -> [Point3; 4] {
        let pts = &self.points;
        let count = pts.len();
        let p1 = pts[index];
        let p2 = pts[index + 1];

        let p0 = if index > 0 {
            pts[index - 1]
        } else {
            pts[0].add_vec(pts[0].sub_point(pts[1]))
        };
        let p3 = if index + 2 < count {
            pts[index + 2]
        } else {
            pts[count - 1].add_vec(pts[count - 1].sub_point(pts[count - 2]))
        };

        [p0, p1, p2, p3]
    }

    fn segment_cubics(&self, index: usize) -> [Cubic; 3] {
        let [p0, p1, p2, p3] = self.segment_points(index);
        let mut dt0 = p0.distance_squared_to(p1).powf(CENTRIPETAL_EXPONENT);
        let mut dt1 = p1.distance_squared_to(p2).powf(CENTRIPETAL_EXPONENT);
        let mut dt2 = p2.distance_squared_to(p3).powf(CENTRIPETAL_EXPONENT);

        if dt1 < KNOT_EPSILON {
            dt1 = 1.0;
        }
        if dt0 < KNOT_EPSILON {
            dt0 = dt1;
        }
        if dt2 < KNOT_EPSILON {
            dt2 = dt1;
        }

        [
            Cubic::non_uniform(p0.x, p1.x, p2.x, p3.x, dt0, dt1, dt2),
            Cubic::non_uniform(p0.y, p1.y, p2.y, p3.y, dt0, dt1, dt2),
            Cubic::non_uniform(p0.z, p1.z, p2.z, p3.z, dt0, dt1, dt2),
        ]
    }
}

impl Curve3 for CatmullRom3 {
    fn point_at(&self, t: f64) -> Point3 {
        let (index, weight) = self.locate(t);
        let [cx, cy, cz] = self.segment_cubics(index);
        Point3::new(cx.value(weight), cy.value(weight), cz.value(weight))
    }

    fn derivative_at(&self, t: f64) -> Vec3 {
        let (index, weight) = self.locate(t);
        let [cx, cy, cz] = self.segment_cubics(index);
        let scale = (self.points.len() - 1) as f64;
        Vec3::new(cx.slope(weight), cy.slope(weight), cz.slope(weight)).mul_scalar(scale)
    }
}

/// Sample `segments + 1` points spaced evenly by arc length, ends included.
#[must_use]
pub fn sample_curve_by_length(curve: &CatmullRom3, segments: usize) -> Vec<Point3> {
    let segments = segments.max(1);
    (0..=segments)
        .map(|i| curve.point_at_length_ratio(i as f64 / segments as f64))
        .collect()
}
