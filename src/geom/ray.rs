use super::{Point3, Tolerance, Transform, Vec3};

/// Half-line with a unit-length direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray3 {
    pub origin: Point3,
    pub direction: Vec3,
}

impl Ray3 {
    /// Returns `None` when the origin is not finite or the direction has no
    /// usable length.
    #[must_use]
    pub fn new(origin: Point3, direction: Vec3) -> Option<Self> {
        if !origin.is_finite() || !direction.is_finite() {
            return None;
        }
        Some(Self {
            origin,
            direction: direction.normalized()?,
        })
    }

    #[must_use]
    pub fn point_at(&self, distance: f64) -> Point3 {
        self.origin.add_vec(self.direction.mul_scalar(distance))
    }

    /// Express the ray in the space that `transform` maps into world space.
    ///
    /// `transform` must be rigid, so distances are preserved.
    #[must_use]
    pub fn to_local(&self, transform: &Transform) -> Self {
        let inverse = transform.inverse_rigid();
        let direction = inverse.apply_vec(self.direction);
        Self {
            origin: inverse.apply_point(self.origin),
            direction: direction.normalized().unwrap_or(direction),
        }
    }
}

/// Nearest non-negative hit distance between `ray` and a solid, capped,
/// Y-aligned cylinder of constant `radius` centered at the origin.
#[must_use]
pub fn intersect_capped_cylinder(ray: &Ray3, radius: f64, half_height: f64) -> Option<f64> {
    let tol = Tolerance::default_geom();
    let o = ray.origin;
    let d = ray.direction;
    let mut nearest: Option<f64> = None;
    let mut consider = |t: f64| {
        if t >= 0.0 && nearest.is_none_or(|best| t < best) {
            nearest = Some(t);
        }
    };

    // Side wall.
    let a = d.x * d.x + d.z * d.z;
    if a > tol.eps {
        let b = 2.0 * (o.x * d.x + o.z * d.z);
        let c = o.x * o.x + o.z * o.z - radius * radius;
        let disc = b * b - 4.0 * a * c;
        if disc >= 0.0 {
            let root = disc.sqrt();
            for t in [(-b - root) / (2.0 * a), (-b + root) / (2.0 * a)] {
                if (o.y + t * d.y).abs() <= half_height + tol.eps {
                    consider(t);
                }
            }
        }
    }

    // Caps.
    if d.y.abs() > tol.eps {
        for y in [half_height, -half_height] {
            let t = (y - o.y) / d.y;
            let x = o.x + t * d.x;
            let z = o.z + t * d.z;
            if x * x + z * z <= radius * radius + tol.eps {
                consider(t);
            }
        }
    }

    nearest
}
