use std::ops::{Add, Mul, Neg, Sub};

// ─────────────────────────────────────────────────────────────────────────────
// Vec3
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    /// Zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    /// Unit vector along the X axis.
    pub const X: Self = Self::new(1.0, 0.0, 0.0);
    /// Unit vector along the Y axis.
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);
    /// Unit vector along the Z axis.
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub const fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    #[must_use]
    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    #[must_use]
    pub const fn length_squared(self) -> f64 {
        self.dot(self)
    }

    #[must_use]
    pub const fn dot(self, rhs: Self) -> f64 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    #[must_use]
    pub const fn cross(self, rhs: Self) -> Self {
        Self {
            x: self.y * rhs.z - self.z * rhs.y,
            y: self.z * rhs.x - self.x * rhs.z,
            z: self.x * rhs.y - self.y * rhs.x,
        }
    }

    #[must_use]
    pub fn normalized(self) -> Option<Self> {
        let len = self.length();
        if len.is_finite() && len > 0.0 {
            Some(Self::new(self.x / len, self.y / len, self.z / len))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn mul_scalar(self, s: f64) -> Self {
        Self::new(self.x * s, self.y * s, self.z * s)
    }

    #[must_use]
    pub const fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Default for Vec3 {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from(arr: [f64; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }
}

impl Add for Vec3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Vec3::add(self, rhs)
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self::Output {
        self.mul_scalar(rhs)
    }
}

impl Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y, -self.z)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Point3
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    /// The origin point (0, 0, 0).
    pub const ORIGIN: Self = Self::new(0.0, 0.0, 0.0);

    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub const fn from_array(arr: [f64; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }

    #[must_use]
    pub const fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    #[must_use]
    pub const fn to_vec3(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    #[must_use]
    pub const fn add_vec(self, v: Vec3) -> Self {
        Self::new(self.x + v.x, self.y + v.y, self.z + v.z)
    }

    #[must_use]
    pub const fn sub_point(self, rhs: Self) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }

    #[must_use]
    pub fn distance_to(self, other: Self) -> f64 {
        self.sub_point(other).length()
    }

    #[must_use]
    pub fn distance_squared_to(self, other: Self) -> f64 {
        self.sub_point(other).length_squared()
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Default for Point3 {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl From<[f64; 3]> for Point3 {
    fn from(arr: [f64; 3]) -> Self {
        Self::from_array(arr)
    }
}

impl From<Point3> for [f64; 3] {
    fn from(p: Point3) -> Self {
        p.to_array()
    }
}

impl Add<Vec3> for Point3 {
    type Output = Self;
    fn add(self, rhs: Vec3) -> Self::Output {
        self.add_vec(rhs)
    }
}

impl Sub for Point3 {
    type Output = Vec3;
    fn sub(self, rhs: Self) -> Self::Output {
        self.sub_point(rhs)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Transform
// ─────────────────────────────────────────────────────────────────────────────

/// Affine transform stored as a row-major 4x4 matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    m: [[f64; 4]; 4],
}

impl Transform {
    #[must_use]
    pub const fn identity() -> Self {
        Self {
            m: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    #[must_use]
    pub const fn translate(offset: Vec3) -> Self {
        Self {
            m: [
                [1.0, 0.0, 0.0, offset.x],
                [0.0, 1.0, 0.0, offset.y],
                [0.0, 0.0, 1.0, offset.z],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    #[must_use]
    pub fn rotate_x(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self {
            m: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, c, -s, 0.0],
                [0.0, s, c, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    #[must_use]
    pub fn rotate_y(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self {
            m: [
                [c, 0.0, s, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [-s, 0.0, c, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    #[must_use]
    pub fn rotate_z(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self {
            m: [
                [c, -s, 0.0, 0.0],
                [s, c, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Rotation from Euler angles applied in `XYZ` order (`Rx * Ry * Rz`),
    /// the convention used by scene-graph renderers for object rotation.
    #[must_use]
    pub fn from_euler_xyz(angles: [f64; 3]) -> Self {
        Self::rotate_x(angles[0])
            .then(&Self::rotate_y(angles[1]))
            .then(&Self::rotate_z(angles[2]))
    }

    /// Matrix product `self * rhs`: `rhs` is applied first.
    #[must_use]
    pub fn then(&self, rhs: &Self) -> Self {
        let mut m = [[0.0; 4]; 4];
        for (row, out_row) in m.iter_mut().enumerate() {
            for (col, out) in out_row.iter_mut().enumerate() {
                *out = (0..4).map(|k| self.m[row][k] * rhs.m[k][col]).sum();
            }
        }
        Self { m }
    }

    #[must_use]
    pub fn apply_point(&self, p: Point3) -> Point3 {
        let m = &self.m;
        Point3::new(
            m[0][0] * p.x + m[0][1] * p.y + m[0][2] * p.z + m[0][3],
            m[1][0] * p.x + m[1][1] * p.y + m[1][2] * p.z + m[1][3],
            m[2][0] * p.x + m[2][1] * p.y + m[2][2] * p.z + m[2][3],
        )
    }

    #[must_use]
    pub fn apply_vec(&self, v: Vec3) -> Vec3 {
        let m = &self.m;
        Vec3::new(
            m[0][0] * v.x + m[0][1] * v.y + m[0][2] * v.z,
            m[1][0] * v.x + m[1][1] * v.y + m[1][2] * v.z,
            m[2][0] * v.x + m[2][1] * v.y + m[2][2] * v.z,
        )
    }

    /// Inverse of a rigid transform (rotation + translation).
    ///
    /// Scaled or sheared matrices give a wrong result.
    #[must_use]
    pub fn inverse_rigid(&self) -> Self {
        let m = &self.m;
        let mut inv = Self::identity();
        for row in 0..3 {
            for col in 0..3 {
                inv.m[row][col] = m[col][row];
            }
        }
        let t = Vec3::new(m[0][3], m[1][3], m[2][3]);
        let rotated = inv.apply_vec(t);
        inv.m[0][3] = -rotated.x;
        inv.m[1][3] = -rotated.y;
        inv.m[2][3] = -rotated.z;
        inv
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tolerance
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    pub eps: f64,
}

impl Tolerance {
    /// Default geometric tolerance (1e-9).
    pub const DEFAULT: Self = Self { eps: 1e-9 };

    /// Tolerance for detecting zero-length/degenerate vectors and edges (1e-12).
    pub const ZERO_LENGTH: Self = Self { eps: 1e-12 };

    #[must_use]
    pub const fn new(eps: f64) -> Self {
        Self { eps }
    }

    #[must_use]
    pub const fn default_geom() -> Self {
        Self::DEFAULT
    }

    #[must_use]
    pub const fn eps_squared(self) -> f64 {
        self.eps * self.eps
    }

    #[must_use]
    pub fn approx_eq_f64(self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.eps
    }

    #[must_use]
    pub fn approx_eq_point3(self, a: Point3, b: Point3) -> bool {
        a.distance_squared_to(b) <= self.eps_squared()
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Frames
// ─────────────────────────────────────────────────────────────────────────────

/// Orthonormal frame attached to a point on a curve.
#[derive(Debug, Clone, Copy)]
pub struct FrenetFrame {
    /// Unit vector pointing along the curve direction.
    pub tangent: Vec3,
    /// Unit vector perpendicular to the tangent.
    pub normal: Vec3,
    /// `tangent × normal`.
    pub binormal: Vec3,
}

impl FrenetFrame {
    /// Build a frame from a tangent alone. The initial normal is seeded from
    /// the world axis along which the tangent has its smallest component, so
    /// the seed is never close to parallel with the tangent. Ties go to the
    /// later axis (Z over Y over X), matching the host renderer's tube frames.
    #[must_use]
    pub fn from_tangent(tangent: Vec3) -> Option<Self> {
        let tangent = tangent.normalized()?;

        let mut min = f64::MAX;
        let mut seed = Vec3::X;
        for (component, axis) in [(tangent.x, Vec3::X), (tangent.y, Vec3::Y), (tangent.z, Vec3::Z)] {
            if component.abs() <= min {
                min = component.abs();
                seed = axis;
            }
        }

        let side = tangent.cross(seed).normalized()?;
        let normal = tangent.cross(side).normalized()?;
        let binormal = tangent.cross(normal).normalized()?;
        Some(Self {
            tangent,
            normal,
            binormal,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{FrenetFrame, Point3, Tolerance, Transform, Vec3};

    #[test]
    fn euler_z_rotation_turns_x_towards_y() {
        let t = Transform::from_euler_xyz([0.0, 0.0, std::f64::consts::FRAC_PI_2]);
        let p = t.apply_point(Point3::new(1.0, 0.0, 0.0));
        let tol = Tolerance::new(1e-12);
        assert!(tol.approx_eq_point3(p, Point3::new(0.0, 1.0, 0.0)), "got {p:?}");
    }

    #[test]
    fn inverse_rigid_undoes_rotation_and_translation() {
        let t = Transform::rotate_z(0.2).then(&Transform::translate(Vec3::new(0.1, 0.8, 0.1)));
        let p = Point3::new(0.3, -0.4, 0.25);
        let back = t.inverse_rigid().apply_point(t.apply_point(p));
        assert!(Tolerance::new(1e-12).approx_eq_point3(p, back));
    }

    #[test]
    fn frame_from_tangent_is_orthonormal() {
        let frame = FrenetFrame::from_tangent(Vec3::new(0.0, -2.0, 0.0)).expect("frame");
        assert!((frame.normal.length() - 1.0).abs() < 1e-12);
        assert!(frame.normal.dot(frame.tangent).abs() < 1e-12);
        assert!(frame.binormal.dot(frame.tangent).abs() < 1e-12);
        assert!(frame.binormal.dot(frame.normal).abs() < 1e-12);
    }

    #[test]
    fn tied_seed_axes_resolve_to_the_last_one() {
        // |x| and |z| tie at zero for a downward tangent; Z must win.
        let frame = FrenetFrame::from_tangent(Vec3::new(0.0, -1.0, 0.0)).expect("frame");
        let tol = Tolerance::new(1e-12);
        let normal = Point3::ORIGIN.add_vec(frame.normal);
        let binormal = Point3::ORIGIN.add_vec(frame.binormal);
        assert!(tol.approx_eq_point3(normal, Point3::new(0.0, 0.0, -1.0)), "{frame:?}");
        assert!(tol.approx_eq_point3(binormal, Point3::new(1.0, 0.0, 0.0)), "{frame:?}");
    }

    #[test]
    fn zero_tangent_has_no_frame() {
        assert!(FrenetFrame::from_tangent(Vec3::ZERO).is_none());
    }
}
