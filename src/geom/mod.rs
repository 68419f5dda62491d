mod core;
mod curve;
mod cylinder;
mod diagnostics;
mod mesh;
mod pipe;
mod ray;

pub use core::{FrenetFrame, Point3, Tolerance, Transform, Vec3};
pub use curve::{ARC_LENGTH_DIVISIONS, CatmullRom3, Curve3, CurveError, sample_curve_by_length};
pub use cylinder::{CylinderError, CylinderSpec, cylinder_mesh};
pub use diagnostics::GeomMeshDiagnostics;
pub use mesh::GeomMesh;
pub use pipe::{PipeError, TubeOptions, tube_along_curve};
pub use ray::{Ray3, intersect_capped_cylinder};

/// Any failure raised by the geometry builders.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeomError {
    #[error(transparent)]
    Curve(#[from] CurveError),
    #[error(transparent)]
    Pipe(#[from] PipeError),
    #[error(transparent)]
    Cylinder(#[from] CylinderError),
}

#[cfg(test)]
mod tests;
