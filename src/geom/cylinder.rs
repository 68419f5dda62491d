//! Capped, optionally tapered cylinders aligned with the Y axis.
//!
//! The layout matches the cylinder primitive of browser scene graphs: the
//! top ring sits at `+height / 2`, the bottom ring at `-height / 2`, and the
//! angle is measured from +Z towards +X. Side and cap vertices are separate
//! so each keeps its own normal.

use super::diagnostics::GeomMeshDiagnostics;
use super::mesh::{GeomMesh, finalize_mesh};
use super::{Point3, Tolerance, Vec3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CylinderSpec {
    pub radius_top: f64,
    pub radius_bottom: f64,
    pub height: f64,
    pub radial_segments: usize,
}

impl CylinderSpec {
    #[must_use]
    pub const fn new(radius_top: f64, radius_bottom: f64, height: f64, radial_segments: usize) -> Self {
        Self {
            radius_top,
            radius_bottom,
            height,
            radial_segments,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CylinderError {
    #[error("cylinder radii must be finite and >= 0, and not both zero")]
    InvalidRadius,
    #[error("cylinder height must be finite and > 0")]
    InvalidHeight,
    #[error("cylinder requires at least 3 radial segments")]
    NotEnoughRadialSegments,
}

/// Build a capped cylinder centered on `center`.
pub fn cylinder_mesh(
    spec: CylinderSpec,
    center: Point3,
) -> Result<(GeomMesh, GeomMeshDiagnostics), CylinderError> {
    let tol = Tolerance::default_geom();
    let radius_ok = |r: f64| r.is_finite() && r >= 0.0;
    if !radius_ok(spec.radius_top)
        || !radius_ok(spec.radius_bottom)
        || spec.radius_top.max(spec.radius_bottom) <= tol.eps
    {
        return Err(CylinderError::InvalidRadius);
    }
    if !spec.height.is_finite() || spec.height <= tol.eps {
        return Err(CylinderError::InvalidHeight);
    }
    if spec.radial_segments < 3 {
        return Err(CylinderError::NotEnoughRadialSegments);
    }

    let radial = spec.radial_segments;
    let half = spec.height * 0.5;
    let slope = (spec.radius_bottom - spec.radius_top) / spec.height;

    let mut positions: Vec<[f64; 3]> = Vec::new();
    let mut normals: Vec<[f64; 3]> = Vec::new();
    let mut uvs: Vec<[f64; 2]> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();

    let ring_point = |radius: f64, y: f64, u: f64| -> [f64; 3] {
        let theta = u * 2.0 * std::f64::consts::PI;
        let (sin, cos) = theta.sin_cos();
        center
            .add_vec(Vec3::new(radius * sin, y, radius * cos))
            .to_array()
    };

    // Side wall: ring 0 is the top, ring 1 the bottom.
    for ring in 0..2 {
        let v = f64::from(ring);
        let radius = if ring == 0 { spec.radius_top } else { spec.radius_bottom };
        let y = half - v * spec.height;
        for x in 0..=radial {
            let u = x as f64 / radial as f64;
            let theta = u * 2.0 * std::f64::consts::PI;
            let (sin, cos) = theta.sin_cos();
            positions.push(ring_point(radius, y, u));
            let normal = Vec3::new(sin, slope, cos).normalized().unwrap_or(Vec3::Y);
            normals.push(normal.to_array());
            uvs.push([u, 1.0 - v]);
        }
    }

    let ring_size = radial + 1;
    for x in 0..radial {
        let a = x as u32;
        let b = (ring_size + x) as u32;
        let c = (ring_size + x + 1) as u32;
        let d = (x + 1) as u32;
        indices.extend_from_slice(&[a, b, d]);
        indices.extend_from_slice(&[b, c, d]);
    }

    if spec.radius_top > tol.eps {
        push_cap(&mut positions, &mut normals, &mut uvs, &mut indices, &ring_point, spec.radius_top, half, radial, center, true);
    }
    if spec.radius_bottom > tol.eps {
        push_cap(&mut positions, &mut normals, &mut uvs, &mut indices, &ring_point, spec.radius_bottom, -half, radial, center, false);
    }

    Ok(finalize_mesh(positions, Some(uvs), Some(normals), indices, tol))
}

#[allow(clippy::too_many_arguments)]
fn push_cap(
    positions: &mut Vec<[f64; 3]>,
    normals: &mut Vec<[f64; 3]>,
    uvs: &mut Vec<[f64; 2]>,
    indices: &mut Vec<u32>,
    ring_point: &impl Fn(f64, f64, f64) -> [f64; 3],
    radius: f64,
    y: f64,
    radial: usize,
    center: Point3,
    top: bool,
) {
    let normal = if top { [0.0, 1.0, 0.0] } else { [0.0, -1.0, 0.0] };
    let center_index = positions.len() as u32;

    positions.push(center.add_vec(Vec3::new(0.0, y, 0.0)).to_array());
    normals.push(normal);
    uvs.push([0.5, 0.5]);

    let ring_start = center_index + 1;
    for x in 0..=radial {
        let u = x as f64 / radial as f64;
        let theta = u * 2.0 * std::f64::consts::PI;
        let (sin, cos) = theta.sin_cos();
        positions.push(ring_point(radius, y, u));
        normals.push(normal);
        let flip = if top { 1.0 } else { -1.0 };
        uvs.push([0.5 + 0.5 * sin, 0.5 + 0.5 * cos * flip]);
    }

    for x in 0..radial as u32 {
        let i = ring_start + x;
        if top {
            indices.extend_from_slice(&[i, i + 1, center_index]);
        } else {
            indices.extend_from_slice(&[i + 1, i, center_index]);
        }
    }
}
