//! Tube mesh generation along a rail.
//!
//! `tube_along_curve` lofts an open, constant-radius tube along a spline,
//! sampled evenly by arc length.
//!
//! Rings carry `radial_segments + 1` vertices so the seam column can hold
//! both `v = 0` and `v = 1` texture coordinates. Frames are propagated by
//! parallel transport, which keeps the tube from twisting along the rail.

use super::curve::{CatmullRom3, sample_curve_by_length};
use super::diagnostics::GeomMeshDiagnostics;
use super::mesh::{GeomMesh, finalize_mesh};
use super::{FrenetFrame, Point3, Tolerance, Vec3};

/// A dot product below this (~75° turn) between neighbouring tangents is
/// reported as a sharp junction.
const CUSP_DOT_THRESHOLD: f64 = 0.25;

/// Shape of a tube cross-section and its tessellation density.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TubeOptions {
    /// Number of segments along the rail.
    pub tubular_segments: usize,
    /// Radius of the circular cross-section.
    pub radius: f64,
    /// Number of segments around the circular cross-section.
    pub radial_segments: usize,
}

impl Default for TubeOptions {
    fn default() -> Self {
        Self {
            tubular_segments: 64,
            radius: 1.0,
            radial_segments: 8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PipeError {
    #[error("rail curve requires at least 2 points")]
    RailTooShort,
    #[error("rail curve must have finite points")]
    NonFiniteRail,
    #[error("radius must be finite and > 0")]
    InvalidRadius,
    #[error("pipe requires at least 3 radial segments")]
    NotEnoughRadialSegments,
    #[error("pipe requires at least 1 tubular segment")]
    NotEnoughTubularSegments,
    #[error("rail has a degenerate segment")]
    DegenerateRailSegment,
}

/// Loft an open tube along `curve`.
pub fn tube_along_curve(
    curve: &CatmullRom3,
    options: TubeOptions,
) -> Result<(GeomMesh, GeomMeshDiagnostics), PipeError> {
    if options.tubular_segments == 0 {
        return Err(PipeError::NotEnoughTubularSegments);
    }

    let rail = sample_curve_by_length(curve, options.tubular_segments);
    let tangents: Vec<Option<Vec3>> = (0..=options.tubular_segments)
        .map(|i| curve.tangent_at_length_ratio(i as f64 / options.tubular_segments as f64))
        .collect();

    build_tube(&rail, &tangents, options, Tolerance::default_geom())
}

fn build_tube(
    rail: &[Point3],
    tangents: &[Option<Vec3>],
    options: TubeOptions,
    tol: Tolerance,
) -> Result<(GeomMesh, GeomMeshDiagnostics), PipeError> {
    if rail.len() < 2 {
        return Err(PipeError::RailTooShort);
    }
    if rail.iter().any(|p| !p.is_finite()) {
        return Err(PipeError::NonFiniteRail);
    }
    if !options.radius.is_finite() || options.radius <= tol.eps {
        return Err(PipeError::InvalidRadius);
    }
    if options.radial_segments < 3 {
        return Err(PipeError::NotEnoughRadialSegments);
    }
    if rail
        .windows(2)
        .any(|pair| pair[1].sub_point(pair[0]).length() <= tol.eps)
    {
        return Err(PipeError::DegenerateRailSegment);
    }

    let (frames, mut warnings) = compute_rail_frames(rail, tangents, tol);

    let ring_count = rail.len();
    let radial = options.radial_segments;
    let ring_size = radial + 1;

    let mut positions = Vec::with_capacity(ring_count * ring_size);
    let mut normals = Vec::with_capacity(ring_count * ring_size);
    let mut uvs = Vec::with_capacity(ring_count * ring_size);

    for (ring_idx, (origin, frame)) in rail.iter().zip(&frames).enumerate() {
        let u_param = ring_idx as f64 / (ring_count - 1) as f64;

        for seg in 0..=radial {
            let v_param = seg as f64 / radial as f64;
            let angle = 2.0 * std::f64::consts::PI * v_param;
            let (sin, cos) = angle.sin_cos();

            let direction = frame
                .normal
                .mul_scalar(-cos)
                .add(frame.binormal.mul_scalar(sin));
            let direction = direction.normalized().unwrap_or(frame.normal);

            positions.push(origin.add_vec(direction.mul_scalar(options.radius)).to_array());
            normals.push(direction.to_array());
            uvs.push([u_param, v_param]);
        }
    }

    let mut indices: Vec<u32> = Vec::with_capacity((ring_count - 1) * radial * 6);
    for r in 1..ring_count {
        for seg in 1..=radial {
            let a = (ring_size * (r - 1) + (seg - 1)) as u32;
            let b = (ring_size * r + (seg - 1)) as u32;
            let c = (ring_size * r + seg) as u32;
            let d = (ring_size * (r - 1) + seg) as u32;

            indices.extend_from_slice(&[a, b, d]);
            indices.extend_from_slice(&[b, c, d]);
        }
    }

    let (mesh, mut diagnostics) = finalize_mesh(positions, Some(uvs), Some(normals), indices, tol);
    diagnostics.warnings.append(&mut warnings);
    Ok((mesh, diagnostics))
}

fn compute_rail_frames(
    rail: &[Point3],
    tangents: &[Option<Vec3>],
    tol: Tolerance,
) -> (Vec<FrenetFrame>, Vec<String>) {
    let mut warnings = Vec::new();
    let mut frames: Vec<FrenetFrame> = Vec::with_capacity(rail.len());

    let chord = |i: usize| -> Vec3 {
        let next = (i + 1).min(rail.len() - 1);
        let prev = next - 1;
        rail[next].sub_point(rail[prev])
    };

    let initial_tangent = tangents
        .first()
        .copied()
        .flatten()
        .unwrap_or_else(|| chord(0));
    let first_frame = FrenetFrame::from_tangent(initial_tangent)
        .or_else(|| FrenetFrame::from_tangent(Vec3::Z));
    let Some(first_frame) = first_frame else {
        return (frames, warnings);
    };
    frames.push(first_frame);

    let mut cusp_like = 0usize;

    for i in 1..rail.len() {
        let prev_frame = frames[i - 1];

        let tangent = match tangents.get(i).copied().flatten().or_else(|| chord(i).normalized()) {
            Some(t) => t,
            None => {
                warnings.push("rail has degenerate segment; reusing previous tangent".to_string());
                prev_frame.tangent
            }
        };

        if prev_frame.tangent.dot(tangent) < CUSP_DOT_THRESHOLD {
            cusp_like += 1;
        }

        frames.push(parallel_transport_frame(&prev_frame, tangent, tol));
    }

    if cusp_like > 0 {
        warnings.push(format!(
            "rail continuity warning: {cusp_like} sharp tangent changes"
        ));
    }

    (frames, warnings)
}

fn parallel_transport_frame(prev_frame: &FrenetFrame, new_tangent: Vec3, tol: Tolerance) -> FrenetFrame {
    let old_tangent = prev_frame.tangent;
    let cross = old_tangent.cross(new_tangent);

    if cross.length_squared() < tol.eps_squared() {
        let sign = if old_tangent.dot(new_tangent) < 0.0 { -1.0 } else { 1.0 };
        return FrenetFrame {
            tangent: new_tangent,
            normal: prev_frame.normal.mul_scalar(sign),
            binormal: prev_frame.binormal.mul_scalar(sign),
        };
    }

    let rotation_axis = cross.normalized().unwrap_or(Vec3::Z);
    let angle = old_tangent.dot(new_tangent).clamp(-1.0, 1.0).acos();

    let new_normal = rotate_vector(prev_frame.normal, rotation_axis, angle)
        .normalized()
        .unwrap_or(prev_frame.normal);
    let new_binormal = new_tangent
        .cross(new_normal)
        .normalized()
        .unwrap_or(prev_frame.binormal);

    FrenetFrame {
        tangent: new_tangent,
        normal: new_normal,
        binormal: new_binormal,
    }
}

/// Rodrigues rotation of `v` around unit `axis`.
fn rotate_vector(v: Vec3, axis: Vec3, angle: f64) -> Vec3 {
    let (sin_angle, cos_angle) = angle.sin_cos();
    let k_cross_v = axis.cross(v);
    let k_dot_v = axis.dot(v);

    v.mul_scalar(cos_angle)
        .add(k_cross_v.mul_scalar(sin_angle))
        .add(axis.mul_scalar(k_dot_v * (1.0 - cos_angle)))
}
