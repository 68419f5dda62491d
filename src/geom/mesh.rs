use std::collections::HashMap;

use super::diagnostics::GeomMeshDiagnostics;
use super::{Point3, Tolerance, Transform, Vec3};

/// Indexed triangle mesh with optional per-vertex attributes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeomMesh {
    pub positions: Vec<[f64; 3]>,
    pub indices: Vec<u32>,
    pub uvs: Option<Vec<[f64; 2]>>,
    pub normals: Option<Vec<[f64; 3]>>,
}

impl GeomMesh {
    #[must_use]
    pub fn new(positions: Vec<[f64; 3]>, indices: Vec<u32>) -> Self {
        Self {
            positions,
            indices,
            uvs: None,
            normals: None,
        }
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Returns true if any vertex position contains NaN or Inf values.
    #[must_use]
    pub fn has_invalid_vertices(&self) -> bool {
        self.positions
            .iter()
            .any(|p| !p[0].is_finite() || !p[1].is_finite() || !p[2].is_finite())
    }

    /// Returns true if all vertex indices are within bounds.
    #[must_use]
    pub fn has_valid_indices(&self) -> bool {
        let n = self.positions.len() as u32;
        self.indices.iter().all(|&i| i < n)
    }

    /// Returns true if all optional vertex attribute buffers match `positions.len()`.
    #[must_use]
    pub fn has_valid_attribute_lengths(&self) -> bool {
        let n = self.positions.len();
        self.uvs.as_ref().is_none_or(|uvs| uvs.len() == n)
            && self.normals.as_ref().is_none_or(|normals| normals.len() == n)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.indices.len() % 3 != 0 {
            return Err("mesh indices are not a triangle list (len % 3 != 0)".to_string());
        }
        if self.has_invalid_vertices() {
            return Err("mesh has invalid vertex coordinates (NaN/Inf)".to_string());
        }
        if !self.has_valid_indices() {
            return Err("mesh has out-of-bounds vertex indices".to_string());
        }
        if !self.has_valid_attribute_lengths() {
            return Err("mesh attribute buffers do not match vertex count".to_string());
        }
        Ok(())
    }

    /// Axis-aligned bounds as `(min, max)`, or `None` for an empty mesh.
    #[must_use]
    pub fn bounds(&self) -> Option<([f64; 3], [f64; 3])> {
        let first = *self.positions.first()?;
        Some(self.positions.iter().fold((first, first), |(mut lo, mut hi), p| {
            for axis in 0..3 {
                lo[axis] = lo[axis].min(p[axis]);
                hi[axis] = hi[axis].max(p[axis]);
            }
            (lo, hi)
        }))
    }

    /// Copy of the mesh with `transform` applied to positions and normals.
    #[must_use]
    pub fn transformed(&self, transform: &Transform) -> Self {
        let positions = self
            .positions
            .iter()
            .map(|p| transform.apply_point(Point3::from_array(*p)).to_array())
            .collect();
        let normals = self.normals.as_ref().map(|normals| {
            normals
                .iter()
                .map(|n| {
                    let v = transform.apply_vec(Vec3::from(*n));
                    v.normalized().unwrap_or(v).to_array()
                })
                .collect()
        });

        Self {
            positions,
            indices: self.indices.clone(),
            uvs: self.uvs.clone(),
            normals,
        }
    }
}

/// Assemble a mesh from raw buffers and measure its topology.
pub(crate) fn finalize_mesh(
    positions: Vec<[f64; 3]>,
    uvs: Option<Vec<[f64; 2]>>,
    normals: Option<Vec<[f64; 3]>>,
    indices: Vec<u32>,
    tol: Tolerance,
) -> (GeomMesh, GeomMeshDiagnostics) {
    let mesh = GeomMesh {
        positions,
        indices,
        uvs,
        normals,
    };

    let (open_edge_count, non_manifold_edge_count) = edge_topology(&mesh, tol);
    let degenerate_triangle_count = mesh
        .indices
        .chunks_exact(3)
        .filter(|tri| triangle_area(&mesh.positions, tri) <= tol.eps_squared())
        .count();

    let diagnostics = GeomMeshDiagnostics {
        vertex_count: mesh.vertex_count(),
        triangle_count: mesh.triangle_count(),
        open_edge_count,
        non_manifold_edge_count,
        degenerate_triangle_count,
        warnings: Vec::new(),
    };

    (mesh, diagnostics)
}

type WeldKey = (i64, i64, i64);

fn weld_key(p: [f64; 3], quantum: f64) -> WeldKey {
    #[allow(clippy::cast_possible_truncation)]
    let q = |v: f64| (v / quantum).round() as i64;
    (q(p[0]), q(p[1]), q(p[2]))
}

/// Count open and non-manifold edges on position-welded vertices.
fn edge_topology(mesh: &GeomMesh, tol: Tolerance) -> (usize, usize) {
    let quantum = tol.eps.max(Tolerance::ZERO_LENGTH.eps);
    let mut welded: HashMap<WeldKey, usize> = HashMap::new();
    let ids: Vec<usize> = mesh
        .positions
        .iter()
        .map(|p| {
            let next = welded.len();
            *welded.entry(weld_key(*p, quantum)).or_insert(next)
        })
        .collect();

    let mut edges: HashMap<(usize, usize), usize> = HashMap::new();
    for tri in mesh.indices.chunks_exact(3) {
        let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| ids[i as usize]);
        if a == b || b == c || a == c {
            continue;
        }
        for (u, v) in [(a, b), (b, c), (c, a)] {
            *edges.entry((u.min(v), u.max(v))).or_default() += 1;
        }
    }

    let open = edges.values().filter(|&&count| count == 1).count();
    let non_manifold = edges.values().filter(|&&count| count > 2).count();
    (open, non_manifold)
}

fn triangle_area(positions: &[[f64; 3]], tri: &[u32]) -> f64 {
    let a = Point3::from_array(positions[tri[0] as usize]);
    let b = Point3::from_array(positions[tri[1] as usize]);
    let c = Point3::from_array(positions[tri[2] as usize]);
    0.5 * b.sub_point(a).cross(c.sub_point(a)).length()
}
