//! Mesh diagnostics for the geometry builders.
//!
//! Every builder in `geom` returns a [`GeomMeshDiagnostics`] next to the mesh.
//! Topology counts are measured on positions, not indices, so seam vertices
//! that are duplicated for UV or normal reasons do not show up as open edges.

use std::fmt;

/// Topology and quality summary for a generated mesh.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct GeomMeshDiagnostics {
    /// Total number of vertices in the final mesh.
    pub vertex_count: usize,

    /// Total number of triangles in the final mesh.
    pub triangle_count: usize,

    /// Edges with exactly one adjacent triangle.
    ///
    /// Zero for a closed (watertight) surface; an open tube reports one edge
    /// per radial segment at each end.
    pub open_edge_count: usize,

    /// Edges shared by more than two triangles.
    pub non_manifold_edge_count: usize,

    /// Zero-area triangles.
    pub degenerate_triangle_count: usize,

    /// Non-fatal issues encountered while building the mesh.
    pub warnings: Vec<String>,
}

impl GeomMeshDiagnostics {
    #[must_use]
    pub fn is_watertight(&self) -> bool {
        self.open_edge_count == 0 && self.non_manifold_edge_count == 0
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.is_watertight() && self.degenerate_triangle_count == 0 && self.warnings.is_empty()
    }
}

impl fmt::Display for GeomMeshDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} vertices, {} triangles, {} open edges, {} non-manifold edges, {} degenerate",
            self.vertex_count,
            self.triangle_count,
            self.open_edge_count,
            self.non_manifold_edge_count,
            self.degenerate_triangle_count
        )?;
        if !self.warnings.is_empty() {
            write!(f, " ({} warnings)", self.warnings.len())?;
        }
        Ok(())
    }
}
