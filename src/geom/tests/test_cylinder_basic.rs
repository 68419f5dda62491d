use crate::geom::{CylinderError, CylinderSpec, Point3, cylinder_mesh};

#[test]
fn tapered_cylinder_is_watertight() {
    let spec = CylinderSpec::new(0.08, 0.06, 2.5, 16);
    let (mesh, diag) = cylinder_mesh(spec, Point3::ORIGIN).expect("cylinder");

    // Two side rings plus two caps (center + ring each).
    assert_eq!(mesh.vertex_count(), 2 * 17 + 2 * 18);
    assert_eq!(mesh.triangle_count(), 16 * 2 + 16 + 16);
    assert!(diag.is_watertight(), "{diag}");
    assert_eq!(diag.degenerate_triangle_count, 0);
    assert!(mesh.validate().is_ok());
}

#[test]
fn cylinder_bounds_follow_spec_and_center() {
    let spec = CylinderSpec::new(0.05, 0.05, 0.02, 24);
    let center = Point3::new(0.1, 0.8, 0.1);
    let (mesh, _) = cylinder_mesh(spec, center).unwrap();
    let (lo, hi) = mesh.bounds().expect("non-empty");

    assert!((lo[1] - 0.79).abs() < 1e-12);
    assert!((hi[1] - 0.81).abs() < 1e-12);
    assert!((hi[0] - 0.15).abs() < 1e-9);
    assert!((lo[2] - 0.05).abs() < 1e-9);
}

#[test]
fn side_normals_point_away_from_axis() {
    let spec = CylinderSpec::new(0.2, 0.15, 2.5, 32);
    let (mesh, _) = cylinder_mesh(spec, Point3::ORIGIN).unwrap();
    let normals = mesh.normals.as_ref().unwrap();

    for i in 0..2 * 33 {
        let p = mesh.positions[i];
        let n = normals[i];
        assert!(p[0] * n[0] + p[2] * n[2] > 0.0, "vertex {i}");
        // Wider at the top, so the wall faces slightly downward.
        assert!(n[1] < 0.0);
    }
}

#[test]
fn cylinder_rejects_invalid_specs() {
    assert_eq!(
        cylinder_mesh(CylinderSpec::new(0.1, 0.1, 0.0, 8), Point3::ORIGIN).unwrap_err(),
        CylinderError::InvalidHeight
    );
    assert_eq!(
        cylinder_mesh(CylinderSpec::new(0.0, 0.0, 1.0, 8), Point3::ORIGIN).unwrap_err(),
        CylinderError::InvalidRadius
    );
    assert_eq!(
        cylinder_mesh(CylinderSpec::new(-0.1, 0.1, 1.0, 8), Point3::ORIGIN).unwrap_err(),
        CylinderError::InvalidRadius
    );
    assert_eq!(
        cylinder_mesh(CylinderSpec::new(0.1, 0.1, 1.0, 2), Point3::ORIGIN).unwrap_err(),
        CylinderError::NotEnoughRadialSegments
    );
}
