use crate::geom::{Point3, Ray3, Transform, Vec3, intersect_capped_cylinder};

#[test]
fn ray_hits_cylinder_side() {
    let ray = Ray3::new(Point3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -2.0)).unwrap();
    let t = intersect_capped_cylinder(&ray, 1.0, 1.0).expect("hit");
    assert!((t - 4.0).abs() < 1e-12);
}

#[test]
fn ray_hits_cylinder_cap() {
    let ray = Ray3::new(Point3::new(0.2, 5.0, 0.0), Vec3::new(0.0, -1.0, 0.0)).unwrap();
    let t = intersect_capped_cylinder(&ray, 1.0, 1.0).expect("hit");
    assert!((t - 4.0).abs() < 1e-12);
}

#[test]
fn ray_misses_or_points_away() {
    let beside = Ray3::new(Point3::new(2.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0)).unwrap();
    assert!(intersect_capped_cylinder(&beside, 1.0, 1.0).is_none());

    let away = Ray3::new(Point3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, 1.0)).unwrap();
    assert!(intersect_capped_cylinder(&away, 1.0, 1.0).is_none());

    let above = Ray3::new(Point3::new(0.0, 1.5, 5.0), Vec3::new(0.0, 0.0, -1.0)).unwrap();
    assert!(intersect_capped_cylinder(&above, 1.0, 1.0).is_none());
}

#[test]
fn ray_requires_direction() {
    assert!(Ray3::new(Point3::ORIGIN, Vec3::ZERO).is_none());
    assert!(Ray3::new(Point3::new(f64::NAN, 0.0, 0.0), Vec3::X).is_none());
}

#[test]
fn local_ray_hits_transformed_disc() {
    let placement = Transform::rotate_z(0.2).then(&Transform::translate(Vec3::new(0.1, 0.8, 0.1)));
    let center = placement.apply_point(Point3::ORIGIN);

    let ray = Ray3::new(center.add_vec(Vec3::new(0.0, 0.0, 1.0)), Vec3::new(0.0, 0.0, -1.0)).unwrap();
    let local = ray.to_local(&placement);
    let t = intersect_capped_cylinder(&local, 0.05, 0.01).expect("hit");
    assert!((t - 0.95).abs() < 1e-9, "t = {t}");
}
