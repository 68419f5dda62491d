mod test_cylinder_basic;
mod test_ray_basic;
