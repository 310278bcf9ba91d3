//! Intersection records and ray-triangle intersection.

use ember_core::Triangle;
use ember_math::{Interval, Ray, Vec3};

/// Record of a ray-scene intersection.
///
/// A miss is `None` at the query site; a record never holds undefined
/// fields. `object` is an index into the world's frozen object sequence
/// rather than a borrowed pointer, so the record stays plain data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    /// Parametric distance along the ray
    pub t: f32,
    /// Point of intersection
    pub point: Vec3,
    /// Unit geometric normal of the hit triangle
    pub normal: Vec3,
    /// Index of the object that owns the hit triangle
    pub object: usize,
}

/// Möller-Trumbore ray-triangle intersection.
///
/// Returns the parametric hit distance within `ray_t`, or None. Degenerate
/// triangles have a near-zero determinant and never hit.
pub fn ray_triangle(ray: &Ray, triangle: &Triangle, ray_t: Interval) -> Option<f32> {
    let edge1 = triangle.v1() - triangle.v0();
    let edge2 = triangle.v2() - triangle.v0();

    let h = ray.direction.cross(edge2);
    let a = edge1.dot(h);

    // Ray is parallel to the triangle plane (or the triangle is degenerate)
    if a.abs() < 1e-8 {
        return None;
    }

    let f = 1.0 / a;
    let s = ray.origin - triangle.v0();
    let u = f * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray.direction.dot(q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);
    if !ray_t.contains(t) {
        return None;
    }

    Some(t)
}
