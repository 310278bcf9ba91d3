//! Random sampling routines for the integrator and the light sampler.

use std::f32::consts::PI;

use ember_core::Triangle;
use ember_math::Vec3;
use rand::RngCore;

use crate::gen_f32;

/// Build an orthonormal tangent/bitangent pair around unit vector `n`.
fn orthonormal_basis(n: Vec3) -> (Vec3, Vec3) {
    // Any axis not parallel to n works as the helper
    let helper = if n.x.abs() > 0.9 { Vec3::Y } else { Vec3::X };
    let tangent = helper.cross(n).normalize();
    let bitangent = n.cross(tangent);
    (tangent, bitangent)
}

/// Sample a direction from the cosine-weighted hemisphere around `normal`.
///
/// The pdf of the returned direction is `cos(theta) / pi` with respect to
/// solid angle; the integrator computes that weight explicitly rather than
/// relying on the cancellation against the cosine term.
pub fn cosine_hemisphere(normal: Vec3, rng: &mut dyn RngCore) -> Vec3 {
    let u1 = gen_f32(rng);
    let u2 = gen_f32(rng);

    // Uniform disk via the sqrt warp, projected up onto the hemisphere
    let r = u1.sqrt();
    let phi = 2.0 * PI * u2;
    let x = r * phi.cos();
    let y = r * phi.sin();
    let z = (1.0 - u1).max(0.0).sqrt();

    let (tangent, bitangent) = orthonormal_basis(normal);
    (x * tangent + y * bitangent + z * normal).normalize()
}

/// Sample a point uniformly over a triangle's surface.
///
/// Uses the sqrt barycentric warp from two independent uniforms.
pub fn triangle_point(triangle: &Triangle, rng: &mut dyn RngCore) -> Vec3 {
    let su = gen_f32(rng).sqrt();
    let b0 = 1.0 - su;
    let b1 = gen_f32(rng) * su;
    triangle.point_at(b0, b1)
}
