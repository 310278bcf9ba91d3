//! Recursive path-tracing radiance estimator.
//!
//! Splits the estimate into a direct term (next-event estimation against
//! one light sample) and an indirect term (one cosine-weighted bounce,
//! recursed). The `discard_emission` flag suppresses the hit point's own
//! emission on recursive calls, because the previous bounce has already
//! accounted for that light via its direct term.

use std::f32::consts::FRAC_1_PI;

use ember_math::{Ray, Vec3};
use rand::RngCore;

use crate::world::World;

/// Forward offset applied to spawned rays so secondary and shadow rays do
/// not re-intersect their originating surface at t ~ 0.
const RAY_BIAS: f32 = 1e-4;

/// Spawn a secondary ray from a surface point.
#[inline]
fn spawn(origin: Vec3, direction: Vec3) -> Ray {
    Ray::new(origin + direction * RAY_BIAS, direction)
}

/// Estimate outgoing radiance along `ray`.
///
/// `bounces_left` is a hard recursion cutoff: a negative budget returns
/// zero immediately, and each indirect bounce decrements it. A ray that
/// misses everything, a shadowed light sample or a light below the surface
/// horizon all contribute zero; none of these are errors.
///
/// Callers pass `discard_emission = false`; the recursion sets it on its
/// own indirect rays.
pub fn trace(
    world: &World,
    ray: &Ray,
    bounces_left: i32,
    discard_emission: bool,
    rng: &mut dyn RngCore,
) -> Vec3 {
    debug_assert!(ray.direction.is_normalized());

    if bounces_left < 0 {
        return Vec3::ZERO;
    }
    let Some(hit) = world.intersect(ray) else {
        return Vec3::ZERO;
    };
    let material = world.material(hit.object);

    let mut radiance = if discard_emission {
        Vec3::ZERO
    } else {
        material.emission
    };

    // Indirect term: one cosine-weighted bounce. BRDF, cosine and pdf are
    // all computed explicitly; the cancellation against the cosine pdf is
    // not hard-coded, so non-diffuse BRDFs stay correct.
    let bounce_dir = crate::sampling::cosine_hemisphere(hit.normal, rng);
    let cos_theta = bounce_dir.dot(hit.normal);
    if cos_theta > 0.0 {
        let pdf = cos_theta * FRAC_1_PI;
        let bounce = spawn(hit.point, bounce_dir);
        let li = trace(world, &bounce, bounces_left - 1, true, rng);
        radiance += li * material.brdf(-ray.direction, bounce_dir) * cos_theta / pdf;
    }

    // Direct term: next-event estimation against one light sample. The
    // sample counts only when the shadow ray's closest hit lies on the
    // sampled light object itself.
    let light = world.sample_light(rng);
    let to_light = light.point - hit.point;
    let distance_sq = to_light.length_squared();
    if distance_sq > 0.0 {
        let light_dir = to_light / distance_sq.sqrt();
        let cos_surface = light_dir.dot(hit.normal);
        let cos_light = (-light_dir).dot(light.normal);

        if cos_surface > 0.0 && cos_light > 0.0 {
            let shadow = spawn(hit.point, light_dir);
            let unoccluded = world
                .intersect(&shadow)
                .map_or(false, |s| s.object == light.object);
            if unoccluded {
                let brdf = material.brdf(-ray.direction, light_dir);
                let attenuation = 1.0 / distance_sq;
                radiance += light.emission * brdf * cos_surface * cos_light * attenuation
                    / world.light_pdf();
            }
        }
    }

    radiance
}
