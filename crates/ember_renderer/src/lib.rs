//! Ember renderer - CPU Monte Carlo path tracing.
//!
//! Estimates outgoing radiance along camera rays by recursively sampling
//! light transport paths, combining direct light sampling (next-event
//! estimation) with cosine-weighted indirect bounces. Intersection queries
//! run against a bounding volume hierarchy built once over the frozen
//! scene.

mod bucket;
mod bvh;
mod camera;
mod integrator;
mod intersection;
mod light;
mod renderer;
mod sampling;
mod world;

pub use bucket::{generate_buckets, render_bucket, render_parallel, Bucket, BucketResult,
    DEFAULT_BUCKET_SIZE};
pub use bvh::BvhNode;
pub use camera::Camera;
pub use integrator::trace;
pub use intersection::Intersection;
pub use light::{LightSample, LightSampler};
pub use renderer::{color_to_rgba, linear_to_gamma, render, render_pixel, ImageBuffer,
    RenderConfig};
pub use sampling::cosine_hemisphere;
pub use world::{BuildError, World};

/// Re-export the scene and math types callers need alongside the renderer
pub use ember_core::{Color, Material, Object, Scene, Triangle};
pub use ember_math::{Aabb, Interval, Ray, Vec3};

use rand::RngCore;

/// Generate a uniform random f32 in [0, 1).
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    // 24 bits of mantissa, exactly representable
    (rng.next_u32() >> 8) as f32 * (1.0 / (1u32 << 24) as f32)
}
