//! Area-proportional sampling of emissive surfaces.

use ember_core::Object;
use ember_math::Vec3;
use rand::RngCore;

use crate::{gen_f32, sampling};

/// A point sampled on an emissive surface.
#[derive(Debug, Clone, Copy)]
pub struct LightSample {
    /// Sampled point on the light surface
    pub point: Vec3,
    /// Unit geometric normal of the light at the point
    pub normal: Vec3,
    /// Emitted radiance of the light
    pub emission: Vec3,
    /// Index of the light object the point lies on
    pub object: usize,
}

/// Precomputed tables for drawing points on the scene's emissive objects
/// proportionally to surface area.
///
/// Selection is area-weighted at every level: across light objects, across
/// a light's triangles, and uniform within a triangle. The corresponding
/// density with respect to area is `1 / total_area`.
pub struct LightSampler {
    entries: Vec<LightEntry>,
    total_area: f32,
}

struct LightEntry {
    object: usize,
    /// Running sum of light areas up to and including this entry
    cumulative_area: f32,
    /// Running sums of triangle areas within the object
    triangle_cumulative: Vec<f32>,
}

impl LightSampler {
    /// Gather the emissive objects of `objects` into sampling tables.
    ///
    /// Emissive objects with zero area are skipped; they cannot be sampled.
    pub fn new(objects: &[Object]) -> Self {
        let mut entries = Vec::new();
        let mut total_area = 0.0;

        for (id, object) in objects.iter().enumerate() {
            if !object.is_emissive() || object.area() <= 0.0 {
                continue;
            }

            let mut running = 0.0;
            let triangle_cumulative = object
                .triangles()
                .iter()
                .map(|t| {
                    running += t.area();
                    running
                })
                .collect();

            total_area += object.area();
            entries.push(LightEntry {
                object: id,
                cumulative_area: total_area,
                triangle_cumulative,
            });
        }

        Self {
            entries,
            total_area,
        }
    }

    /// Number of sampleable light objects.
    pub fn light_count(&self) -> usize {
        self.entries.len()
    }

    /// Aggregate area of all sampleable lights.
    pub fn total_area(&self) -> f32 {
        self.total_area
    }

    /// Probability density (with respect to area) of any sampled point.
    pub fn pdf(&self) -> f32 {
        1.0 / self.total_area
    }

    /// Draw one point on the emissive surfaces.
    ///
    /// Precondition (established by the world at build time): at least one
    /// light with positive area exists.
    pub fn sample(&self, objects: &[Object], rng: &mut dyn RngCore) -> LightSample {
        debug_assert!(!self.entries.is_empty() && self.total_area > 0.0);

        let u = gen_f32(rng) * self.total_area;
        let entry = self
            .entries
            .iter()
            .find(|e| u < e.cumulative_area)
            .unwrap_or(&self.entries[self.entries.len() - 1]);
        let object = &objects[entry.object];

        // Remap the pick into the object's own area range
        let local = u - (entry.cumulative_area - object.area());
        let index = entry
            .triangle_cumulative
            .partition_point(|&c| c <= local)
            .min(object.triangles().len() - 1);
        let triangle = &object.triangles()[index];

        LightSample {
            point: sampling::triangle_point(triangle, rng),
            normal: triangle.normal(),
            emission: object.material().emission,
            object: entry.object,
        }
    }
}
