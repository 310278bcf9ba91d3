//! The frozen, render-ready scene.

use ember_core::{Material, Object, Scene};
use ember_math::{Aabb, Interval, Ray};
use rand::RngCore;
use thiserror::Error;

use crate::{
    bvh::BvhNode,
    intersection::Intersection,
    light::{LightSample, LightSampler},
};

/// Minimum parametric distance for intersection queries.
const T_MIN: f32 = 1e-4;

/// Errors for malformed scenes detected at freeze time.
///
/// These abort construction; a world with no sampleable light cannot
/// produce meaningful radiance estimates.
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("scene contains no objects")]
    EmptyScene,

    #[error("scene contains no emissive objects")]
    NoLights,

    #[error("total light area is not positive")]
    ZeroLightArea,
}

/// The frozen scene: objects, the BVH over them and the light tables.
///
/// Constructed exactly once from a fully populated `Scene`; exposes no
/// mutation, so tracing may run from many threads over a shared reference
/// without synchronization.
pub struct World {
    objects: Vec<Object>,
    bvh: BvhNode,
    lights: LightSampler,
}

impl World {
    /// Freeze `scene` for rendering: validate the light configuration and
    /// build the light tables and the BVH (once).
    pub fn new(scene: Scene) -> Result<Self, BuildError> {
        let objects = scene.into_objects();
        if objects.is_empty() {
            return Err(BuildError::EmptyScene);
        }
        if !objects.iter().any(Object::is_emissive) {
            return Err(BuildError::NoLights);
        }

        let lights = LightSampler::new(&objects);
        if lights.light_count() == 0 || lights.total_area() <= 0.0 {
            return Err(BuildError::ZeroLightArea);
        }

        let bvh = BvhNode::build(&objects);

        log::info!(
            "world: {} objects, {} triangles, {} lights (area {:.3})",
            objects.len(),
            objects.iter().map(|o| o.triangles().len()).sum::<usize>(),
            lights.light_count(),
            lights.total_area()
        );

        Ok(Self {
            objects,
            bvh,
            lights,
        })
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    /// Look up the object behind an intersection's back-reference.
    pub fn object(&self, index: usize) -> &Object {
        &self.objects[index]
    }

    /// Material at an intersection's back-reference.
    pub fn material(&self, index: usize) -> &Material {
        self.objects[index].material()
    }

    /// Bounds of the whole scene (the BVH root's box).
    pub fn bounds(&self) -> &Aabb {
        self.bvh.bounding_box()
    }

    /// Aggregate area of the scene's lights.
    pub fn light_area(&self) -> f32 {
        self.lights.total_area()
    }

    /// Probability density (with respect to area) of `sample_light`.
    pub fn light_pdf(&self) -> f32 {
        self.lights.pdf()
    }

    /// Closest intersection along `ray`, or None if it misses everything.
    pub fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        self.bvh
            .intersect(&self.objects, ray, Interval::new(T_MIN, f32::INFINITY))
    }

    /// Draw one area-weighted sample from the emissive surfaces.
    pub fn sample_light(&self, rng: &mut dyn RngCore) -> LightSample {
        self.lights.sample(&self.objects, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_core::{Color, Triangle};
    use ember_math::Vec3;

    fn triangle_object(name: &str, material: Material) -> Object {
        Object::new(
            name,
            vec![Triangle::new(
                Vec3::new(-1.0, -1.0, -1.0),
                Vec3::new(1.0, -1.0, -1.0),
                Vec3::new(0.0, 1.0, -1.0),
            )],
            material,
        )
    }

    fn emissive() -> Material {
        Material::emissive("emit", Color::ZERO, Color::new(10.0, 10.0, 10.0))
    }

    #[test]
    fn test_empty_scene_rejected() {
        let result = World::new(Scene::new("empty"));
        assert!(matches!(result, Err(BuildError::EmptyScene)));
    }

    #[test]
    fn test_scene_without_lights_rejected() {
        let mut scene = Scene::new("dark");
        scene.add_object(triangle_object("wall", Material::default()));

        let result = World::new(scene);
        assert!(matches!(result, Err(BuildError::NoLights)));
    }

    #[test]
    fn test_zero_area_light_rejected() {
        let mut scene = Scene::new("thin");
        // Degenerate (collinear) light: emissive but zero area
        scene.add_object(Object::new(
            "light",
            vec![Triangle::new(Vec3::ZERO, Vec3::X, Vec3::new(2.0, 0.0, 0.0))],
            emissive(),
        ));

        let result = World::new(scene);
        assert!(matches!(result, Err(BuildError::ZeroLightArea)));
    }

    #[test]
    fn test_intersect_round_trip() {
        let mut scene = Scene::new("test");
        scene.add_object(triangle_object("light", emissive()));
        let world = World::new(scene).unwrap();

        let hit = world
            .intersect(&Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0)))
            .unwrap();
        assert!((hit.t - 1.0).abs() < 1e-3);
        assert!(world.material(hit.object).is_emissive());

        assert!(world
            .intersect(&Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0)))
            .is_none());
    }
}
