//! Scene container with light accounting.

use ember_math::Aabb;

use crate::object::Object;

/// A complete scene: the finalized list of objects to render.
///
/// The scene is the population-side container. Once population finishes it
/// is handed to the renderer, which freezes it (builds the BVH and the
/// light tables) before any tracing starts.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    /// Scene name (usually from the source filename)
    pub name: String,

    objects: Vec<Object>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            objects: Vec::new(),
        }
    }

    /// Add an object to the scene and return its index.
    pub fn add_object(&mut self, object: Object) -> usize {
        let id = self.objects.len();
        self.objects.push(object);
        id
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    /// Consume the scene, yielding its objects for freezing.
    pub fn into_objects(self) -> Vec<Object> {
        self.objects
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Total triangle count across all objects.
    pub fn triangle_count(&self) -> usize {
        self.objects.iter().map(|o| o.triangles().len()).sum()
    }

    /// Indices of the emissive objects.
    pub fn light_indices(&self) -> Vec<usize> {
        self.objects
            .iter()
            .enumerate()
            .filter(|(_, o)| o.is_emissive())
            .map(|(i, _)| i)
            .collect()
    }

    /// Aggregate surface area of the emissive objects.
    pub fn light_area(&self) -> f32 {
        self.objects
            .iter()
            .filter(|o| o.is_emissive())
            .map(Object::area)
            .sum()
    }

    /// Bounds enclosing every object in the scene.
    pub fn world_bounds(&self) -> Aabb {
        self.objects
            .iter()
            .fold(Aabb::EMPTY, |acc, o| Aabb::surrounding(&acc, o.bounds()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{material::Material, triangle::Triangle};
    use ember_math::Vec3;

    fn triangle_object(name: &str, material: Material) -> Object {
        Object::new(
            name,
            vec![Triangle::new(Vec3::ZERO, Vec3::X, Vec3::Y)],
            material,
        )
    }

    #[test]
    fn test_scene_counts() {
        let mut scene = Scene::new("test");
        scene.add_object(triangle_object("floor", Material::default()));
        scene.add_object(triangle_object("wall", Material::default()));

        assert_eq!(scene.object_count(), 2);
        assert_eq!(scene.triangle_count(), 2);
    }

    #[test]
    fn test_scene_light_accounting() {
        let mut scene = Scene::new("test");
        scene.add_object(triangle_object("floor", Material::default()));
        let light_id = scene.add_object(triangle_object(
            "light",
            Material::emissive("emit", Vec3::ZERO, Vec3::new(20.0, 20.0, 20.0)),
        ));

        assert_eq!(scene.light_indices(), vec![light_id]);
        assert!((scene.light_area() - 0.5).abs() < 1e-6);
    }
}
