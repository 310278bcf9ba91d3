//! Scene objects: triangle groups sharing one material.

use ember_math::Aabb;

use crate::{material::Material, triangle::Triangle};

/// A named group of triangles sharing one material.
///
/// The aggregate surface area (used by the light sampler as the selection
/// weight) and the enclosing bounds are computed at construction; objects
/// are immutable afterward and owned by the scene for its lifetime.
#[derive(Clone, Debug)]
pub struct Object {
    name: String,
    triangles: Vec<Triangle>,
    material: Material,
    /// Sum of triangle areas
    area: f32,
    /// Bounds enclosing all triangles
    bounds: Aabb,
}

impl Object {
    /// Create a new object from its triangles and material.
    pub fn new(name: impl Into<String>, triangles: Vec<Triangle>, material: Material) -> Self {
        let area = triangles.iter().map(Triangle::area).sum();
        let bounds = triangles
            .iter()
            .fold(Aabb::EMPTY, |acc, t| Aabb::surrounding(&acc, t.bounds()));

        Self {
            name: name.into(),
            triangles,
            material,
            area,
            bounds,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Aggregate surface area (sum of triangle areas).
    pub fn area(&self) -> f32 {
        self.area
    }

    /// Bounds enclosing all triangles.
    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    /// Check if this object's material emits light.
    pub fn is_emissive(&self) -> bool {
        self.material.is_emissive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Color;
    use ember_math::Vec3;

    fn unit_quad() -> Vec<Triangle> {
        vec![
            Triangle::new(Vec3::ZERO, Vec3::X, Vec3::Y),
            Triangle::new(Vec3::X, Vec3::new(1.0, 1.0, 0.0), Vec3::Y),
        ]
    }

    #[test]
    fn test_object_aggregate_area() {
        let object = Object::new("quad", unit_quad(), Material::default());
        assert!((object.area() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_object_bounds_enclose_triangles() {
        let object = Object::new("quad", unit_quad(), Material::default());
        for triangle in object.triangles() {
            assert!(object.bounds().contains(triangle.bounds()));
        }
    }

    #[test]
    fn test_object_emission_follows_material() {
        let light = Object::new(
            "light",
            unit_quad(),
            Material::emissive("emit", Color::ZERO, Color::new(30.0, 30.0, 30.0)),
        );
        assert!(light.is_emissive());

        let wall = Object::new("wall", unit_quad(), Material::default());
        assert!(!wall.is_emissive());
    }
}
