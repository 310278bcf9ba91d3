//! Wavefront OBJ scene population.
//!
//! Parses an OBJ file and its MTL library, groups triangles per named
//! object, resolves each object's single material and computes the
//! per-triangle and per-object surface areas the light sampler relies on.
//!
//! Parsing is a plain function call with locally scoped state; nothing is
//! shared between invocations.

use std::fs;
use std::path::Path;

use thiserror::Error;
use wavefront_obj::{mtl, obj};

use ember_math::Vec3;

use crate::{material::Material, object::Object, scene::Scene, triangle::Triangle};

/// Errors that can occur during scene population.
///
/// A malformed scene aborts loading; there is no silent degradation.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] wavefront_obj::ParseError),

    #[error("unknown material: {0}")]
    UnknownMaterial(String),

    #[error("no geometry found in scene")]
    NoGeometry,
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Load an OBJ file (and its MTL library, if referenced) into a `Scene`.
///
/// The MTL path is resolved relative to the OBJ's directory.
pub fn load_obj(path: impl AsRef<Path>) -> LoadResult<Scene> {
    let path = path.as_ref();
    let obj_set = obj::parse(fs::read_to_string(path)?)?;

    let materials = match &obj_set.material_library {
        Some(library) => {
            let mtl_path = path.parent().unwrap_or(Path::new(".")).join(library);
            mtl::parse(fs::read_to_string(mtl_path)?)?.materials
        }
        None => Vec::new(),
    };

    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    build_scene(obj_set, &materials, name)
}

/// Load a scene from in-memory OBJ/MTL sources.
pub fn load_obj_from_strings(
    obj_source: &str,
    mtl_source: Option<&str>,
    name: impl Into<String>,
) -> LoadResult<Scene> {
    let obj_set = obj::parse(obj_source.to_string())?;
    let materials = match mtl_source {
        Some(source) => mtl::parse(source.to_string())?.materials,
        None => Vec::new(),
    };

    build_scene(obj_set, &materials, name.into())
}

fn build_scene(obj_set: obj::ObjSet, materials: &[mtl::Material], name: String) -> LoadResult<Scene> {
    let mut scene = Scene::new(name);

    for object in &obj_set.objects {
        let mut triangles = Vec::new();
        // Each object uses a single material for all of its triangles.
        let mut material_name: Option<&str> = None;

        for geometry in &object.geometry {
            if let Some(name) = &geometry.material_name {
                match material_name {
                    None => material_name = Some(name),
                    Some(current) if current != name => log::warn!(
                        "object '{}' mixes materials, keeping '{}'",
                        object.name,
                        current
                    ),
                    _ => {}
                }
            }

            for shape in &geometry.shapes {
                let obj::Primitive::Triangle(a, b, c) = &shape.primitive else {
                    log::warn!("skipping non-triangle primitive in '{}'", object.name);
                    continue;
                };

                triangles.push(Triangle::new(
                    vertex_position(&object.vertices[a.0]),
                    vertex_position(&object.vertices[b.0]),
                    vertex_position(&object.vertices[c.0]),
                ));
            }
        }

        if triangles.is_empty() {
            log::warn!("object '{}' has no triangles, skipping", object.name);
            continue;
        }

        let material = match material_name {
            Some(name) => convert_material(lookup_material(materials, name)?),
            None => {
                log::warn!("object '{}' has no material, using default", object.name);
                Material::default()
            }
        };

        log::debug!(
            "object '{}': {} triangles, material '{}'{}",
            object.name,
            triangles.len(),
            material.name,
            if material.is_emissive() { " (light)" } else { "" }
        );

        scene.add_object(Object::new(object.name.clone(), triangles, material));
    }

    if scene.object_count() == 0 {
        return Err(LoadError::NoGeometry);
    }

    log::info!(
        "scene '{}': {} objects, {} triangles, {} lights (area {:.3})",
        scene.name,
        scene.object_count(),
        scene.triangle_count(),
        scene.light_indices().len(),
        scene.light_area()
    );

    Ok(scene)
}

fn vertex_position(v: &obj::Vertex) -> Vec3 {
    Vec3::new(v.x as f32, v.y as f32, v.z as f32)
}

fn lookup_material<'a>(
    materials: &'a [mtl::Material],
    name: &str,
) -> LoadResult<&'a mtl::Material> {
    materials
        .iter()
        .find(|m| m.name == name)
        .ok_or_else(|| LoadError::UnknownMaterial(name.to_string()))
}

fn convert_material(m: &mtl::Material) -> Material {
    let diffuse = Vec3::new(
        m.color_diffuse.r as f32,
        m.color_diffuse.g as f32,
        m.color_diffuse.b as f32,
    );
    let emission = m
        .color_emissive
        .as_ref()
        .map(|c| Vec3::new(c.r as f32, c.g as f32, c.b as f32))
        .unwrap_or(Vec3::ZERO);

    Material {
        name: m.name.clone(),
        diffuse,
        emission,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOX_OBJ: &str = "\
mtllib box.mtl
o floor
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 1.0 0.0 1.0
v 0.0 0.0 1.0
usemtl white
f 1 2 3
f 1 3 4
o light
v 0.25 0.99 0.25
v 0.75 0.99 0.25
v 0.75 0.99 0.75
usemtl emit
f 5 6 7
";

    const BOX_MTL: &str = "\
newmtl white
Ns 10.0
Ka 0.0 0.0 0.0
Kd 0.73 0.73 0.73
Ks 0.0 0.0 0.0
d 1.0
illum 2

newmtl emit
Ns 10.0
Ka 0.0 0.0 0.0
Kd 0.0 0.0 0.0
Ks 0.0 0.0 0.0
Ke 30.0 30.0 30.0
d 1.0
illum 2
";

    #[test]
    fn test_load_from_strings() {
        let scene = load_obj_from_strings(BOX_OBJ, Some(BOX_MTL), "box").unwrap();

        assert_eq!(scene.object_count(), 2);
        assert_eq!(scene.triangle_count(), 3);

        let floor = &scene.objects()[0];
        assert_eq!(floor.name(), "floor");
        assert!(!floor.is_emissive());
        assert!((floor.material().diffuse.x - 0.73).abs() < 1e-6);
        assert!((floor.area() - 1.0).abs() < 1e-5);

        let light = &scene.objects()[1];
        assert!(light.is_emissive());
        assert!((light.material().emission.x - 30.0).abs() < 1e-6);
        assert_eq!(scene.light_indices(), vec![1]);
    }

    #[test]
    fn test_unknown_material_is_fatal() {
        let source = "\
o tri
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 1.0 0.0
usemtl missing
f 1 2 3
";
        let result = load_obj_from_strings(source, Some(BOX_MTL), "bad");
        assert!(matches!(result, Err(LoadError::UnknownMaterial(_))));
    }

    #[test]
    fn test_empty_scene_is_fatal() {
        let result = load_obj_from_strings("", None, "empty");
        assert!(matches!(result, Err(LoadError::NoGeometry)));
    }

    #[test]
    fn test_object_without_material_gets_default() {
        let source = "\
o tri
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 1.0 0.0
f 1 2 3
";
        let scene = load_obj_from_strings(source, None, "plain").unwrap();
        let object = &scene.objects()[0];

        assert!(!object.is_emissive());
        assert_eq!(object.material().diffuse, Vec3::new(0.5, 0.5, 0.5));
    }
}
