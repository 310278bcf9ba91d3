//! Surface material definition and BRDF evaluation.

use std::f32::consts::FRAC_1_PI;

use ember_math::Vec3;

/// Color type alias (linear RGB, values typically 0-1)
pub type Color = Vec3;

/// A diffuse material with optional emission.
///
/// Every object carries exactly one material for all of its triangles.
#[derive(Clone, Debug)]
pub struct Material {
    /// Material name (from the MTL library)
    pub name: String,

    /// Diffuse reflectance (kd)
    pub diffuse: Color,

    /// Emitted radiance (ke, zero for non-lights)
    pub emission: Color,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: String::new(),
            diffuse: Color::new(0.5, 0.5, 0.5), // Grey default
            emission: Color::ZERO,
        }
    }
}

impl Material {
    /// Create a new non-emissive material.
    pub fn new(name: impl Into<String>, diffuse: Color) -> Self {
        Self {
            name: name.into(),
            diffuse,
            ..Default::default()
        }
    }

    /// Create a new emissive material.
    pub fn emissive(name: impl Into<String>, diffuse: Color, emission: Color) -> Self {
        Self {
            name: name.into(),
            diffuse,
            emission,
        }
    }

    /// Check if this material emits light.
    pub fn is_emissive(&self) -> bool {
        self.emission.length_squared() > 0.0
    }

    /// Evaluate the BRDF for an outgoing/incoming direction pair.
    ///
    /// A Lambertian surface reflects `kd / pi` independent of direction.
    /// Both directions are accepted anyway so directional models can be
    /// added without changing the integrator's contract.
    pub fn brdf(&self, _wo: Vec3, _wi: Vec3) -> Color {
        self.diffuse * FRAC_1_PI
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_emissive() {
        let grey = Material::new("grey", Color::new(0.5, 0.5, 0.5));
        assert!(!grey.is_emissive());

        let light = Material::emissive("light", Color::ZERO, Color::new(10.0, 10.0, 10.0));
        assert!(light.is_emissive());
    }

    #[test]
    fn test_brdf_is_diffuse_over_pi() {
        let material = Material::new("red", Color::new(0.9, 0.1, 0.1));
        let value = material.brdf(Vec3::Z, Vec3::Y);

        assert!((value.x - 0.9 * FRAC_1_PI).abs() < 1e-6);
        assert!((value.y - 0.1 * FRAC_1_PI).abs() < 1e-6);
    }

    #[test]
    fn test_brdf_is_direction_independent() {
        let material = Material::new("grey", Color::new(0.5, 0.5, 0.5));

        let a = material.brdf(Vec3::Z, Vec3::Y);
        let b = material.brdf(Vec3::X, Vec3::new(0.0, -1.0, 0.0));
        assert_eq!(a, b);
    }
}
