//! Per-pixel render driver on top of the integrator.

use std::path::Path;

use ember_math::Vec3;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::{integrator::trace, Camera, Color, World};

/// Render configuration.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Samples per pixel
    pub samples_per_pixel: u32,
    /// Maximum indirect bounce depth per path
    pub max_bounces: i32,
    /// Base seed for the per-bucket random streams
    pub seed: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_pixel: 100,
            max_bounces: 8,
            seed: 42,
        }
    }
}

/// Render a single pixel with multi-sampling.
///
/// Each sample traces one full path; the caller averages over the sample
/// budget. Emission is never discarded at the camera ray - the flag only
/// gets set inside the recursion.
pub fn render_pixel(
    camera: &Camera,
    world: &World,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;

    for _ in 0..config.samples_per_pixel {
        let ray = camera.get_ray(x, y, rng);
        pixel_color += trace(world, &ray, config.max_bounces, false, rng);
    }

    pixel_color / config.samples_per_pixel as f32
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a linear color to 8-bit RGBA.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let r = (255.0 * linear_to_gamma(color.x).clamp(0.0, 1.0)) as u8;
    let g = (255.0 * linear_to_gamma(color.y).clamp(0.0, 1.0)) as u8;
    let b = (255.0 * linear_to_gamma(color.z).clamp(0.0, 1.0)) as u8;
    [r, g, b, 255]
}

/// Simple image buffer storing linear radiance.
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width * height) as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[(y * self.width + x) as usize] = color;
    }

    /// Convert to gamma-corrected RGBA bytes.
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity((self.width * self.height * 4) as usize);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgba(*color));
        }
        bytes
    }

    /// Save as PNG (or any format the extension implies).
    pub fn save(&self, path: impl AsRef<Path>) -> image::ImageResult<()> {
        image::save_buffer(
            path,
            &self.to_rgba(),
            self.width,
            self.height,
            image::ColorType::Rgba8,
        )
    }
}

/// Render the entire image sequentially.
///
/// Mostly useful for tests and tiny images; `render_parallel` is the
/// production entry point.
pub fn render(
    camera: &Camera,
    world: &World,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> ImageBuffer {
    let mut image = ImageBuffer::new(camera.image_width, camera.image_height);

    for y in 0..camera.image_height {
        for x in 0..camera.image_width {
            let color = render_pixel(camera, world, x, y, config, rng);
            image.set(x, y, color);
        }
    }

    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_core::{Material, Object, Scene, Triangle};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn light_scene() -> World {
        let mut scene = Scene::new("test");
        scene.add_object(Object::new(
            "light",
            vec![
                Triangle::new(
                    Vec3::new(-5.0, -5.0, -3.0),
                    Vec3::new(5.0, -5.0, -3.0),
                    Vec3::new(5.0, 5.0, -3.0),
                ),
                Triangle::new(
                    Vec3::new(-5.0, -5.0, -3.0),
                    Vec3::new(5.0, 5.0, -3.0),
                    Vec3::new(-5.0, 5.0, -3.0),
                ),
            ],
            Material::emissive("emit", Color::ZERO, Color::splat(1.0)),
        ));
        World::new(scene).unwrap()
    }

    #[test]
    fn test_linear_to_gamma() {
        assert_eq!(linear_to_gamma(0.0), 0.0);
        assert!((linear_to_gamma(1.0) - 1.0).abs() < 0.0001);
        assert!((linear_to_gamma(0.25) - 0.5).abs() < 0.0001);
    }

    #[test]
    fn test_color_to_rgba_clamps() {
        assert_eq!(color_to_rgba(Color::ZERO), [0, 0, 0, 255]);
        assert_eq!(color_to_rgba(Color::splat(10.0)), [255, 255, 255, 255]);
    }

    #[test]
    fn test_image_buffer_round_trip() {
        let mut image = ImageBuffer::new(4, 3);
        image.set(2, 1, Color::splat(1.0));

        assert_eq!(image.get(2, 1), Color::splat(1.0));
        assert_eq!(image.get(0, 0), Color::ZERO);

        let bytes = image.to_rgba();
        assert_eq!(bytes.len(), 4 * 3 * 4);
        assert_eq!(bytes[(1 * 4 + 2) * 4], 255);
    }

    #[test]
    fn test_render_pixel_sees_light() {
        let world = light_scene();
        let mut camera = Camera::new()
            .with_resolution(10, 10)
            .with_position(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
            .with_fov(60.0);
        camera.initialize();

        let config = RenderConfig {
            samples_per_pixel: 4,
            max_bounces: 2,
            seed: 42,
        };
        let mut rng = StdRng::seed_from_u64(config.seed);

        // Center pixel looks straight at the emitter
        let color = render_pixel(&camera, &world, 5, 5, &config, &mut rng);
        assert!((color.x - 1.0).abs() < 1e-4);
    }
}
