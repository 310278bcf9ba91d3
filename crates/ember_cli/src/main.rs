//! Headless command-line renderer.
//!
//! Loads an OBJ scene, freezes it into a render world, traces it in
//! parallel and writes a PNG.
//!
//! ```text
//! ember <scene.obj> [output.png] [settings.json]
//! ```

use std::time::Instant;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use ember_core::load_obj;
use ember_math::Vec3;
use ember_renderer::{render_parallel, Camera, RenderConfig, World};

/// Render settings read from the optional JSON settings file.
#[derive(Debug, Deserialize)]
#[serde(default)]
struct Settings {
    width: u32,
    height: u32,
    /// Camera position
    eye: [f32; 3],
    /// Camera target
    target: [f32; 3],
    /// Vertical field of view in degrees
    fov: f32,
    /// Sampling configuration
    render: RenderConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: 784,
            height: 784,
            // Default view matches the classic Cornell box framing
            eye: [278.0, 273.0, -800.0],
            target: [278.0, 273.0, -799.0],
            fov: 39.3,
            render: RenderConfig::default(),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        bail!("usage: ember <scene.obj> [output.png] [settings.json]");
    }
    let scene_path = &args[1];
    let output_path = args.get(2).map(String::as_str).unwrap_or("render.png");

    let settings = match args.get(3) {
        Some(path) => {
            let source = std::fs::read_to_string(path)
                .with_context(|| format!("reading settings file {path}"))?;
            serde_json::from_str(&source).with_context(|| format!("parsing settings file {path}"))?
        }
        None => Settings::default(),
    };

    let scene = load_obj(scene_path).with_context(|| format!("loading scene {scene_path}"))?;
    let world = World::new(scene).context("freezing scene for rendering")?;

    let mut camera = Camera::new()
        .with_resolution(settings.width, settings.height)
        .with_position(
            Vec3::from_array(settings.eye),
            Vec3::from_array(settings.target),
            Vec3::Y,
        )
        .with_fov(settings.fov);
    camera.initialize();

    let start = Instant::now();
    let image = render_parallel(&camera, &world, &settings.render);
    log::info!("rendered in {:.2?}", start.elapsed());

    image
        .save(output_path)
        .with_context(|| format!("writing {output_path}"))?;
    log::info!("saved {output_path}");

    Ok(())
}
