//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that are rendered independently
//! and in parallel using rayon. Each bucket owns a seeded random stream,
//! so renders are deterministic for a given config seed and no RNG state
//! is ever shared between threads.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::renderer::{render_pixel, ImageBuffer, RenderConfig};
use crate::{Camera, Color, World};

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy)]
pub struct Bucket {
    /// X coordinate of bucket's top-left corner
    pub x: u32,
    /// Y coordinate of bucket's top-left corner
    pub y: u32,
    /// Width of the bucket in pixels
    pub width: u32,
    /// Height of the bucket in pixels
    pub height: u32,
    /// Index of this bucket in the render order
    pub index: usize,
}

impl Bucket {
    /// Create a new bucket.
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            index,
        }
    }

    /// Get the total number of pixels in this bucket.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }
}

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// Generate buckets for an image, sorted center-out.
///
/// Center-out ordering mimics production renderers, where the visually
/// important middle of the frame finishes first.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let mut buckets = Vec::new();
    let mut index = 0;

    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            let bw = bucket_size.min(width - x);
            let bh = bucket_size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh, index));
            index += 1;
            x += bucket_size;
        }
        y += bucket_size;
    }

    sort_center_out(&mut buckets, width, height);

    // Update indices after sorting
    for (i, bucket) in buckets.iter_mut().enumerate() {
        bucket.index = i;
    }

    buckets
}

/// Sort buckets by distance from the image center.
fn sort_center_out(buckets: &mut [Bucket], width: u32, height: u32) {
    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;

    buckets.sort_by(|a, b| {
        let a_x = a.x as f32 + a.width as f32 / 2.0 - center_x;
        let a_y = a.y as f32 + a.height as f32 / 2.0 - center_y;
        let b_x = b.x as f32 + b.width as f32 / 2.0 - center_x;
        let b_y = b.y as f32 + b.height as f32 / 2.0 - center_y;

        let a_dist = a_x * a_x + a_y * a_y;
        let b_dist = b_x * b_x + b_y * b_y;

        a_dist
            .partial_cmp(&b_dist)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    /// The bucket that was rendered
    pub bucket: Bucket,
    /// Pixel colors in row-major order within the bucket
    pub pixels: Vec<Color>,
}

/// Render a single bucket with its own random stream.
pub fn render_bucket(
    bucket: &Bucket,
    camera: &Camera,
    world: &World,
    config: &RenderConfig,
    rng: &mut StdRng,
) -> Vec<Color> {
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            let color = render_pixel(
                camera,
                world,
                bucket.x + local_x,
                bucket.y + local_y,
                config,
                rng,
            );
            pixels.push(color);
        }
    }

    pixels
}

/// Render the whole image, fanning buckets out across rayon's thread pool.
///
/// Each bucket seeds an independent `StdRng` from the config seed and its
/// own index, so the result is identical no matter how the buckets are
/// scheduled across threads.
pub fn render_parallel(camera: &Camera, world: &World, config: &RenderConfig) -> ImageBuffer {
    let buckets = generate_buckets(camera.image_width, camera.image_height, DEFAULT_BUCKET_SIZE);
    log::info!(
        "rendering {}x{} in {} buckets, {} spp",
        camera.image_width,
        camera.image_height,
        buckets.len(),
        config.samples_per_pixel
    );

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| {
            let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(bucket.index as u64));
            BucketResult {
                bucket: *bucket,
                pixels: render_bucket(bucket, camera, world, config, &mut rng),
            }
        })
        .collect();

    let mut image = ImageBuffer::new(camera.image_width, camera.image_height);
    for result in results {
        let bucket = result.bucket;
        for local_y in 0..bucket.height {
            for local_x in 0..bucket.width {
                let color = result.pixels[(local_y * bucket.width + local_x) as usize];
                image.set(bucket.x + local_x, bucket.y + local_y, color);
            }
        }
    }

    image
}
