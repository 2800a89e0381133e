//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that can be rendered
//! independently and in parallel using rayon.

use crate::{color_to_rgb, Color, ImageBuffer, Raytracer, Scene};

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
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

/// Cover the image with buckets in row-major order.
///
/// Buckets along the right and bottom edges are clipped to the image.
/// A zero `bucket_size` yields no buckets.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    if bucket_size == 0 {
        return Vec::new();
    }

    let rows = (0..height).step_by(bucket_size as usize);
    rows.flat_map(|y| {
        (0..width)
            .step_by(bucket_size as usize)
            .map(move |x| (x, y))
    })
    .enumerate()
    .map(|(index, (x, y))| {
        Bucket::new(
            x,
            y,
            bucket_size.min(width - x),
            bucket_size.min(height - y),
            index,
        )
    })
    .collect()
}

/// Render a single bucket.
///
/// Pixels are traced in row-major order within the bucket.
pub fn render_bucket(bucket: &Bucket, tracer: &Raytracer, scene: &Scene) -> BucketResult {
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            let color = tracer.render_pixel(scene, bucket.x + local_x, bucket.y + local_y);
            pixels.push(color);
        }
    }

    BucketResult::new(*bucket, pixels)
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    /// The bucket that was rendered
    pub bucket: Bucket,
    /// Unclamped pixel colors in row-major order
    pub pixels: Vec<Color>,
}

impl BucketResult {
    /// Create a new bucket result.
    pub fn new(bucket: Bucket, pixels: Vec<Color>) -> Self {
        Self { bucket, pixels }
    }

    /// Clamp the colors and copy them into their region of `image`.
    pub fn write_to(&self, image: &mut ImageBuffer) {
        let width = self.bucket.width as usize;
        if width == 0 {
            return;
        }
        for (row, colors) in self.pixels.chunks(width).enumerate() {
            let y = self.bucket.y + row as u32;
            for (col, color) in colors.iter().enumerate() {
                image.set(self.bucket.x + col as u32, y, color_to_rgb(*color));
            }
        }
    }
}
