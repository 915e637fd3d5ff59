//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that are shaded independently
//! on the rayon pool, then copied into one buffer. Collecting every bucket
//! before assembly is the barrier: the frame is never handed out partially
//! filled.

use hrt_math::Color;
use rayon::prelude::*;

use crate::renderer::{render_pixel, FrameContext, PixelBuffer};

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// X coordinate of the bucket's first column
    pub x: u32,
    /// Y coordinate of the bucket's first row
    pub y: u32,
    /// Width of the bucket in pixels
    pub width: u32,
    /// Height of the bucket in pixels
    pub height: u32,
    /// Index of this bucket in generation order
    pub index: usize,
}

impl Bucket {
    /// Create a new bucket.
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self { x, y, width, height, index }
    }

    /// Get the total number of pixels in this bucket.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }
}

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// Generate buckets covering the image in row-major order.
///
/// Edge buckets are clipped to the image. A zero bucket size is treated
/// as one.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let bucket_size = bucket_size.max(1);
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

    buckets
}

/// Render a single bucket to a vector of colors.
///
/// Returns pixels in row-major order within the bucket.
pub fn render_bucket(bucket: &Bucket, ctx: &FrameContext) -> Vec<Color> {
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            pixels.push(render_pixel(ctx, bucket.x + local_x, bucket.y + local_y));
        }
    }

    pixels
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    /// The bucket that was rendered
    pub bucket: Bucket,
    /// Pixel colors in row-major order
    pub pixels: Vec<Color>,
}

impl BucketResult {
    /// Create a new bucket result.
    pub fn new(bucket: Bucket, pixels: Vec<Color>) -> Self {
        Self { bucket, pixels }
    }

    /// Copy this bucket's pixels into place in the full image.
    pub fn blit_into(&self, image: &mut PixelBuffer) {
        let b = &self.bucket;
        for (row, line) in self.pixels.chunks(b.width as usize).enumerate() {
            let start = ((b.y + row as u32) * image.width + b.x) as usize;
            image.pixels[start..start + line.len()].copy_from_slice(line);
        }
    }
}

/// Fill a frame with buckets rendered in parallel.
pub fn render_frame_parallel(ctx: &FrameContext, bucket_size: u32) -> PixelBuffer {
    let buckets = generate_buckets(ctx.width, ctx.height, bucket_size);

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| BucketResult::new(*bucket, render_bucket(bucket, ctx)))
        .collect();

    let mut image = PixelBuffer::new(ctx.width, ctx.height);
    for result in &results {
        result.blit_into(&mut image);
    }

    log::trace!("Assembled {} buckets", results.len());
    image
}
