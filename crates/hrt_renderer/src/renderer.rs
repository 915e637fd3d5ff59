//! Per-frame pixel fill.
//!
//! Every pixel is shaded independently from a read-only [`FrameContext`]:
//! - Screen coordinate `(x / width, y / height)`, no half-pixel offset
//! - Ray direction from the cached camera basis
//! - Heuristic color from [`shade`]

use std::path::Path;

use hrt_core::build_scene;
use hrt_math::Color;

use crate::bucket::{render_frame_parallel, DEFAULT_BUCKET_SIZE};
use crate::camera::{Camera, CameraBasis, CameraError};
use crate::shading::shade;

/// Animation step per frame, in radians. Fixed, not wall-clock based.
pub const ROTATION_DELTA: f32 = 0.02;

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    /// Viewing parameters
    pub camera: Camera,
    /// Angle added to the rotation every frame
    pub rotation_delta: f32,
    /// Tile edge length for the parallel fill
    pub bucket_size: u32,
    /// Fill pixels on the rayon pool instead of the calling thread
    pub parallel: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            camera: Camera::new(),
            rotation_delta: ROTATION_DELTA,
            bucket_size: DEFAULT_BUCKET_SIZE,
            parallel: true,
        }
    }
}

impl RenderConfig {
    /// Set output resolution. The camera aspect follows.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self.camera.aspect = width as f32 / height as f32;
        self
    }

    /// Replace the camera.
    pub fn with_camera(mut self, camera: Camera) -> Self {
        self.camera = camera;
        self
    }

    /// Choose between the serial and bucketed parallel fill.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set tile edge length for the parallel fill.
    pub fn with_bucket_size(mut self, bucket_size: u32) -> Self {
        self.bucket_size = bucket_size;
        self
    }
}

/// Animation state advanced once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnimationState {
    /// Current rotation about Y in radians. Unbounded; shading is 2π-periodic.
    pub rotation_angle: f32,
    /// Frames rendered so far
    pub frame: u64,
}

impl AnimationState {
    /// Step the animation forward by one frame.
    pub fn advance(&mut self, delta: f32) {
        self.rotation_angle += delta;
        self.frame += 1;
    }
}

/// Everything the frame loop carries between frames.
#[derive(Debug, Clone)]
pub struct RendererState {
    config: RenderConfig,
    basis: CameraBasis,
    animation: AnimationState,
}

impl RendererState {
    /// Validate the camera once and set up the initial state.
    pub fn new(config: RenderConfig) -> Result<Self, CameraError> {
        let basis = config.camera.compute_basis()?;
        log::debug!(
            "Camera basis: u={:?} v={:?} w={:?} lower_left={:?}",
            basis.u(),
            basis.v(),
            basis.w(),
            basis.lower_left()
        );
        Ok(Self {
            config,
            basis,
            animation: AnimationState::default(),
        })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn basis(&self) -> &CameraBasis {
        &self.basis
    }

    pub fn animation(&self) -> AnimationState {
        self.animation
    }

    /// Advance the animation by the configured delta.
    pub fn advance(&mut self) {
        self.animation.advance(self.config.rotation_delta);
    }
}

/// Immutable snapshot shared by every pixel of one frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameContext {
    pub basis: CameraBasis,
    pub rotation_angle: f32,
    pub scene_non_empty: bool,
    pub width: u32,
    pub height: u32,
}

impl FrameContext {
    /// Snapshot the state for one frame, rebuilding the scene.
    pub fn capture(state: &RendererState) -> Self {
        let scene = build_scene();
        Self {
            basis: state.basis,
            rotation_angle: state.animation.rotation_angle,
            scene_non_empty: !scene.is_empty(),
            width: state.config.width,
            height: state.config.height,
        }
    }
}

/// Shade a single pixel. Row 0 is the bottom of the image.
#[inline]
pub fn render_pixel(ctx: &FrameContext, x: u32, y: u32) -> Color {
    let u = x as f32 / ctx.width as f32;
    let v = y as f32 / ctx.height as f32;
    let dir = ctx.basis.ray_direction(u, v);
    shade(dir, ctx.rotation_angle, ctx.scene_non_empty)
}

/// Clamp a value to [0, 1] range.
#[inline]
pub fn clamp_01(x: f32) -> f32 {
    x.clamp(0.0, 1.0)
}

/// Convert a color to 8-bit RGBA without gamma, matching what a float
/// texture shows on a linear surface.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let r = (255.0 * clamp_01(color.x)) as u8;
    let g = (255.0 * clamp_01(color.y)) as u8;
    let b = (255.0 * clamp_01(color.z)) as u8;
    let a = (255.0 * clamp_01(color.w)) as u8;
    [r, g, b, a]
}

/// Row-major RGBA float image, row 0 at the bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl PixelBuffer {
    /// Create a new buffer filled with transparent black.
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

    /// Raw bytes in upload order (`Rgba32Float`, bottom row first).
    pub fn as_bytes(&self) -> &[u8] {
        hrt_math::as_bytes(&self.pixels)
    }

    /// Convert to an 8-bit image, top row first.
    pub fn to_image(&self) -> image::RgbaImage {
        let height = self.height;
        image::RgbaImage::from_fn(self.width, height, |x, y| {
            image::Rgba(color_to_rgba(self.get(x, height - 1 - y)))
        })
    }

    /// Save as an 8-bit image; the format comes from the file extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> image::ImageResult<()> {
        self.to_image().save(path)
    }
}

/// Fill a frame on the calling thread.
pub fn render_serial(ctx: &FrameContext) -> PixelBuffer {
    let mut image = PixelBuffer::new(ctx.width, ctx.height);

    for y in 0..ctx.height {
        for x in 0..ctx.width {
            image.set(x, y, render_pixel(ctx, x, y));
        }
    }

    image
}

/// Render the current frame of `state`.
///
/// The scene is rebuilt and snapshotted first; the returned buffer is
/// always fully written.
pub fn render_frame(state: &RendererState) -> PixelBuffer {
    let ctx = FrameContext::capture(state);
    if state.config.parallel {
        render_frame_parallel(&ctx, state.config.bucket_size)
    } else {
        render_serial(&ctx)
    }
}
