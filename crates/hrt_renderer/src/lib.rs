//! HRT Renderer - CPU ray generation and heuristic shading.
//!
//! Produces the rotating "Hello World" image one pixel at a time. Rays are
//! generated from a pinhole camera, but nothing is intersected: color comes
//! from a screen-space presence mask and a fixed directional light.

mod camera;
mod shading;
mod renderer;
mod bucket;
mod frame_loop;

pub use camera::{Camera, CameraBasis, CameraError};
pub use shading::{shade, in_presence_mask, intensity, light_direction, BLUE, GOLDEN, INTENSITY_FLOOR};
pub use renderer::{
    AnimationState, FrameContext, PixelBuffer, RenderConfig, RendererState,
    color_to_rgba, render_frame, render_pixel, render_serial, ROTATION_DELTA,
};
pub use bucket::{Bucket, BucketResult, generate_buckets, render_bucket, render_frame_parallel, DEFAULT_BUCKET_SIZE};
pub use frame_loop::{FrameLoop, FramePhase, FrameStats, Presenter};

/// Re-export common math types from hrt_math
pub use hrt_math::{Color, Vec3};
