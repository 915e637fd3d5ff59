//! Frame loop: advance, render, present, repeat.
//!
//! The loop is synchronous. A close signal is only observed between
//! frames, never while a frame is being filled or presented.

use crate::camera::CameraError;
use crate::renderer::{render_frame, PixelBuffer, RenderConfig, RendererState};

/// Consumer of finished frames (window surface, file writer, test sink).
pub trait Presenter {
    type Error;

    /// Display a fully written frame.
    fn present(&mut self, frame: &PixelBuffer) -> Result<(), Self::Error>;
}

/// Where the loop currently is within an iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramePhase {
    Idle,
    Rendering,
    Presenting,
}

/// Drives [`RendererState`] one frame at a time.
#[derive(Debug)]
pub struct FrameLoop {
    state: RendererState,
    phase: FramePhase,
}

impl FrameLoop {
    /// Create a frame loop, validating the camera.
    pub fn new(config: RenderConfig) -> Result<Self, CameraError> {
        Ok(Self::from_state(RendererState::new(config)?))
    }

    pub fn from_state(state: RendererState) -> Self {
        Self {
            state,
            phase: FramePhase::Idle,
        }
    }

    pub fn state(&self) -> &RendererState {
        &self.state
    }

    pub fn phase(&self) -> FramePhase {
        self.phase
    }

    /// Advance the animation and render the next frame.
    pub fn step(&mut self) -> PixelBuffer {
        self.phase = FramePhase::Rendering;
        self.state.advance();
        let frame = render_frame(&self.state);
        self.phase = FramePhase::Idle;

        let anim = self.state.animation();
        log::trace!("Rendered frame {} at angle {:.3}", anim.frame, anim.rotation_angle);
        frame
    }

    /// Render the next frame and hand it to `presenter`.
    pub fn present_next<P: Presenter>(&mut self, presenter: &mut P) -> Result<(), P::Error> {
        let frame = self.step();
        self.phase = FramePhase::Presenting;
        let result = presenter.present(&frame);
        self.phase = FramePhase::Idle;
        result
    }

    /// Run until `should_close` returns true, checked before each frame.
    ///
    /// Returns the number of frames presented. A presenter error stops the
    /// loop immediately.
    pub fn run<P, F>(&mut self, presenter: &mut P, mut should_close: F) -> Result<u64, P::Error>
    where
        P: Presenter,
        F: FnMut() -> bool,
    {
        let mut presented = 0;
        while !should_close() {
            self.present_next(presenter)?;
            presented += 1;
        }
        log::debug!("Frame loop stopped after {} frames", presented);
        Ok(presented)
    }
}

/// Frames-per-second counter averaged over short windows.
#[derive(Debug, Clone, Default)]
pub struct FrameStats {
    /// Most recent average
    pub fps: f32,
    frame_count: u32,
    timer: f32,
}

/// Length of one averaging window in seconds.
const FPS_WINDOW: f32 = 0.5;

impl FrameStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one frame that took `delta_time` seconds.
    ///
    /// Returns true when a new average was computed.
    pub fn update(&mut self, delta_time: f32) -> bool {
        self.frame_count += 1;
        self.timer += delta_time;

        if self.timer >= FPS_WINDOW {
            self.fps = self.frame_count as f32 / self.timer;
            self.frame_count = 0;
            self.timer = 0.0;
            return true;
        }
        false
    }
}
