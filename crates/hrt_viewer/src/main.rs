use anyhow::{Context, Result};
use hrt_renderer::{FrameLoop, FrameStats, RenderConfig};
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};
use std::sync::Arc;
use std::time::Instant;

mod presenter;

use presenter::GpuPresenter;

/// FPS averages between info-level reports (averages are 0.5 s each).
const FPS_REPORT_EVERY: u32 = 4;

/// Application state
struct App {
    window: Option<Arc<Window>>,
    presenter: Option<GpuPresenter>,
    frame_loop: FrameLoop,

    // Frame timing (stats only; animation uses a fixed step)
    stats: FrameStats,
    fps_reports: u32,
    last_frame_time: Instant,

    // Startup failure to hand back to main once the loop exits
    init_error: Option<anyhow::Error>,
}

impl App {
    fn new(frame_loop: FrameLoop) -> Self {
        Self {
            window: None,
            presenter: None,
            frame_loop,
            stats: FrameStats::new(),
            fps_reports: 0,
            last_frame_time: Instant::now(),
            init_error: None,
        }
    }

    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let config = self.frame_loop.state().config();
        let frame_size = (config.width, config.height);

        let window_attrs = Window::default_attributes()
            .with_title("Ray Traced Hello World!")
            .with_inner_size(winit::dpi::PhysicalSize::new(frame_size.0, frame_size.1));

        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .context("Failed to create window")?,
        );

        // Initialize presenter (async in pollster block)
        let presenter = pollster::block_on(GpuPresenter::new(window.clone(), frame_size))
            .context("Failed to initialize graphics context")?;

        window.request_redraw();
        self.window = Some(window);
        self.presenter = Some(presenter);
        self.last_frame_time = Instant::now();
        Ok(())
    }

    fn record_frame_time(&mut self) {
        let now = Instant::now();
        let delta_time = (now - self.last_frame_time).as_secs_f32();
        self.last_frame_time = now;

        if self.stats.update(delta_time) {
            self.fps_reports += 1;
            let anim = self.frame_loop.state().animation();
            if self.fps_reports % FPS_REPORT_EVERY == 0 {
                log::info!("FPS: {:.1} (frame {}, angle {:.2} rad)", self.stats.fps, anim.frame, anim.rotation_angle);
            } else {
                log::debug!("FPS: {:.1}", self.stats.fps);
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            match self.init_window(event_loop) {
                Ok(()) => {
                    log::info!("Ray tracing engine initialized successfully!");
                    log::info!("Controls: Close window to exit");
                }
                Err(e) => {
                    log::error!("{:#}", e);
                    self.init_error = Some(e);
                    event_loop.exit();
                }
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested");
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(presenter) = &mut self.presenter {
                    presenter.resize((physical_size.width, physical_size.height));
                    log::info!("Resized to {}x{}", physical_size.width, physical_size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                self.record_frame_time();

                if let Some(presenter) = &mut self.presenter {
                    if let Err(e) = self.frame_loop.present_next(presenter) {
                        // Check if it's a surface error we can handle
                        if let Some(surface_err) = e.downcast_ref::<wgpu::SurfaceError>() {
                            match surface_err {
                                wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
                                    // Surface lost, reconfigure
                                    presenter.resize(presenter.size);
                                }
                                wgpu::SurfaceError::OutOfMemory => {
                                    log::error!("Out of memory!");
                                    event_loop.exit();
                                }
                                _ => {
                                    log::warn!("Surface error: {:?}", surface_err);
                                }
                            }
                        } else {
                            log::error!("Present error: {:?}", e);
                        }
                    }
                }

                // Request next frame
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Starting Ray Traced Hello World!");

    let frame_loop = FrameLoop::new(RenderConfig::default())?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(frame_loop);

    log::info!("Running event loop");
    event_loop.run_app(&mut app)?;

    if let Some(e) = app.init_error.take() {
        return Err(e);
    }

    let anim = app.frame_loop.state().animation();
    log::info!("Exited after {} frames", anim.frame);
    Ok(())
}
