//! Headless snapshot example.
//!
//! Runs the frame loop without a window and writes a few frames to PNG.

use std::convert::Infallible;
use std::path::PathBuf;

use hrt_renderer::{FrameLoop, PixelBuffer, Presenter, RenderConfig};

/// Keeps only every Nth frame it is handed.
struct EveryNth {
    every: u64,
    seen: u64,
    kept: Vec<(u64, PixelBuffer)>,
}

impl Presenter for EveryNth {
    type Error = Infallible;

    fn present(&mut self, frame: &PixelBuffer) -> Result<(), Infallible> {
        self.seen += 1;
        if self.seen % self.every == 0 {
            self.kept.push((self.seen, frame.clone()));
        }
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    println!("Ray Traced Hello World - Snapshot");
    println!("=================================");

    let config = RenderConfig::default();
    let (width, height) = (config.width, config.height);
    let mut frame_loop = FrameLoop::new(config)?;

    // One full turn is 2π / 0.02 ≈ 314 frames; keep a handful across it
    let total_frames = 320;
    let mut presenter = EveryNth {
        every: 80,
        seen: 0,
        kept: Vec::new(),
    };

    println!("Rendering {} frames at {}x{}...", total_frames, width, height);
    let start = std::time::Instant::now();
    let mut remaining = total_frames;
    let presented = frame_loop.run(&mut presenter, || {
        if remaining == 0 {
            return true;
        }
        remaining -= 1;
        false
    })?;
    let elapsed = start.elapsed();
    println!(
        "Rendered {} frames in {:?} ({:.1} fps)",
        presented,
        elapsed,
        presented as f64 / elapsed.as_secs_f64()
    );

    for (index, frame) in &presenter.kept {
        let path = PathBuf::from(format!("hello_world_{:04}.png", index));
        frame.save(&path)?;
        println!("Saved {}", path.display());
    }

    Ok(())
}
