//! HRT Core - Procedural scene for the ray traced Hello World demo.
//!
//! This crate provides:
//!
//! - **Glyph table**: the closed set of block letters `H E L O W R D`,
//!   each a fixed list of box descriptors
//! - **Scene**: presence markers laid out from text, rebuilt every frame
//!
//! # Example
//!
//! ```
//! use hrt_core::build_scene;
//!
//! let scene = build_scene();
//! assert!(!scene.is_empty());
//! println!("{} markers", scene.len());
//! ```

pub mod glyph;
pub mod scene;

// Re-export commonly used types
pub use glyph::{BoxDescriptor, Glyph};
pub use scene::{build_scene, PresenceMarker, Scene, SceneError, MARKERS_PER_BOX};
