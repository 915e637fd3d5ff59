//! Camera model and ray generation.

use std::f32::consts::PI;

use hrt_math::{Vec3, Vec3Ext};
use thiserror::Error;

/// Squared sine of the up/view angle below which the two count as parallel.
const PARALLEL_SIN_SQUARED: f32 = 1e-10;

/// Reasons a camera cannot produce an orthonormal basis.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum CameraError {
    #[error("Degenerate camera: up vector {up:?} is parallel to view direction {view:?}")]
    Degenerate { up: Vec3, view: Vec3 },

    #[error("Degenerate camera: eye and look-at are the same point {0:?}")]
    ZeroViewDirection(Vec3),

    #[error("Camera position or orientation is not finite")]
    NonFinite,

    #[error("Vertical field of view {0} rad is outside (0, pi)")]
    InvalidFov(f32),

    #[error("Aspect ratio {0} must be positive and finite")]
    InvalidAspect(f32),
}

/// Fixed viewing parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub lookat: Vec3,
    pub up: Vec3,
    /// Vertical field of view in radians
    pub fovy: f32,
    /// Viewport width / height
    pub aspect: f32,
}

impl Camera {
    /// Create the demo camera: 5 units back on +Z looking at the origin,
    /// 45° vertical field of view, 1024x768 aspect.
    pub fn new() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 5.0),
            lookat: Vec3::ZERO,
            up: Vec3::Y,
            fovy: 45.0_f32.to_radians(),
            aspect: 1024.0 / 768.0,
        }
    }

    /// Set camera position.
    pub fn with_position(mut self, eye: Vec3, lookat: Vec3, up: Vec3) -> Self {
        self.eye = eye;
        self.lookat = lookat;
        self.up = up;
        self
    }

    /// Set vertical field of view (radians).
    pub fn with_fov(mut self, fovy: f32) -> Self {
        self.fovy = fovy;
        self
    }

    /// Set aspect ratio.
    pub fn with_aspect(mut self, aspect: f32) -> Self {
        self.aspect = aspect;
        self
    }

    /// Compute the orthonormal basis and viewport geometry.
    ///
    /// Fails before any normalization when the configuration has no
    /// well-defined basis, so a bad camera never turns into NaN pixels.
    pub fn compute_basis(&self) -> Result<CameraBasis, CameraError> {
        if !(self.fovy > 0.0 && self.fovy < PI) {
            return Err(CameraError::InvalidFov(self.fovy));
        }
        if !(self.aspect > 0.0 && self.aspect.is_finite()) {
            return Err(CameraError::InvalidAspect(self.aspect));
        }
        if !(self.eye.is_finite() && self.lookat.is_finite() && self.up.is_finite()) {
            return Err(CameraError::NonFinite);
        }

        let half_height = (self.fovy / 2.0).tan();
        let half_width = self.aspect * half_height;

        let w = (self.eye - self.lookat)
            .try_unit()
            .ok_or(CameraError::ZeroViewDirection(self.eye))?;

        // Parallel test on unit vectors so the length of `up` does not matter
        let degenerate = CameraError::Degenerate { up: self.up, view: w };
        let up = self.up.try_unit().ok_or(degenerate)?;
        let side = up.cross(w);
        if side.length_squared() <= PARALLEL_SIN_SQUARED {
            return Err(degenerate);
        }
        let u = side.try_unit().ok_or(degenerate)?;
        let v = w.cross(u);

        let horizontal = u * (2.0 * half_width);
        let vertical = v * (2.0 * half_height);
        let lower_left = self.eye - horizontal * 0.5 - vertical * 0.5 - w;

        Ok(CameraBasis {
            eye: self.eye,
            u,
            v,
            w,
            horizontal,
            vertical,
            lower_left,
            half_width,
            half_height,
        })
    }

    /// Unit ray direction through normalized screen coordinate (u, v).
    ///
    /// Recomputes the basis on every call; hot loops should compute the
    /// basis once and use [`CameraBasis::ray_direction`].
    pub fn generate_ray(&self, u: f32, v: f32) -> Result<Vec3, CameraError> {
        Ok(self.compute_basis()?.ray_direction(u, v))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

/// Orthonormal camera frame plus viewport placement.
///
/// Only obtainable from [`Camera::compute_basis`], so holding one means the
/// camera was valid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraBasis {
    eye: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
    lower_left: Vec3,
    half_width: f32,
    half_height: f32,
}

impl CameraBasis {
    /// Unit direction from the eye through viewport point (u, v).
    ///
    /// (0, 0) is the lower-left corner of the viewport, (1, 1) the upper right.
    #[inline]
    pub fn ray_direction(&self, u: f32, v: f32) -> Vec3 {
        (self.lower_left + self.horizontal * u + self.vertical * v - self.eye).normalize()
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    /// Camera right axis.
    pub fn u(&self) -> Vec3 {
        self.u
    }

    /// Camera up axis.
    pub fn v(&self) -> Vec3 {
        self.v
    }

    /// Points from the target back to the eye.
    pub fn w(&self) -> Vec3 {
        self.w
    }

    pub fn horizontal(&self) -> Vec3 {
        self.horizontal
    }

    pub fn vertical(&self) -> Vec3 {
        self.vertical
    }

    pub fn lower_left(&self) -> Vec3 {
        self.lower_left
    }

    pub fn half_width(&self) -> f32 {
        self.half_width
    }

    pub fn half_height(&self) -> f32 {
        self.half_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vec_eq(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-5, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_default_basis() {
        let basis = Camera::new().compute_basis().unwrap();

        assert_vec_eq(basis.w(), Vec3::Z);
        assert_vec_eq(basis.u(), Vec3::X);
        assert_vec_eq(basis.v(), Vec3::Y);
        assert!((basis.half_height() - (22.5_f32).to_radians().tan()).abs() < 1e-6);
        assert!((basis.half_width() - basis.half_height() * 1024.0 / 768.0).abs() < 1e-6);
    }

    #[test]
    fn test_center_ray_points_at_target() {
        let dir = Camera::new().generate_ray(0.5, 0.5).unwrap();
        assert_vec_eq(dir, Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_corner_rays() {
        let basis = Camera::new().compute_basis().unwrap();

        // (0, 0) is lower-left: -x, -y
        let ll = basis.ray_direction(0.0, 0.0);
        assert!(ll.x < 0.0 && ll.y < 0.0 && ll.z < 0.0);

        // (1, 1) is upper-right: +x, +y
        let ur = basis.ray_direction(1.0, 1.0);
        assert!(ur.x > 0.0 && ur.y > 0.0 && ur.z < 0.0);

        // Symmetric about the view axis
        assert_vec_eq(ll, Vec3::new(-ur.x, -ur.y, ur.z));
    }

    #[test]
    fn test_rays_are_unit_length() {
        let cameras = [
            Camera::new(),
            Camera::new().with_position(Vec3::new(3.0, 2.0, 6.0), Vec3::new(0.5, 0.0, 0.0), Vec3::Y),
            Camera::new().with_fov(150.0_f32.to_radians()).with_aspect(0.25),
            Camera::new().with_position(Vec3::new(0.0, -10.0, 0.1), Vec3::ZERO, Vec3::Z),
            Camera::new().with_fov(1.0_f32.to_radians()).with_aspect(16.0),
        ];

        for camera in cameras {
            let basis = camera.compute_basis().unwrap();
            for i in 0..=20 {
                for j in 0..=20 {
                    let u = i as f32 / 20.0;
                    let v = j as f32 / 20.0;
                    let len = basis.ray_direction(u, v).length();
                    assert!((len - 1.0).abs() < 1e-5, "len {} at ({}, {})", len, u, v);
                }
            }
        }
    }

    #[test]
    fn test_up_length_does_not_matter() {
        // A very short up vector is still perpendicular to the view direction
        let short = Camera::new().with_position(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::new(0.0, 1e-7, 0.0));
        let basis = short.compute_basis().unwrap();
        assert_vec_eq(basis.u(), Vec3::X);
        assert_vec_eq(basis.v(), Vec3::Y);
        assert_vec_eq(basis.ray_direction(0.5, 0.5), Vec3::NEG_Z);

        let long = Camera::new().with_position(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::new(0.0, 1e6, 0.0));
        let long_basis = long.compute_basis().unwrap();
        assert_vec_eq(long_basis.u(), basis.u());
        assert_vec_eq(long_basis.v(), basis.v());
    }

    #[test]
    fn test_up_parallel_to_view_is_degenerate() {
        // Looking straight down with +Y up
        let camera = Camera::new().with_position(Vec3::new(0.0, 5.0, 0.0), Vec3::ZERO, Vec3::Y);
        assert!(matches!(
            camera.compute_basis(),
            Err(CameraError::Degenerate { .. })
        ));
        assert!(matches!(
            camera.generate_ray(0.5, 0.5),
            Err(CameraError::Degenerate { .. })
        ));

        // Anti-parallel and scaled up vector too
        let camera = Camera::new().with_position(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::new(0.0, 0.0, -3.0));
        assert!(matches!(
            camera.generate_ray(0.1, 0.9),
            Err(CameraError::Degenerate { .. })
        ));
    }

    #[test]
    fn test_zero_up_is_degenerate() {
        let camera = Camera::new().with_position(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::ZERO);
        assert!(matches!(
            camera.compute_basis(),
            Err(CameraError::Degenerate { .. })
        ));
    }

    #[test]
    fn test_eye_at_target_is_rejected() {
        let camera = Camera::new().with_position(Vec3::ONE, Vec3::ONE, Vec3::Y);
        assert_eq!(
            camera.compute_basis(),
            Err(CameraError::ZeroViewDirection(Vec3::ONE))
        );
    }

    #[test]
    fn test_invalid_lens() {
        assert_eq!(
            Camera::new().with_fov(0.0).compute_basis(),
            Err(CameraError::InvalidFov(0.0))
        );
        assert_eq!(
            Camera::new().with_fov(PI).compute_basis(),
            Err(CameraError::InvalidFov(PI))
        );
        assert_eq!(
            Camera::new().with_aspect(-1.0).compute_basis(),
            Err(CameraError::InvalidAspect(-1.0))
        );
        assert!(matches!(
            Camera::new().with_aspect(f32::NAN).compute_basis(),
            Err(CameraError::InvalidAspect(_))
        ));
    }

    #[test]
    fn test_non_finite_position() {
        let camera = Camera::new().with_position(Vec3::new(f32::INFINITY, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
        assert_eq!(camera.compute_basis(), Err(CameraError::NonFinite));
    }
}
