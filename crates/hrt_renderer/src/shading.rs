//! Heuristic per-pixel shading.
//!
//! There is no ray/geometry intersection here. The ray direction is spun
//! about Y by the animation angle, lit by a fixed directional light, and
//! tinted golden inside a screen-space window whenever the scene has any
//! markers at all. The scene's shape, position, and depth are never
//! consulted.

use hrt_math::{Color, Vec3, Vec3Ext};

/// Text color inside the presence mask.
pub const GOLDEN: Vec3 = Vec3::new(1.0, 0.8, 0.2);

/// Background color everywhere else.
pub const BLUE: Vec3 = Vec3::new(0.2, 0.6, 1.0);

/// Ambient floor applied regardless of incidence angle.
pub const INTENSITY_FLOOR: f32 = 0.1;

/// Half-extents of the presence mask in rotated-direction space.
const MASK_HALF_X: f32 = 0.5;
const MASK_HALF_Y: f32 = 0.3;

/// Direction towards the light, normalize(1, 1, 1).
#[inline]
pub fn light_direction() -> Vec3 {
    Vec3::ONE.normalize()
}

/// Lambert-style intensity with the ambient floor applied.
#[inline]
pub fn intensity(rotated: Vec3) -> f32 {
    rotated.dot(light_direction()).max(INTENSITY_FLOOR)
}

/// True when a rotated direction falls inside the golden text window.
#[inline]
pub fn in_presence_mask(rotated: Vec3, scene_non_empty: bool) -> bool {
    scene_non_empty && rotated.x.abs() < MASK_HALF_X && rotated.y.abs() < MASK_HALF_Y
}

/// Color seen along `ray_dir` at animation angle `rotation_angle`.
///
/// Pure and total. For unit directions the intensity lies in [0.1, 1.0];
/// alpha is always 1.
pub fn shade(ray_dir: Vec3, rotation_angle: f32, scene_non_empty: bool) -> Color {
    let rotated = ray_dir.rotate_y(rotation_angle);

    let base = if in_presence_mask(rotated, scene_non_empty) {
        GOLDEN
    } else {
        BLUE
    };

    (base * intensity(rotated)).extend(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::TAU;

    fn assert_color_eq(a: Color, b: Color) {
        assert!((a - b).abs().max_element() < 1e-5, "{:?} != {:?}", a, b);
    }

    fn sample_directions() -> Vec<Vec3> {
        let mut dirs = Vec::new();
        for i in -4..=4 {
            for j in -4..=4 {
                for k in [-1.0, -0.3, 0.2, 1.0] {
                    dirs.push(Vec3::new(i as f32 * 0.25, j as f32 * 0.25, k).normalize());
                }
            }
        }
        dirs
    }

    #[test]
    fn test_straight_ahead_with_scene_is_dim_gold() {
        // dot((0,0,-1), light) ~ -0.577, clamped to the floor
        let color = shade(Vec3::NEG_Z, 0.0, true);
        assert_color_eq(color, Color::new(0.1, 0.08, 0.02, 1.0));
    }

    #[test]
    fn test_straight_ahead_without_scene_is_dim_blue() {
        let color = shade(Vec3::NEG_Z, 0.0, false);
        assert_color_eq(color, Color::new(0.02, 0.06, 0.1, 1.0));
    }

    #[test]
    fn test_lit_direction_uses_full_intensity() {
        // Pointing straight at the light gives intensity 1
        let color = shade(light_direction(), 0.0, false);
        assert_color_eq(color, BLUE.extend(1.0));
    }

    #[test]
    fn test_periodic_in_angle() {
        for dir in sample_directions() {
            for theta in [0.0, 0.02, 1.0, 3.0, -2.5] {
                for scene in [true, false] {
                    let a = shade(dir, theta, scene);
                    let b = shade(dir, theta + TAU, scene);
                    // The mask test can flip right on its boundary; skip those
                    let rotated = dir.rotate_y(theta);
                    let near_edge = (rotated.x.abs() - MASK_HALF_X).abs() < 1e-4
                        || (rotated.y.abs() - MASK_HALF_Y).abs() < 1e-4;
                    if !near_edge {
                        assert_color_eq(a, b);
                    }
                }
            }
        }
    }

    #[test]
    fn test_intensity_range_and_floor() {
        for dir in sample_directions() {
            for theta in [0.0, 0.7, 2.0, 4.5] {
                let rotated = dir.rotate_y(theta);
                let i = intensity(rotated);
                assert!(i >= INTENSITY_FLOOR && i <= 1.0 + 1e-5, "intensity {}", i);

                if rotated.dot(light_direction()) < INTENSITY_FLOOR {
                    let base = if in_presence_mask(rotated, true) { GOLDEN } else { BLUE };
                    assert_color_eq(shade(dir, theta, true), (base * INTENSITY_FLOOR).extend(1.0));
                }
            }
        }
    }

    #[test]
    fn test_alpha_always_one() {
        for dir in sample_directions() {
            assert_eq!(shade(dir, 0.3, true).w, 1.0);
            assert_eq!(shade(dir, 0.3, false).w, 1.0);
        }
    }

    #[test]
    fn test_empty_scene_never_golden() {
        for dir in sample_directions() {
            assert!(!in_presence_mask(dir, false));
        }
        assert!(in_presence_mask(Vec3::NEG_Z, true));
        assert!(!in_presence_mask(Vec3::new(0.6, 0.0, -0.8), true));
        assert!(!in_presence_mask(Vec3::new(0.0, 0.31, -0.95), true));
    }

    #[test]
    fn test_rotation_moves_mask() {
        // A ray off to the right falls outside the mask until the text
        // rotates it back towards the center.
        let dir = Vec3::new(0.8, 0.0, -0.6);
        assert!(!in_presence_mask(dir.rotate_y(0.0), true));
        // Rotating by -atan2(0.8, 0.6) brings it to (0, 0, -1)
        let back = -(0.8_f32).atan2(0.6);
        assert!(in_presence_mask(dir.rotate_y(back), true));
    }
}
