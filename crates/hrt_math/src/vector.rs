// Vector utilities for Vec3
//
// glam already covers add/sub/scale/dot/cross/normalize. This adds the two
// operations the camera and shading paths need that glam spells differently.

use glam::Vec3;

/// Extension trait for Vec3
pub trait Vec3Ext {
    /// Rotate about the Y axis by `angle` radians.
    ///
    /// Computes `(x·cosθ − z·sinθ, y, x·sinθ + z·cosθ)`. Note this is the
    /// opposite handedness of `Quat::from_rotation_y`.
    fn rotate_y(self, angle: f32) -> Vec3;

    /// Unit vector in the same direction, or `None` when the length is zero
    /// or not finite.
    fn try_unit(self) -> Option<Vec3>;
}

impl Vec3Ext for Vec3 {
    #[inline]
    fn rotate_y(self, angle: f32) -> Vec3 {
        let (sin, cos) = angle.sin_cos();
        Vec3::new(
            self.x * cos - self.z * sin,
            self.y,
            self.x * sin + self.z * cos,
        )
    }

    #[inline]
    fn try_unit(self) -> Option<Vec3> {
        self.try_normalize()
    }
}
