use glam::Vec4;

/// Linear RGBA color, one f32 per channel.
///
/// Laid out exactly like an `Rgba32Float` texel so pixel buffers can be
/// uploaded without conversion.
pub type Color = Vec4;

/// View a slice of colors as raw bytes for texture upload.
pub fn as_bytes(colors: &[Color]) -> &[u8] {
    bytemuck::cast_slice(colors)
}
