//! RGB helpers shared by themes and entity palettes.

use glam::Vec3;

/// Convert a packed `0xRRGGBB` value into linear-ish `[r, g, b]` floats in
/// `[0, 1]`.
#[must_use]
pub fn hex_rgb(hex: u32) -> [f32; 3] {
    let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
    let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
    let b = (hex & 0xFF) as f32 / 255.0;
    [r, g, b]
}

/// [`hex_rgb`] as a [`Vec3`].
#[inline]
#[must_use]
pub fn hex_vec3(hex: u32) -> Vec3 {
    Vec3::from_array(hex_rgb(hex))
}
