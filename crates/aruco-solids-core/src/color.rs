//! Part colors carried through assemblies for slicers and viewers.

use serde::{Deserialize, Serialize};

/// Linear RGBA color with components in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// 8-bit RGB triple, alpha dropped.
    pub fn to_rgb8(self) -> [u8; 3] {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b)]
    }

    /// Pack into the 15-bit VisCAM/SolidView STL attribute layout
    /// (`0b1_RRRRR_GGGGG_BBBBB`, high bit marks the color as valid).
    pub fn to_stl_attribute(self) -> u16 {
        let [r, g, b] = self.to_rgb8();
        let five = |v: u8| u16::from(v >> 3);
        0x8000 | (five(r) << 10) | (five(g) << 5) | five(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stl_attribute_packs_five_bits_per_channel() {
        assert_eq!(Rgba::WHITE.to_stl_attribute(), 0xFFFF);
        assert_eq!(Rgba::BLACK.to_stl_attribute(), 0x8000);
        assert_eq!(Rgba::new(1.0, 0.0, 0.0, 1.0).to_stl_attribute(), 0x8000 | (31 << 10));
    }
}
