use super::Color;

/// Packed 32-bit RGBA color, one byte per channel, red in the high byte.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Rgba(u32);

impl Rgba {
    pub const OFFSET_R: u32 = 24;
    pub const OFFSET_G: u32 = 16;
    pub const OFFSET_B: u32 = 8;
    pub const OFFSET_A: u32 = 0;

    pub const WHITE: Rgba = Rgba(0xffff_ffff);
    pub const BLACK: Rgba = Rgba(0x0000_00ff);

    #[inline]
    pub const fn from_packed(rgba: u32) -> Self {
        Self(rgba)
    }

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(
            (r as u32) << Self::OFFSET_R
                | (g as u32) << Self::OFFSET_G
                | (b as u32) << Self::OFFSET_B
                | (a as u32) << Self::OFFSET_A,
        )
    }

    #[inline]
    pub const fn packed(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn r(self) -> u8 {
        self.channel(Self::OFFSET_R)
    }

    #[inline]
    pub const fn g(self) -> u8 {
        self.channel(Self::OFFSET_G)
    }

    #[inline]
    pub const fn b(self) -> u8 {
        self.channel(Self::OFFSET_B)
    }

    #[inline]
    pub const fn a(self) -> u8 {
        self.channel(Self::OFFSET_A)
    }

    /// Straight (not premultiplied) channels as a `wgpu` clear value.
    ///
    /// A clear replaces the target without blending, so a translucent clear
    /// stores the script's bytes unchanged.
    #[inline]
    pub fn to_wgpu(self) -> wgpu::Color {
        let unit = |v: u8| f64::from(v) / 255.0;
        wgpu::Color {
            r: unit(self.r()),
            g: unit(self.g()),
            b: unit(self.b()),
            a: unit(self.a()),
        }
    }

    #[inline]
    const fn channel(self, offset: u32) -> u8 {
        ((self.0 & (0xff << offset)) >> offset) as u8
    }
}

impl From<Rgba> for Color {
    /// Channels map 1:1 onto `[0, 1]`; no sRGB decoding.
    fn from(c: Rgba) -> Self {
        Color::from_srgb_u8(c.r(), c.g(), c.b(), c.a())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channels_use_fixed_offsets() {
        let c = Rgba::from_packed(0x1122_3344);
        assert_eq!((c.r(), c.g(), c.b(), c.a()), (0x11, 0x22, 0x33, 0x44));
    }

    #[test]
    fn pack_then_unpack_is_identity() {
        let samples = [0u8, 1, 7, 127, 128, 200, 254, 255];
        for &r in &samples {
            for &g in &samples {
                for &b in &samples {
                    for &a in &samples {
                        let c = Rgba::new(r, g, b, a);
                        assert_eq!((c.r(), c.g(), c.b(), c.a()), (r, g, b, a));
                    }
                }
            }
        }
    }

    #[test]
    fn single_channel_does_not_leak() {
        assert_eq!(Rgba::new(0xff, 0, 0, 0).packed(), 0xff00_0000);
        assert_eq!(Rgba::new(0, 0, 0, 0xff).packed(), 0x0000_00ff);
        assert_eq!(Rgba::WHITE, Rgba::new(255, 255, 255, 255));
    }

    #[test]
    fn clear_value_keeps_straight_channels() {
        let c = Rgba::new(255, 0, 0, 128).to_wgpu();
        assert_eq!(c.r, 1.0);
        assert_eq!(c.g, 0.0);
        assert!((c.a - 128.0 / 255.0).abs() < 1e-9);
        assert_eq!(Rgba::BLACK.to_wgpu().a, 1.0);
    }

    #[test]
    fn converts_to_premultiplied_color() {
        let c: Color = Rgba::new(255, 0, 0, 128).into();
        assert!((c.a - 128.0 / 255.0).abs() < 1e-6);
        assert!((c.r - c.a).abs() < 1e-6);
        assert_eq!(c.g, 0.0);
    }
}
