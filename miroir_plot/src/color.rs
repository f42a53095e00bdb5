/// An RGBA color, each channel in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Color(pub [f32; 4]);

impl Default for Color {
    #[inline]
    fn default() -> Self {
        Self::BLACK
    }
}

impl Color {
    pub const BLACK: Self = Self([0., 0., 0., 1.]);
    pub const WHITE: Self = Self([1., 1., 1., 1.]);
    pub const RED: Self = Self([1., 0., 0., 1.]);
    pub const BLUE: Self = Self([0., 0., 1., 1.]);

    /// The ten-color cycle ("tab10") used to tell rays apart.
    pub const TAB10: [Self; 10] = [
        Self::from_rgb([0x1f, 0x77, 0xb4]),
        Self::from_rgb([0xff, 0x7f, 0x0e]),
        Self::from_rgb([0x2c, 0xa0, 0x2c]),
        Self::from_rgb([0xd6, 0x27, 0x28]),
        Self::from_rgb([0x94, 0x67, 0xbd]),
        Self::from_rgb([0x8c, 0x56, 0x4b]),
        Self::from_rgb([0xe3, 0x77, 0xc2]),
        Self::from_rgb([0x7f, 0x7f, 0x7f]),
        Self::from_rgb([0xbc, 0xbd, 0x22]),
        Self::from_rgb([0x17, 0xbe, 0xcf]),
    ];

    #[inline]
    #[must_use]
    pub const fn from_rgb([r, g, b]: [u8; 3]) -> Self {
        Self([r as f32 / 255., g as f32 / 255., b as f32 / 255., 1.])
    }

    #[inline]
    #[must_use]
    pub const fn with_alpha(self, alpha: f32) -> Self {
        let [r, g, b, _] = self.0;
        Self([r, g, b, alpha])
    }

    #[inline]
    #[must_use]
    pub fn to_rgb8(self) -> [u8; 3] {
        let [r, g, b, _] = self.0;
        [r, g, b].map(|c| (c.clamp(0., 1.) * 255.).round() as u8)
    }

    #[inline]
    #[must_use]
    pub const fn alpha(self) -> f32 {
        self.0[3]
    }
}

impl From<[f32; 4]> for Color {
    #[inline]
    fn from(rgba: [f32; 4]) -> Self {
        Self(rgba)
    }
}

impl From<Color> for [f32; 4] {
    #[inline]
    fn from(Color(rgba): Color) -> Self {
        rgba
    }
}
