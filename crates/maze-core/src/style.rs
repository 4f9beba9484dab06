//! Visual styling: [`Color`].

/// An RGB colour packed into a `u32` (0x00RRGGBB).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Color(pub u32);

impl Color {
    /// The default / unset colour (0). Back-ends map it to the terminal
    /// default.
    pub const DEFAULT: Self = Self(0);

    pub const WHITE: Self = Self::from_rgb(255, 255, 255);
    pub const BLACK: Self = Self::from_rgb(1, 1, 1);
    pub const GRAY: Self = Self::from_rgb(128, 128, 128);
    pub const GREEN: Self = Self::from_rgb(0, 160, 0);
    pub const RED: Self = Self::from_rgb(220, 0, 0);
    pub const BLUE: Self = Self::from_rgb(0, 0, 230);

    /// Construct from individual RGB components.
    #[inline]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | (b as u32))
    }

    /// Red component.
    #[inline]
    pub const fn r(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    /// Green component.
    #[inline]
    pub const fn g(self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    /// Blue component.
    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 & 0xFF) as u8
    }
}
