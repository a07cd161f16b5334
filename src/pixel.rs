// pixel.rs - 32 位打包像素 (0xAARRGGBB)

/// A packed 32-bit pixel word laid out as `0xAARRGGBB`.
///
/// The word is stored little-endian in pixel buffers, so alpha is the last
/// byte in memory.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Pixel(pub u32);

impl Pixel {
    pub const fn from_argb(alpha: u8, red: u8, green: u8, blue: u8) -> Self {
        Self(((alpha as u32) << 24) | ((red as u32) << 16) | ((green as u32) << 8) | (blue as u32))
    }

    /// Color with alpha 0, which is what the sampler produces.
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::from_argb(0, red, green, blue)
    }

    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn red(self) -> u8 {
        ((self.0 & 0x00ff_0000) >> 16) as u8
    }

    pub const fn green(self) -> u8 {
        ((self.0 & 0x0000_ff00) >> 8) as u8
    }

    pub const fn blue(self) -> u8 {
        (self.0 & 0x0000_00ff) as u8
    }

    pub const fn from_le_bytes(bytes: [u8; 4]) -> Self {
        Self(u32::from_le_bytes(bytes))
    }

    pub const fn to_le_bytes(self) -> [u8; 4] {
        self.0.to_le_bytes()
    }
}
