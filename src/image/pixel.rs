//! Color and normalized pixel types.

/// 24-bit RGB color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Opaque red, the default box outline.
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Builds a gray color with equal channels.
    pub const fn gray(value: u8) -> Self {
        Self::new(value, value, value)
    }

    /// Unpacks a `0x??RRGGBB` value; the top byte is ignored.
    pub const fn from_packed(packed: u32) -> Self {
        Self {
            r: ((packed >> 16) & 0xFF) as u8,
            g: ((packed >> 8) & 0xFF) as u8,
            b: (packed & 0xFF) as u8,
        }
    }

    /// Packs the color as `0x00RRGGBB`.
    pub const fn to_packed(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(c: Rgb) -> Self {
        [c.r, c.g, c.b]
    }
}

/// A sampled pixel with channels normalized to `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pixel {
    pub x: usize,
    pub y: usize,
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Pixel {
    pub fn new(x: usize, y: usize, color: Rgb) -> Self {
        Self {
            x,
            y,
            r: f32::from(color.r) / 255.0,
            g: f32::from(color.g) / 255.0,
            b: f32::from(color.b) / 255.0,
        }
    }

    /// True when every channel differs by at most `threshold`.
    ///
    /// Channels are compared independently; there is no combined distance.
    #[inline]
    pub fn within_threshold(&self, other: &Pixel, threshold: f32) -> bool {
        (self.r - other.r).abs() <= threshold
            && (self.g - other.g).abs() <= threshold
            && (self.b - other.b).abs() <= threshold
    }
}
