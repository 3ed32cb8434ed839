//! Colors and packed-pixel helpers
//!
//! # Pixel format
//!
//! Raster pixels are stored as `0xRRGGBBAA` (red in MSB, alpha in LSB).
//! [`Rgba`] is the unpacked form used by the public API.
//!
//! # HSV
//!
//! [`Hsv`] uses unit ranges for all three channels: `h`, `s` and `v` are in
//! `[0.0, 1.0]`, with `h = 1.0` wrapping to `0.0` (red).

/// Red channel shift
pub const RED_SHIFT: u32 = 24;
/// Green channel shift
pub const GREEN_SHIFT: u32 = 16;
/// Blue channel shift
pub const BLUE_SHIFT: u32 = 8;
/// Alpha channel shift
pub const ALPHA_SHIFT: u32 = 0;

/// RGBA color with 8 bits per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba {
    /// Red component
    pub r: u8,
    /// Green component
    pub g: u8,
    /// Blue component
    pub b: u8,
    /// Alpha component
    pub a: u8,
}

impl Rgba {
    /// Opaque black
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    /// Opaque white
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    /// Fully transparent black
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    /// Create a new RGBA color
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color (alpha = 255)
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Create an opaque gray color
    pub const fn gray(value: u8) -> Self {
        Self::rgb(value, value, value)
    }

    /// Create a color from unit-range float channels, clamping each channel.
    pub fn from_unit(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self::new(unit_to_byte(r), unit_to_byte(g), unit_to_byte(b), unit_to_byte(a))
    }

    /// Unpack a `0xRRGGBBAA` pixel.
    #[inline]
    pub fn from_pixel(pixel: u32) -> Self {
        let (r, g, b, a) = extract_rgba(pixel);
        Self::new(r, g, b, a)
    }

    /// Pack into a `0xRRGGBBAA` pixel.
    #[inline]
    pub fn to_pixel(self) -> u32 {
        compose_rgba(self.r, self.g, self.b, self.a)
    }

    /// Same color with a different alpha.
    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Squared Euclidean distance over the RGB channels (alpha ignored).
    pub fn distance_sq(self, other: Rgba) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }

    /// Linear interpolation towards `other` over the RGB channels.
    ///
    /// `t = 0` returns `self`, `t = 1` returns `other`. Alpha is kept from
    /// `self`.
    pub fn lerp(self, other: Rgba, t: f32) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgba::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            self.a,
        )
    }

    /// Convert to HSV.
    pub fn to_hsv(self) -> Hsv {
        rgb_to_hsv(self.r, self.g, self.b)
    }
}

impl From<u32> for Rgba {
    fn from(pixel: u32) -> Self {
        Rgba::from_pixel(pixel)
    }
}

impl From<Rgba> for u32 {
    fn from(color: Rgba) -> Self {
        color.to_pixel()
    }
}

/// Map a unit-range float to a byte, clamping out-of-range input.
#[inline]
pub fn unit_to_byte(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Extract red component from a 32-bit pixel.
#[inline]
pub fn red(pixel: u32) -> u8 {
    ((pixel >> RED_SHIFT) & 0xff) as u8
}

/// Extract green component from a 32-bit pixel.
#[inline]
pub fn green(pixel: u32) -> u8 {
    ((pixel >> GREEN_SHIFT) & 0xff) as u8
}

/// Extract blue component from a 32-bit pixel.
#[inline]
pub fn blue(pixel: u32) -> u8 {
    ((pixel >> BLUE_SHIFT) & 0xff) as u8
}

/// Extract alpha component from a 32-bit pixel.
#[inline]
pub fn alpha(pixel: u32) -> u8 {
    ((pixel >> ALPHA_SHIFT) & 0xff) as u8
}

/// Compose a 32-bit RGB pixel (alpha = 255).
#[inline]
pub fn compose_rgb(r: u8, g: u8, b: u8) -> u32 {
    compose_rgba(r, g, b, 255)
}

/// Compose a 32-bit RGBA pixel.
#[inline]
pub fn compose_rgba(r: u8, g: u8, b: u8, a: u8) -> u32 {
    ((r as u32) << RED_SHIFT)
        | ((g as u32) << GREEN_SHIFT)
        | ((b as u32) << BLUE_SHIFT)
        | ((a as u32) << ALPHA_SHIFT)
}

/// Extract RGBA values from a 32-bit pixel.
#[inline]
pub fn extract_rgba(pixel: u32) -> (u8, u8, u8, u8) {
    (red(pixel), green(pixel), blue(pixel), alpha(pixel))
}

/// HSV color with unit-range channels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub h: f32,
    pub s: f32,
    pub v: f32,
}

impl Hsv {
    /// Create a new HSV color
    pub fn new(h: f32, s: f32, v: f32) -> Self {
        Self { h, s, v }
    }

    /// Convert to an opaque RGBA color.
    pub fn to_rgba(self) -> Rgba {
        let (r, g, b) = hsv_to_rgb(self);
        Rgba::rgb(r, g, b)
    }
}

/// Convert RGB to HSV.
///
/// Gray inputs (including black and white) return `h = 0`, `s = 0`.
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> Hsv {
    let rf = r as f32 / 255.0;
    let gf = g as f32 / 255.0;
    let bf = b as f32 / 255.0;

    let max = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let delta = max - min;

    if delta <= f32::EPSILON {
        return Hsv::new(0.0, 0.0, max);
    }

    let s = delta / max;
    let sector = if max == rf {
        (gf - bf) / delta
    } else if max == gf {
        2.0 + (bf - rf) / delta
    } else {
        4.0 + (rf - gf) / delta
    };

    let mut h = sector / 6.0;
    if h < 0.0 {
        h += 1.0;
    }
    if h >= 1.0 {
        h -= 1.0;
    }

    Hsv::new(h, s, max)
}

/// Convert HSV to RGB.
///
/// Channels are clamped to `[0, 1]`; hue wraps.
pub fn hsv_to_rgb(hsv: Hsv) -> (u8, u8, u8) {
    let s = hsv.s.clamp(0.0, 1.0);
    let v = hsv.v.clamp(0.0, 1.0);

    if s <= f32::EPSILON {
        let gray = unit_to_byte(v);
        return (gray, gray, gray);
    }

    let h = hsv.h.rem_euclid(1.0) * 6.0;
    let sector = h.floor();
    let f = h - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    let (r, g, b) = match sector as i32 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    (unit_to_byte(r), unit_to_byte(g), unit_to_byte(b))
}
