//! RGB color helpers
//!
//! Biome transitions blend sky/ground colors linearly; scenery shading
//! lightens or darkens a base color. Both operate on plain 8-bit RGB.

use serde::{Deserialize, Serialize};

/// An 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#rrggbb` hex string (leading `#` optional)
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self { r, g, b })
    }

    /// Linear interpolation toward `other`, `t` in [0, 1]
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).floor() as u8;
        Rgb {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
        }
    }

    /// Lighten (positive) or darken (negative) by a per-channel offset
    pub fn shade(self, delta: i16) -> Rgb {
        let adj = |c: u8| (c as i16 + delta).clamp(0, 255) as u8;
        Rgb {
            r: adj(self.r),
            g: adj(self.g),
            b: adj(self.b),
        }
    }

    /// CSS `rgb(r,g,b)` string for the canvas renderer
    pub fn to_css(self) -> String {
        format!("rgb({},{},{})", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        assert_eq!(Rgb::from_hex("#3b2d1d"), Some(Rgb::new(0x3b, 0x2d, 0x1d)));
        assert_eq!(Rgb::from_hex("ffffff"), Some(Rgb::new(255, 255, 255)));
        assert_eq!(Rgb::from_hex("#fff"), None);
        assert_eq!(Rgb::from_hex("#zzzzzz"), None);
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = Rgb::new(0, 100, 200);
        let b = Rgb::new(255, 0, 100);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
    }

    #[test]
    fn test_lerp_midpoint_floors() {
        let a = Rgb::new(0, 0, 0);
        let b = Rgb::new(255, 255, 255);
        let mid = a.lerp(b, 0.5);
        assert_eq!(mid, Rgb::new(127, 127, 127));
    }

    #[test]
    fn test_shade_clamps() {
        assert_eq!(Rgb::new(250, 10, 128).shade(20), Rgb::new(255, 30, 148));
        assert_eq!(Rgb::new(250, 10, 128).shade(-20), Rgb::new(230, 0, 108));
    }
}
