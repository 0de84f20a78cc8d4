//! sRGB hex colors and linear blending between them.
//!
//! Reveal units fade from a muted gray to full contrast; the blend is done
//! per channel in 0-255 space and written back as a `#rrggbb` string.

use std::fmt;

/// An opaque 8-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    /// Pure white.
    pub const WHITE: Self = Self([0xff, 0xff, 0xff]);

    /// Parse `#rgb` or `#rrggbb` (leading `#` optional, case-insensitive).
    #[must_use]
    pub fn parse_hex(s: &str) -> Option<Self> {
        let hex = s.trim().trim_start_matches('#');
        match hex.len() {
            3 => {
                let mut out = [0u8; 3];
                for (slot, c) in out.iter_mut().zip(hex.chars()) {
                    let v = c.to_digit(16)? as u8;
                    *slot = v * 17;
                }
                Some(Self(out))
            }
            6 => {
                let mut out = [0u8; 3];
                for (i, slot) in out.iter_mut().enumerate() {
                    let pair = hex.get(i * 2..i * 2 + 2)?;
                    *slot = u8::from_str_radix(pair, 16).ok()?;
                }
                Some(Self(out))
            }
            _ => None,
        }
    }

    /// Per-channel linear blend; `t` is clamped to [0, 1].
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mut out = [0u8; 3];
        for (i, slot) in out.iter_mut().enumerate() {
            let a = f32::from(self.0[i]);
            let b = f32::from(other.0[i]);
            *slot = (a + (b - a) * t).round() as u8;
        }
        Self(out)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}
