//! RGBA colors and the random leaf-fill policy.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (255 = opaque).
    pub a: u8,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Opaque red.
    pub const RED: Self = Self::rgb(255, 0, 0);
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    /// Create an opaque color.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a color with alpha.
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Format as `#RRGGBB` with uppercase hex digits. Alpha is dropped.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Parse `#RRGGBB` or `RRGGBB`.
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
        Some(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Alpha as a fraction in `[0, 1]`.
    #[must_use]
    pub fn opacity(self) -> f32 {
        f32::from(self.a) / 255.0
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Channel-wise random fill range for leaves.
///
/// Each channel is drawn as `(min + uniform(0, max - min)) % 255`, with the
/// upper bound exclusive and a zero-width channel contributing nothing. The
/// `% 255` wraps a channel that reaches 255 back to 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomFill {
    /// Lower bound per channel.
    pub min: Color,
    /// Upper bound per channel.
    pub max: Color,
    /// Whether leaves take a random fill at all.
    pub enabled: bool,
}

impl RandomFill {
    /// Build a range from two colors in any order.
    ///
    /// Randomization is enabled only when the colors differ.
    #[must_use]
    pub fn between(first: Color, second: Color) -> Self {
        Self {
            min: Color::rgb(
                first.r.min(second.r),
                first.g.min(second.g),
                first.b.min(second.b),
            ),
            max: Color::rgb(
                first.r.max(second.r),
                first.g.max(second.g),
                first.b.max(second.b),
            ),
            enabled: first != second,
        }
    }

    /// Draw one fill color.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Color {
        Color::rgb(
            sample_channel(rng, self.min.r, self.max.r),
            sample_channel(rng, self.min.g, self.max.g),
            sample_channel(rng, self.min.b, self.max.b),
        )
    }
}

impl Default for RandomFill {
    fn default() -> Self {
        Self::between(Color::BLACK, Color::BLACK)
    }
}

#[allow(clippy::cast_possible_truncation)]
fn sample_channel<R: Rng>(rng: &mut R, min: u8, max: u8) -> u8 {
    let span = u16::from(max.saturating_sub(min));
    let offset = if span > 0 { rng.random_range(0..span) } else { 0 };
    ((u16::from(min) + offset) % 255) as u8
}
