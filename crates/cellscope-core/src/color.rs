//! RGBA color with hex parsing and the dashboard palette.

use serde::{Deserialize, Serialize};

/// RGBA color with values in the range [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red component [0.0, 1.0]
    pub r: f32,
    /// Green component [0.0, 1.0]
    pub g: f32,
    /// Blue component [0.0, 1.0]
    pub b: f32,
    /// Alpha component [0.0, 1.0]
    pub a: f32,
}

impl Color {
    /// Create a new color, clamping values to [0.0, 1.0].
    #[must_use]
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
            a: a.clamp(0.0, 1.0),
        }
    }

    /// Create an opaque color from RGB values.
    #[must_use]
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Opaque color from a packed `0xRRGGBB` literal.
    #[must_use]
    pub const fn from_rgb_u32(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as f32 / 255.0,
            g: ((rgb >> 8) & 0xff) as f32 / 255.0,
            b: (rgb & 0xff) as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Parse a hex color string (`"#10b981"`, `"10b981"` or `"#10b981cc"`).
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid hex color.
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 && hex.len() != 8 {
            return Err(ColorParseError::InvalidLength);
        }
        if !hex.is_ascii() {
            return Err(ColorParseError::InvalidHex);
        }

        let channel = |i: usize| -> Result<f32, ColorParseError> {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map(|v| f32::from(v) / 255.0)
                .map_err(|_| ColorParseError::InvalidHex)
        };

        let alpha = if hex.len() == 8 { channel(6)? } else { 1.0 };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?, alpha))
    }

    /// Convert to `#rrggbb`.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!(
            "#{:02x}{:02x}{:02x}",
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8
        )
    }

    /// Same color with a different alpha.
    #[must_use]
    pub fn with_alpha(&self, a: f32) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Linear interpolation between two colors.
    #[must_use]
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self::new(
            (other.r - self.r).mul_add(t, self.r),
            (other.g - self.g).mul_add(t, self.g),
            (other.b - self.b).mul_add(t, self.b),
            (other.a - self.a).mul_add(t, self.a),
        )
    }

    /// Black color
    pub const BLACK: Self = Self::from_rgb_u32(0x00_0000);
    /// White color
    pub const WHITE: Self = Self::from_rgb_u32(0xff_ffff);
    /// Transparent color
    pub const TRANSPARENT: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Named colors used across the dashboard charts.
pub mod palette {
    use super::Color;

    /// Blue, cold temperatures and the speed series
    pub const BLUE: Color = Color::from_rgb_u32(0x3b_82f6);
    /// Green, SOC series and healthy SOH
    pub const GREEN: Color = Color::from_rgb_u32(0x10_b981);
    /// Amber, SOH series and degraded SOH
    pub const AMBER: Color = Color::from_rgb_u32(0xf5_9e0b);
    /// Orange, hot temperatures
    pub const ORANGE: Color = Color::from_rgb_u32(0xf9_7316);
    /// Red, very hot temperatures and poor SOH
    pub const RED: Color = Color::from_rgb_u32(0xef_4444);
    /// Violet, cumulative distance
    pub const VIOLET: Color = Color::from_rgb_u32(0x8b_5cf6);
    /// Indigo, overview strip line
    pub const INDIGO: Color = Color::from_rgb_u32(0x63_66f1);
    /// Tick label gray
    pub const GRAY_600: Color = Color::from_rgb_u32(0x4b_5563);
    /// Axis title gray
    pub const GRAY_700: Color = Color::from_rgb_u32(0x37_4151);
    /// Value label / tooltip ink
    pub const GRAY_800: Color = Color::from_rgb_u32(0x1f_2937);
    /// Overview strip background
    pub const GRAY_100: Color = Color::from_rgb_u32(0xf3_f4f6);
    /// Placeholder text
    pub const GRAY_500: Color = Color::from_rgb_u32(0x6b_7280);
}

/// Error type for color parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    /// Invalid hex characters
    InvalidHex,
    /// Invalid string length
    InvalidLength,
}

impl std::fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidHex => write!(f, "invalid hex characters"),
            Self::InvalidLength => write!(f, "invalid hex string length (expected 6 or 8)"),
        }
    }
}

impl std::error::Error for ColorParseError {}
