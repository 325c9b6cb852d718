//! Formatting value types shared by the writer and the reader.

use std::fmt;
use std::str::FromStr;

/// Horizontal alignment of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Alignment {
    /// Leading edge (left in left-to-right text)
    #[default]
    Start,
    Center,
    /// Trailing edge
    End,
    Justify,
}

impl Alignment {
    /// `w:jc` value. `Start` is the paragraph default and is never written.
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "left",
            Self::Center => "center",
            Self::End => "right",
            Self::Justify => "both",
        }
    }

    /// Parse a `w:jc` value, accepting both the transitional and strict spellings.
    pub fn from_xml(s: &str) -> Option<Self> {
        match s {
            "left" | "start" => Some(Self::Start),
            "center" => Some(Self::Center),
            "right" | "end" => Some(Self::End),
            "both" | "distribute" => Some(Self::Justify),
            _ => None,
        }
    }
}

/// 24-bit RGB color.
///
/// ```
/// use docwright::ooxml::docx::format::RgbColor;
///
/// let navy = RgbColor::from_hex("1F3864").unwrap();
/// assert_eq!(navy, RgbColor(0x1F, 0x38, 0x64));
/// assert_eq!(navy.to_hex(), "1F3864");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RgbColor(pub u8, pub u8, pub u8);

impl RgbColor {
    /// Parse six hex digits, with or without a leading `#`.
    pub fn from_hex(hex: &str) -> Result<Self, &'static str> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err("Hex color must be exactly 6 characters");
        }

        let component = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| "Invalid hex digit in color")
        };
        Ok(Self(component(0..2)?, component(2..4)?, component(4..6)?))
    }

    /// Uppercase hex string as written in `w:color/@w:val`.
    pub fn to_hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

impl FromStr for RgbColor {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}

/// Font size in points to OOXML half-points, rounded to nearest.
#[inline]
pub fn pt_to_half_points(size_pt: f64) -> u32 {
    (size_pt * 2.0).round() as u32
}

/// OOXML half-points to a font size in points.
#[inline]
pub fn half_points_to_pt(half_points: u32) -> f64 {
    f64::from(half_points) / 2.0
}
