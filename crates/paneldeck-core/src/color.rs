//! Color type and the default swatch palette.
//!
//! Document colors are opaque RGB values that serialize as `"#RRGGBB"`,
//! matching the layout wire format consumed by device-side renderers.

use peniko::Color;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Create a color from its components.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const BLACK: Self = Self::new(0x00, 0x00, 0x00);
    pub const WHITE: Self = Self::new(0xFF, 0xFF, 0xFF);

    /// Parse `#RGB` or `#RRGGBB`, case-insensitive.
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#')?.trim();
        match hex.len() {
            3 => {
                let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
                let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
                let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
                Some(Self::new(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Self::new(r, g, b))
            }
            _ => None,
        }
    }

    /// Format as `#RRGGBB`.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Convert to a peniko color (fully opaque).
    pub fn to_color(self) -> Color {
        Color::from_rgba8(self.r, self.g, self.b, 255)
    }

    /// Pack into the 16-bit RGB565 layout used by small TFT panels.
    pub fn to_rgb565(self) -> u16 {
        (((self.r & 0xF8) as u16) << 8) | (((self.g & 0xFC) as u16) << 3) | ((self.b >> 3) as u16)
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).ok_or_else(|| D::Error::custom(format!("invalid color: {s:?}")))
    }
}

/// A named swatch in the default palette.
#[derive(Debug, Clone, Copy)]
pub struct Swatch {
    pub name: &'static str,
    pub color: Rgb,
}

impl Swatch {
    const fn new(name: &'static str, color: Rgb) -> Self {
        Self { name, color }
    }
}

/// The stock palette offered to hosts for quick-color pickers.
///
/// Classic TNG-era panel hues; the engine itself accepts any RGB value.
pub struct Palette;

impl Palette {
    pub const ORANGE: Rgb = Rgb::new(0xFF, 0x99, 0x00);
    pub const TANGERINE: Rgb = Rgb::new(0xFF, 0x77, 0x00);
    pub const BUTTERSCOTCH: Rgb = Rgb::new(0xFF, 0xCC, 0x66);
    pub const SUNFLOWER: Rgb = Rgb::new(0xFF, 0xCC, 0x00);
    pub const GOLD: Rgb = Rgb::new(0xCC, 0x88, 0x00);
    pub const LAVENDER: Rgb = Rgb::new(0xCC, 0x99, 0xCC);
    pub const VIOLET: Rgb = Rgb::new(0x99, 0x77, 0xAA);
    pub const LILAC: Rgb = Rgb::new(0xCC, 0x66, 0xFF);
    pub const PEACH: Rgb = Rgb::new(0xFF, 0x99, 0x66);
    pub const BLUE: Rgb = Rgb::new(0x99, 0xCC, 0xFF);
    pub const ICE: Rgb = Rgb::new(0xCC, 0xDD, 0xFF);
    pub const SKY: Rgb = Rgb::new(0x66, 0x88, 0xCC);
    pub const RED: Rgb = Rgb::new(0xCC, 0x66, 0x66);
    pub const MARS: Rgb = Rgb::new(0xEE, 0x55, 0x00);
    pub const MAGENTA: Rgb = Rgb::new(0xCC, 0x66, 0x99);
    pub const BEIGE: Rgb = Rgb::new(0xDD, 0xBB, 0xAA);
    pub const GREY: Rgb = Rgb::new(0x99, 0x99, 0x99);
    pub const DARK_GREY: Rgb = Rgb::new(0x33, 0x33, 0x33);

    /// All swatches, in picker order.
    pub fn all() -> &'static [Swatch] {
        SWATCHES
    }

    /// Look up a swatch by display name.
    pub fn by_name(name: &str) -> Option<Rgb> {
        SWATCHES
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
            .map(|s| s.color)
    }
}

const SWATCHES: &[Swatch] = &[
    Swatch::new("Orange", Palette::ORANGE),
    Swatch::new("Tangerine", Palette::TANGERINE),
    Swatch::new("Butterscotch", Palette::BUTTERSCOTCH),
    Swatch::new("Sunflower", Palette::SUNFLOWER),
    Swatch::new("Gold", Palette::GOLD),
    Swatch::new("Peach", Palette::PEACH),
    Swatch::new("Red", Palette::RED),
    Swatch::new("Mars", Palette::MARS),
    Swatch::new("Magenta", Palette::MAGENTA),
    Swatch::new("Lavender", Palette::LAVENDER),
    Swatch::new("Violet", Palette::VIOLET),
    Swatch::new("Lilac", Palette::LILAC),
    Swatch::new("Blue", Palette::BLUE),
    Swatch::new("Ice", Palette::ICE),
    Swatch::new("Sky", Palette::SKY),
    Swatch::new("Beige", Palette::BEIGE),
    Swatch::new("White", Rgb::WHITE),
    Swatch::new("Grey", Palette::GREY),
    Swatch::new("Dark Grey", Palette::DARK_GREY),
    Swatch::new("Black", Rgb::BLACK),
];
