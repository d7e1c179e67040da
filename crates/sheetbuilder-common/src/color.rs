//! RGB colors: `#rrggbb` hex strings or named presets.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error as _};

use crate::error::BuildError;

/// An opaque RGB color, rendered as `#RRGGBB`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub rgb: u32,
}

impl Color {
    pub const fn from_rgb(rgb: u32) -> Self {
        Self { rgb: rgb & 0x00FF_FFFF }
    }

    pub const fn black() -> Self {
        Self::from_rgb(0x000000)
    }

    pub const fn white() -> Self {
        Self::from_rgb(0xFFFFFF)
    }

    /// Parse `#rrggbb` (or the short `#rgb`) form.
    pub fn from_hex(hex: &str) -> Result<Self, BuildError> {
        let invalid = || BuildError::InvalidColor(hex.to_string());
        let digits = hex.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let rgb = match digits.len() {
            6 => u32::from_str_radix(digits, 16).map_err(|_| invalid())?,
            3 => {
                let expanded: String = digits.chars().flat_map(|c| [c, c]).collect();
                u32::from_str_radix(&expanded, 16).map_err(|_| invalid())?
            }
            _ => return Err(invalid()),
        };
        Ok(Self::from_rgb(rgb))
    }

    /// Look up a named preset. Names are matched exactly (`aliceBlue`).
    pub fn preset(name: &str) -> Option<Self> {
        PRESETS
            .iter()
            .find(|(preset, _)| *preset == name)
            .map(|(_, rgb)| Self::from_rgb(*rgb))
    }

    /// Hex string when it starts with `#`, otherwise a preset name.
    pub fn parse(value: &str) -> Result<Self, BuildError> {
        if value.starts_with('#') {
            Self::from_hex(value)
        } else {
            Self::preset(value).ok_or_else(|| BuildError::UnknownKeyword {
                kind: "Color",
                value: value.to_string(),
            })
        }
    }

    pub fn to_hex(self) -> String {
        format!("#{:06X}", self.rgb)
    }

    pub const fn red(self) -> u8 {
        (self.rgb >> 16) as u8
    }

    pub const fn green(self) -> u8 {
        (self.rgb >> 8) as u8
    }

    pub const fn blue(self) -> u8 {
        self.rgb as u8
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Arguments accepted wherever a color is expected: a [`Color`] or its text form.
pub trait IntoColor {
    fn into_color(self) -> Result<Color, BuildError>;
}

impl IntoColor for Color {
    fn into_color(self) -> Result<Color, BuildError> {
        Ok(self)
    }
}

impl IntoColor for &str {
    fn into_color(self) -> Result<Color, BuildError> {
        Color::parse(self)
    }
}

impl IntoColor for &String {
    fn into_color(self) -> Result<Color, BuildError> {
        Color::parse(self)
    }
}

impl IntoColor for String {
    fn into_color(self) -> Result<Color, BuildError> {
        Color::parse(&self)
    }
}

#[cfg(feature = "serde")]
impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Color::parse(&s).map_err(D::Error::custom)
    }
}

/// Named presets (the CSS/HTML color names, camel-cased).
pub const PRESETS: &[(&str, u32)] = &[
    ("aliceBlue", 0xF0F8FF),
    ("antiqueWhite", 0xFAEBD7),
    ("aqua", 0x00FFFF),
    ("aquamarine", 0x7FFFD4),
    ("azure", 0xF0FFFF),
    ("beige", 0xF5F5DC),
    ("bisque", 0xFFE4C4),
    ("black", 0x000000),
    ("blanchedAlmond", 0xFFEBCD),
    ("blue", 0x0000FF),
    ("blueViolet", 0x8A2BE2),
    ("brown", 0xA52A2A),
    ("burlyWood", 0xDEB887),
    ("cadetBlue", 0x5F9EA0),
    ("chartreuse", 0x7FFF00),
    ("chocolate", 0xD2691E),
    ("coral", 0xFF7F50),
    ("cornflowerBlue", 0x6495ED),
    ("cornsilk", 0xFFF8DC),
    ("crimson", 0xDC143C),
    ("cyan", 0x00FFFF),
    ("darkBlue", 0x00008B),
    ("darkCyan", 0x008B8B),
    ("darkGoldenRod", 0xB8860B),
    ("darkGray", 0xA9A9A9),
    ("darkGreen", 0x006400),
    ("darkKhaki", 0xBDB76B),
    ("darkMagenta", 0x8B008B),
    ("darkOliveGreen", 0x556B2F),
    ("darkOrange", 0xFF8C00),
    ("darkOrchid", 0x9932CC),
    ("darkRed", 0x8B0000),
    ("darkSalmon", 0xE9967A),
    ("darkSeaGreen", 0x8FBC8F),
    ("darkSlateBlue", 0x483D8B),
    ("darkSlateGray", 0x2F4F4F),
    ("darkTurquoise", 0x00CED1),
    ("darkViolet", 0x9400D3),
    ("deepPink", 0xFF1493),
    ("deepSkyBlue", 0x00BFFF),
    ("dimGray", 0x696969),
    ("dodgerBlue", 0x1E90FF),
    ("fireBrick", 0xB22222),
    ("floralWhite", 0xFFFAF0),
    ("forestGreen", 0x228B22),
    ("fuchsia", 0xFF00FF),
    ("gainsboro", 0xDCDCDC),
    ("ghostWhite", 0xF8F8FF),
    ("gold", 0xFFD700),
    ("goldenRod", 0xDAA520),
    ("gray", 0x808080),
    ("green", 0x008000),
    ("greenYellow", 0xADFF2F),
    ("honeyDew", 0xF0FFF0),
    ("hotPink", 0xFF69B4),
    ("indianRed", 0xCD5C5C),
    ("indigo", 0x4B0082),
    ("ivory", 0xFFFFF0),
    ("khaki", 0xF0E68C),
    ("lavender", 0xE6E6FA),
    ("lavenderBlush", 0xFFF0F5),
    ("lawnGreen", 0x7CFC00),
    ("lemonChiffon", 0xFFFACD),
    ("lightBlue", 0xADD8E6),
    ("lightCoral", 0xF08080),
    ("lightCyan", 0xE0FFFF),
    ("lightGoldenRodYellow", 0xFAFAD2),
    ("lightGray", 0xD3D3D3),
    ("lightGreen", 0x90EE90),
    ("lightPink", 0xFFB6C1),
    ("lightSalmon", 0xFFA07A),
    ("lightSeaGreen", 0x20B2AA),
    ("lightSkyBlue", 0x87CEFA),
    ("lightSlateGray", 0x778899),
    ("lightSteelBlue", 0xB0C4DE),
    ("lightYellow", 0xFFFFE0),
    ("lime", 0x00FF00),
    ("limeGreen", 0x32CD32),
    ("linen", 0xFAF0E6),
    ("magenta", 0xFF00FF),
    ("maroon", 0x800000),
    ("mediumAquaMarine", 0x66CDAA),
    ("mediumBlue", 0x0000CD),
    ("mediumOrchid", 0xBA55D3),
    ("mediumPurple", 0x9370DB),
    ("mediumSeaGreen", 0x3CB371),
    ("mediumSlateBlue", 0x7B68EE),
    ("mediumSpringGreen", 0x00FA9A),
    ("mediumTurquoise", 0x48D1CC),
    ("mediumVioletRed", 0xC71585),
    ("midnightBlue", 0x191970),
    ("mintCream", 0xF5FFFA),
    ("mistyRose", 0xFFE4E1),
    ("moccasin", 0xFFE4B5),
    ("navajoWhite", 0xFFDEAD),
    ("navy", 0x000080),
    ("oldLace", 0xFDF5E6),
    ("olive", 0x808000),
    ("oliveDrab", 0x6B8E23),
    ("orange", 0xFFA500),
    ("orangeRed", 0xFF4500),
    ("orchid", 0xDA70D6),
    ("paleGoldenRod", 0xEEE8AA),
    ("paleGreen", 0x98FB98),
    ("paleTurquoise", 0xAFEEEE),
    ("paleVioletRed", 0xDB7093),
    ("papayaWhip", 0xFFEFD5),
    ("peachPuff", 0xFFDAB9),
    ("peru", 0xCD853F),
    ("pink", 0xFFC0CB),
    ("plum", 0xDDA0DD),
    ("powderBlue", 0xB0E0E6),
    ("purple", 0x800080),
    ("red", 0xFF0000),
    ("rosyBrown", 0xBC8F8F),
    ("royalBlue", 0x4169E1),
    ("saddleBrown", 0x8B4513),
    ("salmon", 0xFA8072),
    ("sandyBrown", 0xF4A460),
    ("seaGreen", 0x2E8B57),
    ("seaShell", 0xFFF5EE),
    ("sienna", 0xA0522D),
    ("silver", 0xC0C0C0),
    ("skyBlue", 0x87CEEB),
    ("slateBlue", 0x6A5ACD),
    ("slateGray", 0x708090),
    ("snow", 0xFFFAFA),
    ("springGreen", 0x00FF7F),
    ("steelBlue", 0x4682B4),
    ("tan", 0xD2B48C),
    ("teal", 0x008080),
    ("thistle", 0xD8BFD8),
    ("tomato", 0xFF6347),
    ("turquoise", 0x40E0D0),
    ("violet", 0xEE82EE),
    ("wheat", 0xF5DEB3),
    ("white", 0xFFFFFF),
    ("whiteSmoke", 0xF5F5F5),
    ("yellow", 0xFFFF00),
    ("yellowGreen", 0x9ACD32),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_and_short_hex() {
        assert_eq!(Color::from_hex("#ff0000").unwrap(), Color::from_rgb(0xFF0000));
        assert_eq!(Color::from_hex("#0F0").unwrap(), Color::from_rgb(0x00FF00));
        assert!(Color::from_hex("ff0000").is_err());
        assert!(Color::from_hex("#gg0000").is_err());
        assert!(Color::from_hex("#12345").is_err());
    }

    #[test]
    fn hex_vs_preset_dispatch() {
        assert_eq!(Color::parse("aliceBlue").unwrap().to_hex(), "#F0F8FF");
        assert_eq!(Color::parse("#f0f8ff").unwrap(), Color::preset("aliceBlue").unwrap());
        let err = Color::parse("AliceBlue").unwrap_err();
        assert_eq!(err.to_string(), "Color AliceBlue does not exist");
    }

    #[test]
    fn channels() {
        let c = Color::from_rgb(0x123456);
        assert_eq!((c.red(), c.green(), c.blue()), (0x12, 0x34, 0x56));
    }
}
