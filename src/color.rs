//! Hex color parsing shared by settings validation and card rendering

use eframe::egui::Color32;

/// Color parsed from `#RRGGBB` or `#AARRGGBB` (the `#` is optional)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexColor {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HexColor {
    pub fn parse(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

        match hex.len() {
            6 => Some(Self {
                a: 0xFF,
                r: byte(0)?,
                g: byte(2)?,
                b: byte(4)?,
            }),
            8 => Some(Self {
                a: byte(0)?,
                r: byte(2)?,
                g: byte(4)?,
                b: byte(6)?,
            }),
            _ => None,
        }
    }

    /// Strict `#RRGGBB`, the form the color picker produces
    pub fn is_rgb_hex(value: &str) -> bool {
        let value = value.trim();
        value.len() == 7 && value.starts_with('#') && Self::parse(value).is_some()
    }

    pub fn from_color32(color: Color32) -> Self {
        let [r, g, b, a] = color.to_srgba_unmultiplied();
        Self { a, r, g, b }
    }

    pub fn to_color32(self) -> Color32 {
        Color32::from_rgba_unmultiplied(self.r, self.g, self.b, self.a)
    }

    /// `#rrggbb` when opaque, `#aarrggbb` otherwise
    pub fn to_hex_string(self) -> String {
        if self.a == 0xFF {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.a, self.r, self.g, self.b)
        }
    }
}

/// Parse `hex`, falling back to `fallback` (which must itself be valid)
pub fn color_or(hex: Option<&str>, fallback: &str) -> Color32 {
    hex.and_then(HexColor::parse)
        .or_else(|| HexColor::parse(fallback))
        .map(HexColor::to_color32)
        .unwrap_or(Color32::BLACK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rgb_and_argb() {
        assert_eq!(
            HexColor::parse("#5eb5b4"),
            Some(HexColor { a: 0xFF, r: 0x5e, g: 0xb5, b: 0xb4 })
        );
        assert_eq!(
            HexColor::parse("7FFF0000"),
            Some(HexColor { a: 0x7F, r: 0xFF, g: 0, b: 0 })
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(HexColor::parse("invalid"), None);
        assert_eq!(HexColor::parse("#12345"), None);
        assert_eq!(HexColor::parse("#gg0000"), None);
        assert_eq!(HexColor::parse("#ééé"), None);
    }

    #[test]
    fn test_is_rgb_hex() {
        assert!(HexColor::is_rgb_hex("#A0b1C2"));
        assert!(!HexColor::is_rgb_hex("A0b1C2"));
        assert!(!HexColor::is_rgb_hex("#FFA0b1C2"));
    }

    #[test]
    fn test_hex_string_roundtrip_through_color32() {
        let color = HexColor::parse("#0a0a0a").unwrap();
        assert_eq!(HexColor::from_color32(color.to_color32()).to_hex_string(), "#0a0a0a");
    }

    #[test]
    fn test_color_or_uses_fallback() {
        assert_eq!(color_or(Some("nope"), "#ffffff"), Color32::WHITE);
        assert_eq!(color_or(None, "#000000"), Color32::from_rgb(0, 0, 0));
    }
}
