//! Segment colors
//!
//! A participant's color depends only on their name, so it survives pool
//! edits and face rebuilds.

use serde::{Deserialize, Serialize};

/// 8-bit sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }

    /// Linear-ish RGBA floats for vertex colors
    pub fn to_rgba(self, alpha: f32) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            alpha,
        ]
    }

    /// CSS form, e.g. `#A2395B`
    pub fn to_css(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Segment palette (warm magentas through indigo)
pub const SPECTRUM: [Color; 27] = [
    Color::from_hex(0xA2395B),
    Color::from_hex(0xA63552),
    Color::from_hex(0xAA3149),
    Color::from_hex(0xAE2D40),
    Color::from_hex(0xB22937),
    Color::from_hex(0xA23A53),
    Color::from_hex(0x924B6F),
    Color::from_hex(0x825C8B),
    Color::from_hex(0x6F6DA7),
    Color::from_hex(0xA63570),
    Color::from_hex(0xAC2F5A),
    Color::from_hex(0xB22944),
    Color::from_hex(0xB8232E),
    Color::from_hex(0xC11C17),
    Color::from_hex(0xA72A37),
    Color::from_hex(0x8D3857),
    Color::from_hex(0x734677),
    Color::from_hex(0x575597),
    Color::from_hex(0xA6358C),
    Color::from_hex(0xB43B6A),
    Color::from_hex(0xC24148),
    Color::from_hex(0xD04726),
    Color::from_hex(0xDE5003),
    Color::from_hex(0xB84D24),
    Color::from_hex(0x924A45),
    Color::from_hex(0x6C4766),
    Color::from_hex(0x434187),
];

/// Fixed UI colors
pub mod ui {
    use super::Color;

    pub const SEGMENT_BORDER: Color = Color::from_hex(0xFFFFFF);
    pub const RIM: Color = Color::from_hex(0x000000);
    pub const HUB: Color = Color::from_hex(0xFFFFFF);
    pub const NEEDLE: Color = Color::from_hex(0xEF4444);
    pub const NEEDLE_OUTLINE: Color = Color::from_hex(0x000000);
    pub const BACKGROUND: Color = Color::from_hex(0xF9FAFB);
    /// Face drawn when nobody is left in the pool
    pub const EMPTY_FACE: Color = Color::from_hex(0x999999);
}

/// djb2 over the name's characters
pub fn name_hash(name: &str) -> u32 {
    name.chars()
        .fold(5381u32, |acc, c| acc.wrapping_shl(5).wrapping_add(acc).wrapping_add(c as u32))
}

/// Stable palette color for a participant name
pub fn color_for_name(name: &str) -> Color {
    SPECTRUM[name_hash(name) as usize % SPECTRUM.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_is_stable_per_name() {
        assert_eq!(color_for_name("Ana"), color_for_name("Ana"));
        assert_eq!(color_for_name(""), SPECTRUM[5381 % SPECTRUM.len()]);
    }

    #[test]
    fn test_names_spread_over_palette() {
        let names = ["Pablo", "Nathan", "Sofia", "Jenna", "Sam", "Alex", "Maria", "Carlos"];
        let distinct: std::collections::HashSet<_> =
            names.iter().map(|n| color_for_name(n)).collect();
        assert!(distinct.len() > 1);
    }

    #[test]
    fn test_css_and_rgba() {
        let c = Color::from_hex(0xA2395B);
        assert_eq!(c.to_css(), "#A2395B");
        let rgba = c.to_rgba(0.5);
        assert!((rgba[0] - 162.0 / 255.0).abs() < 1e-6);
        assert_eq!(rgba[3], 0.5);
    }
}
