//! Tile colours

use std::fmt;

use serde::{Deserialize, Serialize};

/// Channel levels of the web-safe palette
const LEVELS: [u8; 6] = [0x00, 0x33, 0x66, 0x99, 0xcc, 0xff];

/// An sRGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0x00, 0x00, 0x00);
    pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Perceived brightness in [0, 1]
    pub fn luminance(&self) -> f32 {
        (0.299 * self.r as f32 + 0.587 * self.g as f32 + 0.114 * self.b as f32) / 255.0
    }

    /// Readable text colour on top of this one
    pub fn contrast(&self) -> Rgb {
        if self.luminance() > 0.5 {
            Rgb::BLACK
        } else {
            Rgb::WHITE
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// The 216 web-safe colours, red-major order
pub fn web_safe_palette() -> Vec<Rgb> {
    let mut colors = Vec::with_capacity(LEVELS.len().pow(3));
    for &r in &LEVELS {
        for &g in &LEVELS {
            for &b in &LEVELS {
                colors.push(Rgb::new(r, g, b));
            }
        }
    }
    colors
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_palette_size_and_uniqueness() {
        let palette = web_safe_palette();
        assert_eq!(palette.len(), 216);
        let unique: HashSet<_> = palette.iter().collect();
        assert_eq!(unique.len(), 216);
        assert_eq!(palette[0], Rgb::BLACK);
        assert_eq!(palette[215], Rgb::WHITE);
    }

    #[test]
    fn test_contrast() {
        assert_eq!(Rgb::WHITE.contrast(), Rgb::BLACK);
        assert_eq!(Rgb::BLACK.contrast(), Rgb::WHITE);
        assert_eq!(Rgb::new(0xff, 0xff, 0x00).contrast(), Rgb::BLACK);
        assert_eq!(Rgb::new(0x00, 0x00, 0xff).contrast(), Rgb::WHITE);
    }

    #[test]
    fn test_display_hex() {
        assert_eq!(Rgb::new(0x33, 0xcc, 0x0f).to_string(), "#33cc0f");
    }
}
