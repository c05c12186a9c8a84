//! Shirt colors for observers.

use serde::{Deserialize, Serialize};

/// Hue, saturation, value, each in `[0, 1]`
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Hsv {
    pub hue: f32,
    pub saturation: f32,
    pub value: f32,
}

/// Linear RGB in `[0, 1]`
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Hsv {
    pub fn new(hue: f32, saturation: f32, value: f32) -> Self {
        Self {
            hue,
            saturation,
            value,
        }
    }

    /// Convert to RGB. Hue wraps around, so 1.0 is red again.
    pub fn to_rgb(self) -> Rgb {
        let h = self.hue.rem_euclid(1.0) * 6.0;
        let chroma = self.value * self.saturation;
        let x = chroma * (1.0 - ((h % 2.0) - 1.0).abs());
        let m = self.value - chroma;

        let (r, g, b) = match h as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };

        Rgb {
            r: r + m,
            g: g + m,
            b: b + m,
        }
    }
}
