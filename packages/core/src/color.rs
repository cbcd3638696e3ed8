//! Color model for taxonomy colors
//!
//! Converts between `#RRGGBB` strings and HSV for the color picker, and picks a
//! readable foreground color for a given background.

use serde::{Deserialize, Serialize};

/// Returned by [`hex_to_hsv`] when the input is not a `#RRGGBB` string
pub const FALLBACK_HSV: Hsv = Hsv {
    h: 210.0,
    s: 1.0,
    v: 1.0,
};

const BLACK: &str = "#000000";
const WHITE: &str = "#ffffff";

/// Hue (0-360), saturation (0-1), value (0-1)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

/// An 8-bit RGB triple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Letter case used when formatting hex digits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HexCase {
    #[default]
    Lower,
    Upper,
}

impl HexCase {
    /// Upper if the input uses any uppercase hex letter, Lower otherwise
    pub fn detect(hex: &str) -> Self {
        if hex.chars().any(|c| matches!(c, 'A'..='F')) {
            HexCase::Upper
        } else {
            HexCase::Lower
        }
    }
}

impl Rgb {
    pub fn to_hex(self) -> String {
        self.to_hex_with_case(HexCase::Lower)
    }

    pub fn to_hex_with_case(self, case: HexCase) -> String {
        match case {
            HexCase::Lower => format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b),
            HexCase::Upper => format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b),
        }
    }

    /// Perceived luminance normalized to 0-1
    pub fn luminance(self) -> f64 {
        (0.299 * self.r as f64 + 0.587 * self.g as f64 + 0.114 * self.b as f64) / 255.0
    }
}

/// Parse `#RRGGBB` (either case). Anything else is rejected.
pub fn parse_hex(hex: &str) -> Option<Rgb> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some(Rgb {
        r: channel(0)?,
        g: channel(2)?,
        b: channel(4)?,
    })
}

pub fn is_valid_hex(hex: &str) -> bool {
    parse_hex(hex).is_some()
}

/// Convert RGB to HSV
pub fn rgb_to_hsv(rgb: Rgb) -> Hsv {
    let r = rgb.r as f64 / 255.0;
    let g = rgb.g as f64 / 255.0;
    let b = rgb.b as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let h = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * (((g - b) / delta) % 6.0)
    } else if max == g {
        60.0 * (((b - r) / delta) + 2.0)
    } else {
        60.0 * (((r - g) / delta) + 4.0)
    };
    let h = if h < 0.0 { h + 360.0 } else { h };

    let s = if max == 0.0 { 0.0 } else { delta / max };

    Hsv { h, s, v: max }
}

/// Convert HSV to RGB using the six 60-degree hue sectors
pub fn hsv_to_rgb(hsv: Hsv) -> Rgb {
    let h = if hsv.h.is_finite() {
        hsv.h.rem_euclid(360.0)
    } else {
        0.0
    };
    let s = clamp_unit(hsv.s);
    let v = clamp_unit(hsv.v);

    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else if h < 240.0 {
        (0.0, x, c)
    } else if h < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    Rgb {
        r: to_channel(r + m),
        g: to_channel(g + m),
        b: to_channel(b + m),
    }
}

/// Parse `#RRGGBB` into HSV, or [`FALLBACK_HSV`] when malformed
pub fn hex_to_hsv(hex: &str) -> Hsv {
    parse_hex(hex).map(rgb_to_hsv).unwrap_or(FALLBACK_HSV)
}

/// Format HSV as lowercase `#rrggbb`
pub fn hsv_to_hex(hsv: Hsv) -> String {
    hsv_to_rgb(hsv).to_hex()
}

pub fn hsv_to_hex_with_case(hsv: Hsv, case: HexCase) -> String {
    hsv_to_rgb(hsv).to_hex_with_case(case)
}

/// Black text on light backgrounds, white text on dark ones.
///
/// Malformed input is treated as a dark background.
pub fn contrast_color(hex: &str) -> &'static str {
    match parse_hex(hex) {
        Some(rgb) if rgb.luminance() > 0.5 => BLACK,
        _ => WHITE,
    }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

fn to_channel(value: f64) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}
