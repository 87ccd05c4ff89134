//! Hex color parsing and blending used to derive brand palettes.
//!
//! Only the strict `#RRGGBB` form is understood. Every operation here is
//! fail-soft: malformed input produces a defined fallback instead of an error.

use std::sync::LazyLock;

use regex::Regex;

pub const HEX_WHITE: &str = "#FFFFFF";
pub const HEX_BLACK: &str = "#000000";

static HEX_COLOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#([0-9A-Fa-f]{6})$").expect("hex color pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Uppercase `#RRGGBB`.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

pub fn is_hex_color(s: &str) -> bool {
    HEX_COLOR_RE.is_match(s)
}

pub fn parse_hex(s: &str) -> Option<Rgb> {
    let caps = HEX_COLOR_RE.captures(s)?;
    let digits = caps.get(1)?.as_str();
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
    Some(Rgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) }
}

fn to_channel(value: f64) -> u8 {
    // round() is half-away-from-zero; clamp keeps the cast in range
    value.round().clamp(0.0, 255.0) as u8
}

/// Blend `color` toward `target` by `ratio` (0 keeps `color`, 1 yields `target`).
///
/// If either side fails to parse, `color` is returned untouched.
pub fn mix(color: &str, target: &str, ratio: f64) -> String {
    let (Some(base), Some(other)) = (parse_hex(color), parse_hex(target)) else {
        return color.to_string();
    };
    let t = clamp_unit(ratio);
    let lerp = |a: u8, b: u8| to_channel(f64::from(a) * (1.0 - t) + f64::from(b) * t);
    Rgb::new(lerp(base.r, other.r), lerp(base.g, other.g), lerp(base.b, other.b)).to_hex()
}

/// CSS `rgba(...)` string for `color` at `alpha`.
pub fn to_rgba(color: &str, alpha: f64) -> String {
    let a = clamp_unit(alpha);
    match parse_hex(color) {
        Some(rgb) => format!("rgba({}, {}, {}, {})", rgb.r, rgb.g, rgb.b, a),
        None => format!("rgba(0,0,0,{a})"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_strict_hex_only() {
        assert_eq!(parse_hex("#ff5722"), Some(Rgb::new(0xFF, 0x57, 0x22)));
        assert_eq!(parse_hex("#1F2937"), Some(Rgb::new(0x1F, 0x29, 0x37)));
        assert_eq!(parse_hex("FF5722"), None);
        assert_eq!(parse_hex("#FFF"), None);
        assert_eq!(parse_hex("#FF57221"), None);
        assert_eq!(parse_hex("#GG5722"), None);
        assert_eq!(parse_hex(" #FF5722"), None);
        assert_eq!(parse_hex(""), None);
    }

    #[test]
    fn hex_output_is_uppercase() {
        assert_eq!(parse_hex("#abcdef").map(Rgb::to_hex).as_deref(), Some("#ABCDEF"));
    }

    #[test]
    fn mix_endpoints_and_midpoint() {
        assert_eq!(mix("#FF5722", HEX_WHITE, 0.0), "#FF5722");
        assert_eq!(mix("#FF5722", HEX_WHITE, 1.0), "#FFFFFF");
        assert_eq!(mix(HEX_BLACK, HEX_WHITE, 0.5), "#808080");
    }

    #[test]
    fn mix_clamps_ratio() {
        assert_eq!(mix("#FF5722", HEX_BLACK, 2.0), "#000000");
        assert_eq!(mix("#FF5722", HEX_BLACK, -1.0), "#FF5722");
        assert_eq!(mix("#FF5722", HEX_BLACK, f64::NAN), "#FF5722");
    }

    #[test]
    fn mix_returns_first_input_when_unparseable() {
        assert_eq!(mix("tomato", HEX_WHITE, 0.5), "tomato");
        assert_eq!(mix("#FF5722", "white", 0.5), "#FF5722");
    }

    #[test]
    fn rgba_formatting() {
        assert_eq!(to_rgba("#FF5722", 0.35), "rgba(255, 87, 34, 0.35)");
        assert_eq!(to_rgba("#FF5722", 3.0), "rgba(255, 87, 34, 1)");
        assert_eq!(to_rgba("nope", 0.5), "rgba(0,0,0,0.5)");
        assert_eq!(to_rgba("nope", -2.0), "rgba(0,0,0,0)");
    }
}
