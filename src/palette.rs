//! Brand palette derivation.
//!
//! A single brand-color field seeds five theming values. The field is a
//! tri-state: never set, explicitly opted out, or a user-entered string.
//! Unset and opted-out both land on the neutral palette; a string that is
//! not a strict `#RRGGBB` color lands on the default brand swatch instead.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use crate::color::{self, HEX_BLACK, HEX_WHITE};

/// Stored in the `brandColor` field when the user explicitly picks "no color".
pub const NO_BRAND_COLOR: &str = "__NO_BRAND_COLOR__";

pub const POPULAR_BRAND_COLORS: [&str; 8] = [
    "#FF5722", "#FB8C00", "#FBC02D", "#8BC34A", "#009688", "#00BCD4", "#3F51B5", "#9C27B0",
];

pub const DEFAULT_BRAND_COLOR: &str = POPULAR_BRAND_COLORS[0];
pub const NEUTRAL_BASE_COLOR: &str = "#1F2937";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BrandColor {
    #[default]
    Unset,
    ExplicitNone,
    Hex(String),
}

impl BrandColor {
    pub fn hex(value: impl Into<String>) -> Self {
        Self::Hex(value.into())
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    /// Whether the form layer would accept this value. An empty string is
    /// accepted as "not picked yet".
    pub fn is_valid(&self) -> bool {
        match self {
            Self::Unset | Self::ExplicitNone => true,
            Self::Hex(s) => s.is_empty() || color::is_hex_color(s),
        }
    }

    fn from_raw(raw: Option<String>) -> Self {
        match raw {
            Some(s) if s == NO_BRAND_COLOR => Self::ExplicitNone,
            Some(s) => Self::Hex(s),
            // JSON null: the field exists but carries no color
            None => Self::ExplicitNone,
        }
    }
}

impl Serialize for BrandColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Unset => serializer.serialize_none(),
            Self::ExplicitNone => serializer.serialize_str(NO_BRAND_COLOR),
            Self::Hex(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for BrandColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // An absent field never reaches here; #[serde(default)] yields Unset.
        Option::<String>::deserialize(deserializer).map(Self::from_raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlendRatios {
    pub light: f64,
    pub lighter: f64,
    pub dark: f64,
    pub shadow_alpha: f64,
}

impl BlendRatios {
    pub const BRANDED: Self = Self { light: 0.35, lighter: 0.55, dark: 0.25, shadow_alpha: 0.35 };
    pub const NEUTRAL: Self = Self { light: 0.35, lighter: 0.65, dark: 0.20, shadow_alpha: 0.22 };
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    pub base: String,
    pub light: String,
    pub lighter: String,
    pub dark: String,
    pub shadow_color: String,
}

impl Palette {
    fn build(base: &str, ratios: BlendRatios) -> Self {
        Self {
            base: base.to_string(),
            light: color::mix(base, HEX_WHITE, ratios.light),
            lighter: color::mix(base, HEX_WHITE, ratios.lighter),
            dark: color::mix(base, HEX_BLACK, ratios.dark),
            shadow_color: color::to_rgba(base, ratios.shadow_alpha),
        }
    }
}

/// Derives a [`Palette`] from a [`BrandColor`]. Holds only immutable
/// configuration, so the same input always produces the same palette.
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteDeriver {
    pub default_brand: String,
    pub neutral_base: String,
    pub branded: BlendRatios,
    pub neutral: BlendRatios,
}

impl Default for PaletteDeriver {
    fn default() -> Self {
        Self {
            default_brand: DEFAULT_BRAND_COLOR.to_string(),
            neutral_base: NEUTRAL_BASE_COLOR.to_string(),
            branded: BlendRatios::BRANDED,
            neutral: BlendRatios::NEUTRAL,
        }
    }
}

impl PaletteDeriver {
    pub fn derive(&self, brand: &BrandColor) -> Palette {
        match brand {
            BrandColor::Unset | BrandColor::ExplicitNone => {
                Palette::build(&self.neutral_base, self.neutral)
            }
            BrandColor::Hex(s) if color::is_hex_color(s) => {
                Palette::build(&s.to_ascii_uppercase(), self.branded)
            }
            BrandColor::Hex(s) => {
                debug!(input = %s, fallback = %self.default_brand, "brand color is not #RRGGBB, using default swatch");
                Palette::build(&self.default_brand, self.branded)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn branded_palette_uses_branded_ratios() {
        let palette = PaletteDeriver::default().derive(&BrandColor::hex("#ff5722"));
        assert_eq!(palette.base, "#FF5722");
        assert_eq!(palette.light, color::mix("#FF5722", HEX_WHITE, 0.35));
        assert_eq!(palette.lighter, color::mix("#FF5722", HEX_WHITE, 0.55));
        assert_eq!(palette.dark, color::mix("#FF5722", HEX_BLACK, 0.25));
        assert_eq!(palette.shadow_color, "rgba(255, 87, 34, 0.35)");
    }

    #[test]
    fn black_brand_blends_exactly() {
        let palette = PaletteDeriver::default().derive(&BrandColor::hex("#000000"));
        // 255 * 0.35 = 89.25, 255 * 0.55 = 140.25
        assert_eq!(palette.light, "#595959");
        assert_eq!(palette.lighter, "#8C8C8C");
        assert_eq!(palette.dark, "#000000");
    }

    #[test]
    fn explicit_none_is_neutral() {
        let palette = PaletteDeriver::default().derive(&BrandColor::ExplicitNone);
        assert_eq!(palette.base, NEUTRAL_BASE_COLOR);
        assert_eq!(palette.lighter, color::mix(NEUTRAL_BASE_COLOR, HEX_WHITE, 0.65));
        assert_eq!(palette.dark, color::mix(NEUTRAL_BASE_COLOR, HEX_BLACK, 0.20));
        assert_eq!(palette.shadow_color, "rgba(31, 41, 55, 0.22)");
    }

    #[test]
    fn unset_matches_explicit_none() {
        let deriver = PaletteDeriver::default();
        assert_eq!(deriver.derive(&BrandColor::Unset), deriver.derive(&BrandColor::ExplicitNone));
    }

    #[test]
    fn garbage_falls_back_to_default_brand_not_neutral() {
        let palette = PaletteDeriver::default().derive(&BrandColor::hex("not-a-color"));
        assert_eq!(palette.base, DEFAULT_BRAND_COLOR);
        assert_ne!(palette.base, NEUTRAL_BASE_COLOR);
        assert_eq!(palette.shadow_color, "rgba(255, 87, 34, 0.35)");
    }

    #[test]
    fn brand_color_json_shapes() {
        #[derive(Deserialize, Serialize)]
        struct Doc {
            #[serde(default, skip_serializing_if = "BrandColor::is_unset")]
            brand: BrandColor,
        }

        let parse = |s: &str| serde_json::from_str::<Doc>(s).unwrap().brand;
        assert_eq!(parse("{}"), BrandColor::Unset);
        assert_eq!(parse(r#"{"brand":null}"#), BrandColor::ExplicitNone);
        assert_eq!(parse(r#"{"brand":"__NO_BRAND_COLOR__"}"#), BrandColor::ExplicitNone);
        assert_eq!(parse(r##"{"brand":"#00BCD4"}"##), BrandColor::hex("#00BCD4"));

        let dump = |b: BrandColor| serde_json::to_string(&Doc { brand: b }).unwrap();
        assert_eq!(dump(BrandColor::Unset), "{}");
        assert_eq!(dump(BrandColor::ExplicitNone), r#"{"brand":"__NO_BRAND_COLOR__"}"#);
    }

    #[test]
    fn validity() {
        assert!(BrandColor::Unset.is_valid());
        assert!(BrandColor::ExplicitNone.is_valid());
        assert!(BrandColor::hex("#abcdef").is_valid());
        assert!(BrandColor::hex("").is_valid());
        assert!(!BrandColor::hex("#abc").is_valid());
        assert!(!BrandColor::hex(" ").is_valid());
    }
}
