//! Brick palettes and scene colors
//!
//! A palette maps the five intensity buckets to fill colors. It can come
//! from a named preset, from the colors carried by the grid itself, or from
//! an explicit list.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::grid::CalendarGrid;

/// Number of intensity buckets (levels 0..=4)
pub const LEVELS: usize = 5;

/// A validated `#rrggbb` color, stored lowercase
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(String);

impl Color {
    /// Parse `#rgb` or `#rrggbb` (leading `#` optional)
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ConfigError::InvalidHex(s.to_string()));
        }
        let expanded = match hex.len() {
            3 => hex.chars().flat_map(|c| [c, c]).collect::<String>(),
            6 => hex.to_string(),
            _ => return Err(ConfigError::InvalidHex(s.to_string())),
        };
        Ok(Self(format!("#{}", expanded.to_ascii_lowercase())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Only for literals known to be valid
    fn known(hex: &'static str) -> Self {
        Self(hex.to_string())
    }
}

impl TryFrom<String> for Color {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.0
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Named palette presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PalettePreset {
    #[default]
    Light,
    Dark,
}

impl PalettePreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            PalettePreset::Light => "light",
            PalettePreset::Dark => "dark",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "light" => Some(PalettePreset::Light),
            "dark" => Some(PalettePreset::Dark),
            _ => None,
        }
    }

    fn level_hex(&self) -> [&'static str; LEVELS] {
        match self {
            PalettePreset::Light => ["#ebedf0", "#9be9a8", "#40c463", "#30a14e", "#216e39"],
            PalettePreset::Dark => ["#161b22", "#0e4429", "#006d32", "#26a641", "#39d353"],
        }
    }
}

/// Fill color per intensity bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub levels: [Color; LEVELS],
}

impl Palette {
    pub fn preset(preset: PalettePreset) -> Self {
        Self {
            levels: preset.level_hex().map(Color::known),
        }
    }

    /// Build from exactly five color strings
    pub fn custom<S: AsRef<str>>(colors: &[S]) -> Result<Self, ConfigError> {
        if colors.len() != LEVELS {
            return Err(ConfigError::PaletteSize(colors.len()));
        }
        let mut levels = Self::preset(PalettePreset::Light).levels;
        for (slot, color) in levels.iter_mut().zip(colors) {
            *slot = Color::parse(color.as_ref())?;
        }
        Ok(Self { levels })
    }

    /// Use the first color the grid reports for each level, falling back to
    /// `fallback` for levels the data never colors
    pub fn derive(grid: &CalendarGrid, fallback: PalettePreset) -> Result<Self, ConfigError> {
        let mut levels: [Option<Color>; LEVELS] = Default::default();
        for cell in grid.cells() {
            let slot = &mut levels[(cell.level as usize).min(LEVELS - 1)];
            if slot.is_none() {
                if let Some(hex) = &cell.color {
                    *slot = Some(Color::parse(hex)?);
                }
            }
        }
        let base = Self::preset(fallback).levels;
        Ok(Self {
            levels: std::array::from_fn(|i| levels[i].clone().unwrap_or_else(|| base[i].clone())),
        })
    }

    /// Color for a bucket; out-of-range buckets use the top level
    pub fn level(&self, bucket: u8) -> &Color {
        &self.levels[(bucket as usize).min(LEVELS - 1)]
    }
}

/// Colors for everything that isn't a brick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Colors {
    pub background: Color,
    pub ball: Color,
    /// Ball fill on frames where a brick breaks
    pub ball_hit: Color,
    pub paddle: Color,
}

impl Colors {
    pub fn for_preset(preset: PalettePreset) -> Self {
        match preset {
            PalettePreset::Light => Self {
                background: Color::known("#ffffff"),
                ball: Color::known("#1f6feb"),
                ball_hit: Color::known("#d29922"),
                paddle: Color::known("#1f6feb"),
            },
            PalettePreset::Dark => Self {
                background: Color::known("#0d1117"),
                ball: Color::known("#58a6ff"),
                ball_hit: Color::known("#e3b341"),
                paddle: Color::known("#58a6ff"),
            },
        }
    }
}

/// Where brick colors come from for a run
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PaletteChoice {
    /// Colors carried by the grid cells
    #[default]
    Derived,
    Preset(PalettePreset),
    Custom(Palette),
}

impl PaletteChoice {
    /// Accepts `derived`, a preset name, or five comma-separated colors
    pub fn from_str(s: &str) -> Result<Self, ConfigError> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("derived") {
            return Ok(PaletteChoice::Derived);
        }
        if let Some(preset) = PalettePreset::from_str(trimmed) {
            return Ok(PaletteChoice::Preset(preset));
        }
        if trimmed.contains(',') {
            let parts: Vec<&str> = trimmed.split(',').collect();
            return Palette::custom(&parts).map(PaletteChoice::Custom);
        }
        Err(ConfigError::UnknownPalette(s.to_string()))
    }

    /// Scene colors follow the preset; derived and custom palettes use light
    pub fn colors(&self) -> Colors {
        match self {
            PaletteChoice::Preset(preset) => Colors::for_preset(*preset),
            _ => Colors::for_preset(PalettePreset::Light),
        }
    }

    pub fn resolve(&self, grid: &CalendarGrid) -> Result<Palette, ConfigError> {
        match self {
            PaletteChoice::Derived => Palette::derive(grid, PalettePreset::Light),
            PaletteChoice::Preset(preset) => Ok(Palette::preset(*preset)),
            PaletteChoice::Custom(palette) => Ok(palette.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Cell;

    #[test]
    fn test_color_parse() {
        assert_eq!(Color::parse("#ABCDEF").unwrap().as_str(), "#abcdef");
        assert_eq!(Color::parse("fa0").unwrap().as_str(), "#ffaa00");
        assert!(Color::parse("#12345").is_err());
        assert!(Color::parse("#zzzzzz").is_err());
    }

    #[test]
    fn test_preset_names() {
        assert_eq!(PalettePreset::from_str("DARK"), Some(PalettePreset::Dark));
        assert_eq!(PalettePreset::from_str("neon"), None);
        assert_eq!(PalettePreset::Light.as_str(), "light");
    }

    #[test]
    fn test_custom_requires_five() {
        assert_eq!(
            Palette::custom(&["#000", "#111"]),
            Err(ConfigError::PaletteSize(2))
        );
        let palette = Palette::custom(&["#000", "#111", "#222", "#333", "#444"]).unwrap();
        assert_eq!(palette.level(4).as_str(), "#444444");
        assert_eq!(palette.level(9).as_str(), "#444444");
    }

    #[test]
    fn test_derive_prefers_grid_colors() {
        let grid = CalendarGrid::from_weeks(vec![vec![
            Some(Cell::new(0, 0).with_color("#eeeeee")),
            Some(Cell::new(2, 5).with_color("#00aa00")),
            Some(Cell::new(2, 7).with_color("#ff0000")),
        ]]);
        let palette = Palette::derive(&grid, PalettePreset::Dark).unwrap();
        assert_eq!(palette.level(0).as_str(), "#eeeeee");
        // First color seen for a level wins
        assert_eq!(palette.level(2).as_str(), "#00aa00");
        // Missing levels fall back to the preset
        assert_eq!(palette.level(4), Palette::preset(PalettePreset::Dark).level(4));
    }

    #[test]
    fn test_choice_parsing() {
        assert_eq!(PaletteChoice::from_str("derived").unwrap(), PaletteChoice::Derived);
        assert_eq!(
            PaletteChoice::from_str("dark").unwrap(),
            PaletteChoice::Preset(PalettePreset::Dark)
        );
        assert!(matches!(
            PaletteChoice::from_str("#000,#111,#222,#333,#444").unwrap(),
            PaletteChoice::Custom(_)
        ));
        assert!(matches!(
            PaletteChoice::from_str("sepia"),
            Err(ConfigError::UnknownPalette(_))
        ));
    }
}
