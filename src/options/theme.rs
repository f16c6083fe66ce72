use serde::{Deserialize, Serialize};

use crate::util::color::hex_rgb;

/// A named color scheme for the tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ThemeConfig {
    /// Display name.
    pub name: String,
    /// RGB the foliage blends toward.
    pub foliage: [f32; 3],
    /// RGB of the key light.
    pub light: [f32; 3],
    /// RGB of the backdrop.
    pub background: [f32; 3],
}

impl ThemeConfig {
    fn from_hex(name: &str, foliage: u32, light: u32, background: u32) -> Self {
        Self {
            name: name.to_owned(),
            foliage: hex_rgb(foliage),
            light: hex_rgb(light),
            background: hex_rgb(background),
        }
    }
}

/// Ordered theme table cycled by the next-theme command.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ThemeOptions {
    /// Themes in cycle order. Index 0 is active at startup.
    pub themes: Vec<ThemeConfig>,
}

impl Default for ThemeOptions {
    fn default() -> Self {
        Self {
            themes: vec![
                ThemeConfig::from_hex("Classic", 0x004225, 0xFFD54F, 0x000500),
                ThemeConfig::from_hex("Frozen", 0xA5D6A7, 0xE0F7FA, 0x001133),
                ThemeConfig::from_hex("Cyber", 0xFF00FF, 0x00FFFF, 0x110022),
            ],
        }
    }
}

impl ThemeOptions {
    /// Theme at `index`, wrapping around the table. Falls back to the
    /// built-in classic theme when the table is empty.
    #[must_use]
    pub fn get(&self, index: usize) -> ThemeConfig {
        if self.themes.is_empty() {
            return ThemeConfig::from_hex("Classic", 0x004225, 0xFFD54F, 0x000500);
        }
        self.themes[index % self.themes.len()].clone()
    }

    /// Number of themes in the cycle (at least one).
    #[must_use]
    pub fn len(&self) -> usize {
        self.themes.len().max(1)
    }

    /// Whether the table is empty (the built-in fallback is then used).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }
}
