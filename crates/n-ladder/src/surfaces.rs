//! Page backgrounds the audit measures against.

use n_color::HexColor;
use serde::{Deserialize, Serialize};

use crate::ladder::Theme;

/// The page background and the raised surface (cards, panels) of one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SurfacePair {
    pub bg: HexColor,
    pub surface: HexColor,
}

impl SurfacePair {
    pub const LIGHT: Self = Self {
        bg: HexColor::from_rgb8(0xF7, 0xF9, 0xFC),
        surface: HexColor::WHITE,
    };

    pub const DARK: Self = Self {
        bg: HexColor::from_rgb8(0x0C, 0x11, 0x16),
        surface: HexColor::from_rgb8(0x0F, 0x14, 0x1A),
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Surfaces {
    pub light: SurfacePair,
    pub dark: SurfacePair,
}

impl Surfaces {
    #[must_use]
    pub const fn for_theme(&self, theme: Theme) -> SurfacePair {
        match theme {
            Theme::Light => self.light,
            Theme::Dark => self.dark,
        }
    }
}

impl Default for Surfaces {
    fn default() -> Self {
        Self { light: SurfacePair::LIGHT, dark: SurfacePair::DARK }
    }
}
