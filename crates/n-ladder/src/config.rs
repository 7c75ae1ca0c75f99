//! TOML configuration.
//!
//! ```toml
//! base = "#6D94A2"
//! spacing = "open"        # or a number, e.g. 1.4
//! levels = 5
//!
//! [surfaces.light]
//! bg = "#F7F9FC"
//! surface = "#FFFFFF"
//!
//! [optimizer]
//! target-pass-rate = 0.95
//! strategy = "l-first"
//! mode = "combined"
//!
//! [optimizer.weights]
//! h = 0.6
//! ```
//!
//! Every key is optional.

use std::fs;
use std::path::{Path, PathBuf};

use n_color::HexColor;
use serde::{Deserialize, Serialize};

use crate::optimize::OptimizeOptions;
use crate::spacing::Spacing;
use crate::surfaces::Surfaces;

/// Ladder size used when none is configured.
pub const DEFAULT_LEVELS: usize = 5;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ChromaConfig {
    /// Brand color. Usually given on the command line instead.
    pub base: Option<HexColor>,
    pub spacing: Spacing,
    pub levels: usize,
    pub surfaces: Surfaces,
    pub optimizer: OptimizeOptions,
}

impl Default for ChromaConfig {
    fn default() -> Self {
        Self {
            base: None,
            spacing: Spacing::default(),
            levels: DEFAULT_LEVELS,
            surfaces: Surfaces::default(),
            optimizer: OptimizeOptions::default(),
        }
    }
}

impl ChromaConfig {
    /// Parse a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed TOML, unknown enum
    /// values or invalid hex colors.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Parse`] if its contents are invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&text)
    }
}
