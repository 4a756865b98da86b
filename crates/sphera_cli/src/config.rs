//! Sphera configuration file handling

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sphera_palette::{
    DisplayToggles, FeedbackTimings, HarmonyConfig, HarmonyEngine, HarmonyScheme, HexColor,
    Palette, PaletteState, DEFAULT_COLORS, DEFAULT_SPREAD,
};
use std::fs;
use std::path::Path;

/// Default config file name
pub const CONFIG_FILE: &str = "sphera.toml";

/// Top-level Sphera configuration (sphera.toml)
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SpheraConfig {
    #[serde(default)]
    pub harmony: HarmonyConfig,
    #[serde(default)]
    pub palette: PaletteConfig,
    #[serde(default)]
    pub display: DisplayToggles,
    #[serde(default)]
    pub feedback: FeedbackTimings,
}

/// Starting palette
#[derive(Debug, Deserialize, Serialize)]
pub struct PaletteConfig {
    #[serde(default = "default_scheme")]
    pub scheme: HarmonyScheme,
    #[serde(default = "default_spread")]
    pub spread: f32,
    #[serde(default = "default_colors")]
    pub colors: Vec<HexColor>,
}

fn default_scheme() -> HarmonyScheme {
    HarmonyScheme::Analogous
}

fn default_spread() -> f32 {
    DEFAULT_SPREAD
}

fn default_colors() -> Vec<HexColor> {
    DEFAULT_COLORS.to_vec()
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            scheme: default_scheme(),
            spread: default_spread(),
            colors: default_colors(),
        }
    }
}

impl SpheraConfig {
    /// Load configuration from a file, or from `sphera.toml` inside a directory
    pub fn load(path: &Path) -> Result<Self> {
        let config_path = if path.is_dir() {
            path.join(CONFIG_FILE)
        } else {
            path.to_path_buf()
        };

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))
    }

    /// Load `path` when given, else `./sphera.toml` when present, else defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None if Path::new(CONFIG_FILE).is_file() => Self::load(Path::new(CONFIG_FILE)),
            None => Ok(Self::default()),
        }
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: SpheraConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    fn validate(&self) -> Result<()> {
        if self.harmony.schemes.is_empty() {
            anyhow::bail!("[harmony] schemes must list at least one scheme");
        }
        if !self.harmony.schemes.contains(&self.palette.scheme) {
            anyhow::bail!(
                "[palette] scheme {:?} is not enabled in [harmony] schemes",
                self.palette.scheme.id()
            );
        }
        if self.palette.colors.is_empty() {
            anyhow::bail!("[palette] colors must not be empty");
        }
        Ok(())
    }

    /// Build the harmony engine described by `[harmony]`
    pub fn engine(&self) -> Result<HarmonyEngine> {
        HarmonyEngine::new(self.harmony.clone()).context("Invalid [harmony] section")
    }

    /// Build a session from this configuration
    pub fn build_state(&self) -> Result<PaletteState> {
        let palette = Palette::from_colors(
            self.palette.scheme,
            self.palette.spread,
            self.palette.colors.clone(),
        )
        .context("Invalid [palette] section")?;

        let state = PaletteState::new(self.engine()?, palette)
            .context("Invalid [palette] scheme")?
            .with_toggles(self.display);
        Ok(state)
    }
}
