//! Export configuration
//!
//! Parses the optional `vga.toml` that names input and output directories
//! and tunes the audio pipeline. Every key has a default, so an empty file
//! (or no file at all) converts `images/` and `audio/` into `build/`.
//!
//! ```toml
//! [input]
//! images = "art/sprites"
//! audio = "sfx"
//!
//! [output]
//! dir = "include/generated"
//! unique_guards = true
//!
//! [audio]
//! target_rate = 8000
//! smoothing_window = 3
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use vgakit_shared::VGA_HEADER_FORMAT;

/// Default config file name looked up by the CLI.
pub const DEFAULT_CONFIG_FILE: &str = "vga.toml";

/// Root configuration structure
#[derive(Debug, Default, Deserialize)]
pub struct ExportConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub audio: AudioSettings,
}

/// Source directories. `None` means the default directory, which may be absent.
#[derive(Debug, Default, Deserialize)]
pub struct InputConfig {
    #[serde(default)]
    pub images: Option<PathBuf>,
    #[serde(default)]
    pub audio: Option<PathBuf>,
}

impl InputConfig {
    pub fn images_dir(&self) -> &Path {
        self.images.as_deref().unwrap_or(Path::new("images"))
    }

    pub fn audio_dir(&self) -> &Path {
        self.audio.as_deref().unwrap_or(Path::new("audio"))
    }
}

#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
    /// Give each sound header its own include guard instead of `WAV_DATA_H`
    #[serde(default)]
    pub unique_guards: bool,
}

impl OutputConfig {
    pub fn header_options(&self) -> HeaderOptions {
        HeaderOptions {
            unique_guards: self.unique_guards,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            unique_guards: false,
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("build")
}

/// Knobs that change generated text without changing data.
#[derive(Debug, Clone, Default)]
pub struct HeaderOptions {
    pub unique_guards: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AudioSettings {
    #[serde(default = "default_target_rate")]
    pub target_rate: u32,
    #[serde(default = "default_smoothing_window")]
    pub smoothing_window: usize,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            target_rate: default_target_rate(),
            smoothing_window: default_smoothing_window(),
        }
    }
}

fn default_target_rate() -> u32 {
    VGA_HEADER_FORMAT.target_sample_rate
}

fn default_smoothing_window() -> usize {
    VGA_HEADER_FORMAT.smoothing_window
}

/// Parse a configuration from TOML text.
pub fn parse_config(content: &str) -> Result<ExportConfig> {
    let config: ExportConfig = toml::from_str(content).context("Failed to parse config")?;
    Ok(config)
}

/// Load and parse a configuration file
pub fn load_config(path: &Path) -> Result<ExportConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {:?}", path))?;
    parse_config(&content).with_context(|| format!("Invalid config: {:?}", path))
}

/// Load `path` if given, else `vga.toml` if it exists, else defaults.
pub fn load_config_or_default(path: Option<&Path>) -> Result<ExportConfig> {
    match path {
        Some(path) => load_config(path),
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            load_config(Path::new(DEFAULT_CONFIG_FILE))
        }
        None => Ok(ExportConfig::default()),
    }
}

/// Validate a configuration without building
pub fn validate(config: &ExportConfig) -> Result<()> {
    if config.audio.target_rate == 0 {
        anyhow::bail!("audio.target_rate must be greater than 0");
    }
    let window = config.audio.smoothing_window;
    if window == 0 || window % 2 == 0 {
        anyhow::bail!("audio.smoothing_window must be odd and at least 1 (got {})", window);
    }

    if let Some(dir) = &config.input.images {
        if !dir.is_dir() {
            anyhow::bail!("Image directory not found: {:?}", dir);
        }
    }
    if let Some(dir) = &config.input.audio {
        if !dir.is_dir() {
            anyhow::bail!("Audio directory not found: {:?}", dir);
        }
    }
    Ok(())
}
