//! Configuration file handling for asciify.
//!
//! Loads configuration from `<config dir>/asciify/config.toml` or a custom path.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::ascii::constants::{
    DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, DEFAULT_OUTPUT_FILENAME, DEFAULT_TARGET_WIDTH,
    MAX_FONT_SIZE, MAX_TARGET_WIDTH,
};

/// Configuration file structure for asciify.
/// Loaded from the platform config dir (or custom path via --config).
#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub convert: ConvertConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct ConvertConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    /// Custom glyph ramp, darkest first
    #[serde(default)]
    pub ramp: Option<String>,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            ramp: None,
        }
    }
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct RenderConfig {
    /// Explicit font file; skips system font discovery
    #[serde(default)]
    pub font_path: Option<PathBuf>,
    #[serde(default = "default_font_family")]
    pub font_family: String,
    #[serde(default = "default_font_size")]
    pub font_size: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            font_path: None,
            font_family: default_font_family(),
            font_size: default_font_size(),
        }
    }
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct OutputConfig {
    #[serde(default = "default_filename")]
    pub filename: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            filename: default_filename(),
        }
    }
}

fn default_width() -> u32 {
    DEFAULT_TARGET_WIDTH
}

fn default_font_family() -> String {
    DEFAULT_FONT_FAMILY.to_string()
}

fn default_font_size() -> f32 {
    DEFAULT_FONT_SIZE
}

fn default_filename() -> String {
    DEFAULT_OUTPUT_FILENAME.to_string()
}

impl Config {
    /// Load configuration from a file path.
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed or holds
    /// out-of-range values.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::IoError {
                path: path.clone(),
                source: e,
            })?;
            let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.clone(),
                source: e,
            })?;
            config.validate().map_err(|message| ConfigError::InvalidValue {
                path: path.clone(),
                message,
            })?;
            log::debug!("Loaded config from {}", path.display());
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }
}

impl Config {
    /// Check values against the same limits the CLI flags enforce.
    pub fn validate(&self) -> Result<(), String> {
        let width = self.convert.width;
        if !(1..=MAX_TARGET_WIDTH).contains(&width) {
            return Err(format!(
                "convert.width must be between 1 and {}, got {}",
                MAX_TARGET_WIDTH, width
            ));
        }
        if self.convert.ramp.as_deref() == Some("") {
            return Err("convert.ramp must not be empty".to_string());
        }
        let size = self.render.font_size;
        if !(size > 0.0 && size <= MAX_FONT_SIZE) {
            return Err(format!(
                "render.font_size must be in (0, {}], got {}",
                MAX_FONT_SIZE, size
            ));
        }
        Ok(())
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
    InvalidValue {
        path: PathBuf,
        message: String,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError { path, source } => {
                write!(
                    f,
                    "Failed to read config file '{}': {}",
                    path.display(),
                    source
                )
            }
            ConfigError::ParseError { path, source } => {
                write!(
                    f,
                    "Failed to parse config file '{}': {}",
                    path.display(),
                    source
                )
            }
            ConfigError::InvalidValue { path, message } => {
                write!(f, "Invalid config file '{}': {}", path.display(), message)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::IoError { source, .. } => Some(source),
            ConfigError::ParseError { source, .. } => Some(source),
            ConfigError::InvalidValue { .. } => None,
        }
    }
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("asciify").join("config.toml"))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config/asciify/config.toml")
        })
}

/// Contents written by `asciify config init`.
pub const DEFAULT_CONFIG_TOML: &str = r#"# asciify configuration

[convert]
# Width of the ASCII art in characters (height follows the image aspect ratio)
width = 100
# Custom glyph ramp, darkest first (default: built-in 73-glyph ramp)
# ramp = "@%#*+=-:. "

[render]
# Font file used for image output (default: search system fonts)
# font_path = "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf"
# Font family searched for when font_path is not set
font_family = "Menlo"
# Font size in pixels
font_size = 10.0

[output]
# File written for single-image PNG output when --output is not given
filename = "ascii_art.png"
"#;
