//! Configuration layer: typed settings with layered precedence (file → env).

use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "placard";
const ENV_PREFIX: &str = "PLACARD";

const DEFAULT_FONT_REGULAR: &str = "fonts/Circular-Medium.ttf";
const DEFAULT_FONT_BOLD: &str = "fonts/Circular-Bold.ttf";
const DEFAULT_FONT_HEADING: &str = "fonts/Ambit-Bold.otf";
const DEFAULT_BRAND: &str = "thefuture.build";
const DEFAULT_EMOJI_ASSET_BASE: &str = "https://twemoji.maxcdn.com/2/";
const DEFAULT_EMOJI_FOLDER: &str = "svg";
const DEFAULT_EMOJI_EXT: &str = ".svg";

/// Fully-resolved settings after precedence resolution and validation.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub fonts: FontSettings,
    pub card: CardSettings,
    pub logging: LoggingSettings,
}

/// Locations of the three font binaries embedded into rendered documents.
#[derive(Debug, Clone)]
pub struct FontSettings {
    pub regular: PathBuf,
    pub bold: PathBuf,
    pub heading: PathBuf,
}

impl Default for FontSettings {
    fn default() -> Self {
        Self {
            regular: PathBuf::from(DEFAULT_FONT_REGULAR),
            bold: PathBuf::from(DEFAULT_FONT_BOLD),
            heading: PathBuf::from(DEFAULT_FONT_HEADING),
        }
    }
}

/// Card chrome: the footer brand string and the emoji asset location.
#[derive(Debug, Clone)]
pub struct CardSettings {
    pub brand: String,
    pub emoji_asset_base: String,
    pub emoji_folder: String,
    pub emoji_ext: String,
}

impl Default for CardSettings {
    fn default() -> Self {
        Self {
            brand: DEFAULT_BRAND.to_string(),
            emoji_asset_base: DEFAULT_EMOJI_ASSET_BASE.to_string(),
            emoji_folder: DEFAULT_EMOJI_FOLDER.to_string(),
            emoji_ext: DEFAULT_EMOJI_EXT.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: LevelFilter::INFO,
            format: LogFormat::Compact,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings using the configured precedence: built-in defaults, then
/// `config/default.*` and `placard.*` files when present, then an explicit
/// config file when given, then `PLACARD__`-prefixed environment variables.
pub fn load(config_file: Option<&Path>) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = config_file {
        builder = builder.add_source(File::from(path).required(true));
    }

    builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

    let raw: RawSettings = builder.build()?.try_deserialize()?;
    Settings::from_raw(raw)
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    fonts: RawFontSettings,
    card: RawCardSettings,
    logging: RawLoggingSettings,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawFontSettings {
    regular: Option<PathBuf>,
    bold: Option<PathBuf>,
    heading: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawCardSettings {
    brand: Option<String>,
    emoji_asset_base: Option<String>,
    emoji_folder: Option<String>,
    emoji_ext: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        Ok(Self {
            fonts: build_font_settings(raw.fonts),
            card: build_card_settings(raw.card)?,
            logging: build_logging_settings(raw.logging)?,
        })
    }
}

fn build_font_settings(fonts: RawFontSettings) -> FontSettings {
    let defaults = FontSettings::default();
    FontSettings {
        regular: fonts.regular.unwrap_or(defaults.regular),
        bold: fonts.bold.unwrap_or(defaults.bold),
        heading: fonts.heading.unwrap_or(defaults.heading),
    }
}

fn build_card_settings(card: RawCardSettings) -> Result<CardSettings, LoadError> {
    let brand = card.brand.unwrap_or_else(|| DEFAULT_BRAND.to_string());
    if brand.trim().is_empty() {
        return Err(LoadError::invalid("card.brand", "must not be empty"));
    }

    let emoji_asset_base = card
        .emoji_asset_base
        .unwrap_or_else(|| DEFAULT_EMOJI_ASSET_BASE.to_string());
    if !emoji_asset_base.ends_with('/') {
        return Err(LoadError::invalid(
            "card.emoji_asset_base",
            "must end with a trailing slash",
        ));
    }

    let emoji_ext = card.emoji_ext.unwrap_or_else(|| DEFAULT_EMOJI_EXT.to_string());
    if !emoji_ext.starts_with('.') {
        return Err(LoadError::invalid(
            "card.emoji_ext",
            "must start with a dot",
        ));
    }

    Ok(CardSettings {
        brand,
        emoji_asset_base,
        emoji_folder: card
            .emoji_folder
            .unwrap_or_else(|| DEFAULT_EMOJI_FOLDER.to_string()),
        emoji_ext,
    })
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str())
            .map_err(|err| LoadError::invalid("logging.level", err.to_string()))?,
        None => LevelFilter::INFO,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}
