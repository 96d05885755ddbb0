use clap::ValueEnum;
use config as config_rs;
use serde::Deserialize;
use std::fmt;
use std::fs;
use thiserror::Error;

/// Source language selected for a transform. One handler per variant,
/// exhaustively matched in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Language {
    Javascript,
    Python,
    Html,
    Css,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Javascript => "javascript",
            Language::Python => "python",
            Language::Html => "html",
            Language::Css => "css",
        }
    }

    /// File extension used when writing transformed output.
    pub fn extension(&self) -> &'static str {
        match self {
            Language::Javascript => "js",
            Language::Python => "py",
            Language::Html => "html",
            Language::Css => "css",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Low,
    Medium,
    High,
}

impl Default for Level {
    fn default() -> Self {
        Level::Medium
    }
}

/// User-selected options controlling which pipeline stages run and at
/// what intensity. Only a subset is meaningful per language: JavaScript
/// consumes everything, Python consumes `compact`/`level`/`string_array`,
/// HTML and CSS consume `compact`/`level`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    pub level: Level,
    pub compact: bool,
    pub string_array: bool,
    pub rotate_string_array: bool,
    pub self_defending: bool,
    pub debug_protection: bool,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            level: Level::Medium,
            compact: true,
            string_array: false,
            rotate_string_array: false,
            self_defending: false,
            debug_protection: false,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("config error: {0}")]
    Config(#[from] config_rs::ConfigError),
}

fn env_override<T: serde::de::DeserializeOwned>(
    env: &config_rs::Config,
    key: &str,
) -> Result<Option<T>, config_rs::ConfigError> {
    match env.get::<T>(key) {
        Ok(value) => Ok(Some(value)),
        Err(config_rs::ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Load a `TransformConfig`, layering an optional JSON preset file with
/// `OBFUSCATOR_*` environment overrides. CLI flags are applied on top by
/// the caller and take precedence.
pub fn load_config(preset: Option<&str>) -> Result<TransformConfig, ConfigError> {
    // Load the preset from a JSON file; fields it omits keep defaults.
    let mut cfg = match preset {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            serde_json::from_str::<TransformConfig>(&content)?
        }
        None => TransformConfig::default(),
    };

    // Environment overrides beat the preset.
    let env = config_rs::Config::builder()
        .add_source(config_rs::Environment::with_prefix("OBFUSCATOR").try_parsing(true))
        .build()?;

    if let Some(level) = env_override(&env, "level")? {
        cfg.level = level;
    }
    if let Some(compact) = env_override(&env, "compact")? {
        cfg.compact = compact;
    }
    if let Some(string_array) = env_override(&env, "string_array")? {
        cfg.string_array = string_array;
    }
    if let Some(rotate) = env_override(&env, "rotate_string_array")? {
        cfg.rotate_string_array = rotate;
    }
    if let Some(self_defending) = env_override(&env, "self_defending")? {
        cfg.self_defending = self_defending;
    }
    if let Some(debug_protection) = env_override(&env, "debug_protection")? {
        cfg.debug_protection = debug_protection;
    }

    Ok(cfg)
}
