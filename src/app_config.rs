use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::Path;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language code (e.g., "de"); None lets the provider auto-detect
    #[serde(default)]
    pub source_language: Option<String>,

    /// Target language code (e.g., "fr")
    pub target_language: String,

    /// Translation provider config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Number of lines sent to the provider per batch request
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Text encoding of input and output files
    #[serde(default)]
    pub encoding: FileEncoding,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Text encoding of the dialogue files
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FileEncoding {
    /// Plain UTF-8
    Utf8,
    /// UTF-16 little endian with BOM, the encoding game dialogue files ship with
    #[default]
    #[serde(rename = "utf16le")]
    Utf16Le,
}

impl std::fmt::Display for FileEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Utf8 => write!(f, "utf8"),
            Self::Utf16Le => write!(f, "utf16le"),
        }
    }
}

impl std::str::FromStr for FileEncoding {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().replace('-', "").as_str() {
            "utf8" => Ok(Self::Utf8),
            "utf16le" | "utf16" => Ok(Self::Utf16Le),
            _ => Err(anyhow!("Invalid encoding: {}", s)),
        }
    }
}

/// Formality preference passed to the provider
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Formality {
    /// Provider default register
    DefaultTone,
    /// Formal register, fails for unsupported target languages
    More,
    /// Informal register, fails for unsupported target languages
    Less,
    /// Formal register where the target language supports it
    PreferMore,
    /// Informal register where the target language supports it
    #[default]
    PreferLess,
}

impl Formality {
    /// Wire value expected by the DeepL API
    pub fn as_api_value(&self) -> &'static str {
        match self {
            Self::DefaultTone => "default",
            Self::More => "more",
            Self::Less => "less",
            Self::PreferMore => "prefer_more",
            Self::PreferLess => "prefer_less",
        }
    }
}

/// Translation provider configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// API key for the service
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Service endpoint URL (empty selects the endpoint matching the key)
    #[serde(default = "String::new")]
    pub endpoint: String,

    /// Formality preference for translated text
    #[serde(default)]
    pub formality: Formality,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: String::new(),
            formality: Formality::default(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_chunk_size() -> usize {
    20
}

fn default_timeout_secs() -> u64 {
    30
}

impl Config {
    /// Load a configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| anyhow!("Failed to open config file {:?}: {}", path.as_ref(), e))?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {:?}: {}", path.as_ref(), e))?;
        Ok(config)
    }

    /// Save the configuration as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)
            .map_err(|e| anyhow!("Failed to write config file {:?}: {}", path.as_ref(), e))?;
        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.target_language.trim().is_empty() {
            return Err(anyhow!("Target language is required"));
        }

        if let Some(source) = &self.source_language {
            if source.trim().is_empty() {
                return Err(anyhow!("Source language must not be blank; omit it for auto-detection"));
            }
        }

        if self.translation.api_key.is_empty() {
            return Err(anyhow!("Translation API key is required"));
        }

        if self.chunk_size == 0 {
            return Err(anyhow!("Chunk size must be at least 1"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: None,
            target_language: "fr".to_string(),
            translation: TranslationConfig::default(),
            chunk_size: default_chunk_size(),
            encoding: FileEncoding::default(),
            log_level: LogLevel::default(),
        }
    }
}
