//! Configuration management for the ATS scorer

use crate::error::{AtsScorerError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    /// Uploads above this size are rejected before extraction
    pub max_file_size_bytes: u64,
    /// Extracted text shorter than this (in characters) never reaches the scorer
    pub min_text_chars: usize,
    pub allowed_extensions: Vec<String>,
}

impl InputConfig {
    pub fn is_extension_allowed(&self, ext: &str) -> bool {
        self.allowed_extensions
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(ext.trim_start_matches('.')))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
    pub pretty_json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Html,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: InputConfig {
                max_file_size_bytes: 5 * 1024 * 1024,
                min_text_chars: 50,
                allowed_extensions: vec!["pdf".to_string(), "docx".to_string()],
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
                pretty_json: true,
            },
        }
    }
}

impl Config {
    /// Load the user configuration, writing the defaults on first run
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            AtsScorerError::Configuration(format!(
                "Failed to parse config '{}': {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            AtsScorerError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("ats-scorer")
            .join("config.toml")
    }

    fn validate(&self) -> Result<()> {
        if self.input.max_file_size_bytes == 0 {
            return Err(AtsScorerError::Configuration(
                "input.max_file_size_bytes must be greater than zero".to_string(),
            ));
        }
        if self.input.allowed_extensions.is_empty() {
            return Err(AtsScorerError::Configuration(
                "input.allowed_extensions must name at least one extension".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_limits() {
        let config = Config::default();
        assert_eq!(config.input.max_file_size_bytes, 5_242_880);
        assert_eq!(config.input.min_text_chars, 50);
        assert!(config.input.is_extension_allowed("PDF"));
        assert!(config.input.is_extension_allowed(".docx"));
        assert!(!config.input.is_extension_allowed("doc"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.output.format = OutputFormat::Markdown;
        config.input.min_text_chars = 120;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_rejects_empty_extension_list() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.input.allowed_extensions.clear();
        config.save_to(&path).unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, AtsScorerError::Configuration(_)));
    }

    #[test]
    fn test_malformed_toml_is_configuration_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "input = 42").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(AtsScorerError::Configuration(_))
        ));
    }
}
