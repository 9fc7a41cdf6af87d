//! Configuration management with file persistence

use anyhow::{Context, anyhow};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

use crate::generation::DEFAULT_IMAGE_MODEL;

/// Fitroom configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub generation: GenerationSettings,
    pub output: OutputSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationSettings {
    #[serde(skip)]
    pub api_key: Option<String>,
    pub model: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    pub dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            generation: GenerationSettings {
                api_key: None,
                model: DEFAULT_IMAGE_MODEL.to_string(),
                timeout_secs: 120,
            },
            output: OutputSettings {
                dir: ".".to_string(),
            },
        }
    }
}

impl GenerationSettings {
    pub fn resolved_api_key(&self) -> anyhow::Result<Option<String>> {
        self.enforce_env_only()?;

        Ok(env::var("FITROOM_API_KEY")
            .or_else(|_| env::var("GEMINI_API_KEY"))
            .ok())
    }

    pub fn redacted_api_key(&self) -> anyhow::Result<Option<String>> {
        self.resolved_api_key().map(|opt| {
            opt.map(|key| {
                if key.len() <= 4 {
                    "***".to_string()
                } else {
                    let suffix = &key[key.len() - 4..];
                    format!("***{}", suffix)
                }
            })
        })
    }

    pub fn enforce_env_only(&self) -> anyhow::Result<()> {
        if self.api_key.is_some() {
            return Err(anyhow!(
                "API keys must be provided via environment variables, not stored in configuration"
            ));
        }
        Ok(())
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        let dir = if let Ok(custom_dir) = env::var("FITROOM_CONFIG_DIR") {
            PathBuf::from(custom_dir)
        } else {
            dirs::config_dir()
                .ok_or_else(|| anyhow!("Could not determine config directory"))?
                .join("fitroom")
        };
        Ok(dir)
    }

    /// Get the config file path
    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load configuration from file, or create default if it doesn't exist
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            let config: Config = toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            config.validate()?;
            Ok(config)
        } else {
            // Return default config without creating file
            Ok(Config::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> anyhow::Result<()> {
        self.validate()?;

        let dir = Self::config_dir()?;
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;

        let path = Self::config_path()?;
        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        self.generation.enforce_env_only()
    }

    /// Get a configuration value by key
    pub fn get(&self, key: &str) -> anyhow::Result<String> {
        match key {
            "generation.model" => Ok(self.generation.model.clone()),
            "generation.timeout_secs" => Ok(self.generation.timeout_secs.to_string()),

            "output.dir" => Ok(self.output.dir.clone()),

            // API key (special handling - show redacted)
            "generation.api_key" | "api_key" => match self.generation.redacted_api_key()? {
                Some(redacted) => Ok(redacted),
                None => Ok(
                    "(not set - use FITROOM_API_KEY or GEMINI_API_KEY env var)".to_string(),
                ),
            },

            _ => Err(anyhow!(
                "Unknown configuration key: {}. Use `fitroom config list` to see available keys.",
                key
            )),
        }
    }

    /// Set a configuration value by key
    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "generation.model" => {
                if value.trim().is_empty() {
                    return Err(anyhow!("Model identifier must not be empty"));
                }
                self.generation.model = value.to_string();
            }
            "generation.timeout_secs" => {
                self.generation.timeout_secs = value
                    .parse()
                    .with_context(|| format!("Invalid timeout_secs value: {}", value))?;
            }

            "output.dir" => {
                self.output.dir = value.to_string();
            }

            // API key cannot be set via config
            "generation.api_key" | "api_key" => {
                return Err(anyhow!(
                    "API keys cannot be stored in configuration for security. \
                     Set the FITROOM_API_KEY or GEMINI_API_KEY environment variable instead."
                ));
            }

            _ => {
                return Err(anyhow!(
                    "Unknown configuration key: {}. Use `fitroom config list` to see available keys.",
                    key
                ));
            }
        }
        Ok(())
    }

    /// List all configuration keys and their values
    pub fn list(&self) -> anyhow::Result<Vec<(String, String)>> {
        let keys = vec![
            "generation.model",
            "generation.timeout_secs",
            "generation.api_key",
            "output.dir",
        ];

        keys.into_iter()
            .map(|key| {
                let value = self.get(key)?;
                Ok((key.to_string(), value))
            })
            .collect()
    }

    /// Reset configuration to defaults
    pub fn reset() -> anyhow::Result<()> {
        let path = Self::config_path()?;
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove config file: {}", path.display()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.generation.model, DEFAULT_IMAGE_MODEL);
        assert_eq!(config.generation.timeout_secs, 120);
        assert_eq!(config.output.dir, ".");
    }

    #[test]
    fn test_get_set_round_trip() {
        let mut config = Config::default();
        config.set("generation.model", "another-model").unwrap();
        assert_eq!(config.get("generation.model").unwrap(), "another-model");

        config.set("generation.timeout_secs", "30").unwrap();
        assert_eq!(config.get("generation.timeout_secs").unwrap(), "30");
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = Config::default();
        assert!(config.set("generation.timeout_secs", "soon").is_err());
        assert!(config.set("generation.model", "  ").is_err());
        assert!(config.set("nope.nope", "x").is_err());
    }

    #[test]
    fn test_api_key_cannot_be_stored() {
        let mut config = Config::default();
        assert!(config.set("generation.api_key", "sk-123").is_err());

        config.generation.api_key = Some("sk-123".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_list_covers_all_keys() {
        let config = Config::default();
        let listed = config.list().unwrap();
        assert!(listed.iter().any(|(k, _)| k == "generation.model"));
        assert!(listed.iter().any(|(k, _)| k == "output.dir"));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        // SAFETY: no other test in this crate touches FITROOM_CONFIG_DIR
        unsafe { env::set_var("FITROOM_CONFIG_DIR", dir.path()) };

        let mut config = Config::default();
        config.set("generation.model", "saved-model").unwrap();
        config.save().unwrap();

        let loaded = Config::load().unwrap();
        assert_eq!(loaded.generation.model, "saved-model");

        unsafe { env::remove_var("FITROOM_CONFIG_DIR") };
    }

    #[test]
    fn test_toml_round_trip() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.generation.model, config.generation.model);
        // api_key is #[serde(skip)] and never lands on disk
        assert!(!serialized.contains("api_key"));
    }
}
