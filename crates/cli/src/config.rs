use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use genai::{OpenRouterClient, DEFAULT_BASE_URL, DEFAULT_MODEL};
use serde::{Deserialize, Serialize};
use wizard::{Locale, OfflineOracle, OpenRouterOracle, ThesisOracle, DEFAULT_MAX_ATTEMPTS};

pub const FORGE_DIR: &str = ".thesis-forge";
pub const CONFIG_FILE: &str = "config.toml";
pub const API_KEY_ENV: &str = "OPENROUTER_API_KEY";

const DEFAULT_TEMPERATURE: f32 = 1.1;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForgeConfig {
    pub provider: ProviderConfig,
    pub wizard: WizardConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: None,
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WizardConfig {
    pub locale: String,
    pub max_generation_attempts: u32,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            locale: "en".to_string(),
            max_generation_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(FORGE_DIR).join(CONFIG_FILE)
}

impl ForgeConfig {
    /// Read the config file, falling back to defaults when it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Invalid config in {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)
            .with_context(|| format!("Failed to write {}", path.display()))
    }

    pub fn locale(&self) -> Locale {
        Locale::new(self.wizard.locale.as_str())
    }

    /// The environment key wins over the one in the file; blank keys count
    /// as absent.
    pub fn resolve_api_key(&self, env_key: Option<String>) -> Option<String> {
        let usable = |key: &String| !key.trim().is_empty();
        env_key
            .filter(usable)
            .or_else(|| self.provider.api_key.clone().filter(usable))
    }

    pub fn build_oracle(&self, offline: bool) -> Box<dyn ThesisOracle> {
        if offline {
            return Box::new(OfflineOracle);
        }
        self.oracle_with_key(self.resolve_api_key(std::env::var(API_KEY_ENV).ok()))
    }

    fn oracle_with_key(&self, api_key: Option<String>) -> Box<dyn ThesisOracle> {
        let Some(key) = api_key else {
            tracing::warn!(
                "{} not set and no api_key configured; using offline sample responses",
                API_KEY_ENV
            );
            return Box::new(OfflineOracle);
        };

        match OpenRouterClient::new(key, self.provider.base_url.clone()) {
            Ok(client) => {
                tracing::info!(
                    model = %self.provider.model,
                    base_url = %self.provider.base_url,
                    "Using chat model"
                );
                Box::new(
                    OpenRouterOracle::new(client, self.provider.model.clone())
                        .with_temperature(self.provider.temperature)
                        .with_max_tokens(self.provider.max_tokens),
                )
            }
            Err(e) => {
                tracing::warn!(error = %e, "Chat client unavailable; using offline sample responses");
                Box::new(OfflineOracle)
            }
        }
    }
}
