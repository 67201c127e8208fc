//! Configuration management

use crate::application::errors::ConfigError;
use crate::application::messaging::DispatchMode;
use crate::infrastructure::llm::LLMConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub bot: BotConfig,
    pub handlers: HandlersConfig,
    pub adapters: AdaptersConfig,
    pub llm: Option<LLMConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BotConfig {
    pub name: String,
}

/// Handler directory and dispatch settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct HandlersConfig {
    /// Directory scanned for handler libraries
    pub directory: PathBuf,

    /// Load the directory at startup
    pub auto_load: bool,

    /// Seconds between staleness checks of the directory; 0 disables
    pub reload_interval_seconds: u64,

    /// Whether dispatch runs all handlers or stops at the first consumer
    pub dispatch_mode: DispatchMode,

    /// Per-handler invocation timeout in seconds; absent means unbounded
    pub handler_timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct AdaptersConfig {
    pub console: Option<ConsoleConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConsoleConfig {
    pub enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                name: "reflex-bot".to_string(),
            },
            handlers: HandlersConfig {
                directory: PathBuf::from("./handlers"),
                auto_load: true,
                reload_interval_seconds: 5,
                dispatch_mode: DispatchMode::Inclusive,
                handler_timeout_seconds: Some(30),
            },
            adapters: AdaptersConfig {
                console: Some(ConsoleConfig { enabled: true }),
            },
            llm: Some(LLMConfig::default()),
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))
    }

    /// Build a configuration from environment variables alone
    pub fn load_env() -> Self {
        let mut config = Config::default();

        if let Ok(name) = std::env::var("BOT_NAME") {
            config.bot.name = name;
        }

        if let Ok(dir) = std::env::var("HANDLERS_DIR") {
            config.handlers.directory = PathBuf::from(dir);
        }

        config.llm = Some(LLMConfig::from_env());

        config
    }
}
