use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Main configuration structure for ezwrap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub openai: OpenAIConfig,
    pub retry: RetryConfig,
    pub conversation: ConversationConfig,
    pub shortener: ShortenerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIConfig {
    pub api_key: String,
    pub base_url: String,
    /// Model used when the caller does not name one
    pub model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub initial_delay_ms: u64,
    pub backoff_base: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationConfig {
    /// Longest sentence, in characters, that is still sent
    pub max_length: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortenerConfig {
    pub domain: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl Config {
    /// Load configuration from file with environment variable overrides
    /// ALWAYS returns a valid config - never fails
    pub fn load() -> Self {
        let env_paths = ["../.env", ".env"];

        let mut env_loaded = false;
        for path in &env_paths {
            if dotenvy::from_path(path).is_ok() {
                tracing::info!("Loaded .env from: {}", path);
                env_loaded = true;
                break;
            }
        }

        if !env_loaded {
            tracing::warn!("No .env file found - continuing with env vars only");
        }

        let config_path =
            env::var("EZWRAP_CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());

        let mut config = if Path::new(&config_path).exists() {
            match fs::read_to_string(&config_path) {
                Ok(contents) => Self::from_yaml(&contents).unwrap_or_else(|e| {
                    tracing::error!(
                        "Failed to parse config file {}: {} - using defaults",
                        config_path,
                        e
                    );
                    Self::default()
                }),
                Err(e) => {
                    tracing::error!(
                        "Failed to read config file {}: {} - using defaults",
                        config_path,
                        e
                    );
                    Self::default()
                }
            }
        } else {
            tracing::warn!("Config file not found at {} - using defaults", config_path);
            Self::default()
        };

        config.apply_env_overrides();

        if let Err(e) = config.validate() {
            tracing::warn!("Config validation warnings: {} - continuing anyway", e);
        }

        config
    }

    pub fn from_yaml(contents: &str) -> crate::error::Result<Self> {
        let config = serde_yaml::from_str::<Config>(contents)
            .map_err(|e| crate::error::EzError::Config(e.to_string()))?;
        tracing::info!("Loaded configuration from YAML");
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(api_key) = env::var("OPENAI_API_KEY") {
            self.openai.api_key = api_key;
        }
        if let Ok(base_url) = env::var("OPENAI_BASE_URL") {
            self.openai.base_url = base_url;
        }
        if let Ok(model) = env::var("OPENAI_MODEL") {
            self.openai.model = model;
        }

        if let Ok(attempts) = env::var("EZWRAP_RETRY_MAX_ATTEMPTS") {
            if let Ok(n) = attempts.parse() {
                self.retry.max_attempts = n;
            }
        }
        if let Ok(delay) = env::var("EZWRAP_RETRY_INITIAL_DELAY_MS") {
            if let Ok(ms) = delay.parse() {
                self.retry.initial_delay_ms = ms;
            }
        }

        if let Ok(max_length) = env::var("EZWRAP_MAX_LENGTH") {
            if let Ok(n) = max_length.parse() {
                self.conversation.max_length = n;
            }
        }

        if let Ok(domain) = env::var("SHORTENER_DOMAIN") {
            self.shortener.domain = domain;
        }
        if let Ok(username) = env::var("SHORTENER_USERNAME") {
            self.shortener.username = Some(username);
        }
        if let Ok(password) = env::var("SHORTENER_PASSWORD") {
            self.shortener.password = Some(password);
        }
    }

    fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        if self.openai.api_key.is_empty() {
            return Err("OPENAI_API_KEY environment variable must be set".into());
        }
        if self.retry.max_attempts == 0 {
            return Err("Retry max_attempts cannot be 0".into());
        }
        if self.retry.backoff_base <= 0.0 {
            return Err("Retry backoff_base must be positive".into());
        }
        if self.conversation.max_length == 0 {
            return Err("Conversation max_length cannot be 0; every sentence would be dropped".into());
        }
        Ok(())
    }
}

impl RetryConfig {
    pub fn initial_delay(&self) -> Duration {
        Duration::from_millis(self.initial_delay_ms)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay_ms: 1000,
            backoff_base: 2.0,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            openai: OpenAIConfig {
                api_key: String::new(),
                base_url: "https://api.openai.com/v1".to_string(),
                model: "gpt-3.5-turbo".to_string(),
            },
            retry: RetryConfig::default(),
            conversation: ConversationConfig { max_length: 4096 },
            shortener: ShortenerConfig {
                domain: "http://localhost:8080".to_string(),
                username: None,
                password: None,
            },
        }
    }
}
