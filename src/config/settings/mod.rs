
use std::env;

use thiserror::Error;
use url::Url;

pub const SUPABASE_PROJECT_URL_VAR: &str = "SUPABASE_PROJECT_URL";
pub const SUPABASE_PRIVATE_KEY_VAR: &str = "SUPABASE_PRIVATE_KEY";

const DEFAULT_EMBEDDING_MODEL: &str = "all-minilm:latest";
const DEFAULT_GENERATION_MODEL: &str = "smollm:135m-base-v0.2-q3_K_S";
const DEFAULT_DOCUMENTS_TABLE: &str = "documents";
const DEFAULT_MATCH_FUNCTION: &str = "match_documents";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub ollama: OllamaConfig,
    pub supabase: SupabaseConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OllamaConfig {
    pub protocol: String,
    pub host: String,
    pub port: u16,
    pub embedding_model: String,
    pub generation_model: String,
}

/// Connection settings for the Supabase project holding the `documents` table.
#[derive(Debug, Clone, PartialEq)]
pub struct SupabaseConfig {
    pub project_url: Url,
    pub private_key: String,
    pub table: String,
    pub match_function: String,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            protocol: "http".to_string(),
            host: "localhost".to_string(),
            port: 11434,
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            generation_model: DEFAULT_GENERATION_MODEL.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),
    #[error("Invalid URL format: {0}")]
    InvalidUrl(String),
    #[error("Invalid port: {0} (must be between 1 and 65535)")]
    InvalidPort(String),
    #[error("Invalid protocol: {0} (must be 'http' or 'https')")]
    InvalidProtocol(String),
    #[error("Invalid model name: {0} (cannot be empty)")]
    InvalidModel(String),
    #[error("Private key cannot be empty")]
    EmptyPrivateKey,
}

impl Config {
    /// Load configuration from the process environment, failing fast if any
    /// required variable is absent or malformed.
    #[inline]
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            ollama: OllamaConfig::from_env()?,
            supabase: SupabaseConfig::from_env()?,
        };

        config.validate()?;
        Ok(config)
    }

    #[inline]
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.ollama.validate()?;
        self.supabase.validate()?;
        Ok(())
    }
}

impl OllamaConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = match env::var("OLLAMA_PORT") {
            Ok(raw) => match raw.parse::<u16>() {
                Ok(port) if port != 0 => port,
                _ => return Err(ConfigError::InvalidPort(raw)),
            },
            Err(_) => defaults.port,
        };

        Ok(Self {
            protocol: env::var("OLLAMA_PROTOCOL").unwrap_or(defaults.protocol),
            host: env::var("OLLAMA_HOST").unwrap_or(defaults.host),
            port,
            embedding_model: env::var("OLLAMA_EMBEDDING_MODEL").unwrap_or(defaults.embedding_model),
            generation_model: env::var("OLLAMA_GENERATION_MODEL")
                .unwrap_or(defaults.generation_model),
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.protocol != "http" && self.protocol != "https" {
            return Err(ConfigError::InvalidProtocol(self.protocol.clone()));
        }

        if self.port == 0 {
            return Err(ConfigError::InvalidPort(self.port.to_string()));
        }

        if self.embedding_model.trim().is_empty() {
            return Err(ConfigError::InvalidModel(self.embedding_model.clone()));
        }

        if self.generation_model.trim().is_empty() {
            return Err(ConfigError::InvalidModel(self.generation_model.clone()));
        }

        self.ollama_url().map(|_| ())
    }

    pub fn ollama_url(&self) -> Result<Url, ConfigError> {
        let url_str = format!("{}://{}:{}", self.protocol, self.host, self.port);
        Url::parse(&url_str).map_err(|_| ConfigError::InvalidUrl(url_str))
    }
}

impl SupabaseConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let project_url = env::var(SUPABASE_PROJECT_URL_VAR)
            .map_err(|_| ConfigError::MissingEnv(SUPABASE_PROJECT_URL_VAR.to_string()))?;
        let private_key = env::var(SUPABASE_PRIVATE_KEY_VAR)
            .map_err(|_| ConfigError::MissingEnv(SUPABASE_PRIVATE_KEY_VAR.to_string()))?;

        let project_url =
            Url::parse(&project_url).map_err(|_| ConfigError::InvalidUrl(project_url))?;

        Ok(Self {
            project_url,
            private_key,
            table: DEFAULT_DOCUMENTS_TABLE.to_string(),
            match_function: DEFAULT_MATCH_FUNCTION.to_string(),
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.private_key.trim().is_empty() {
            return Err(ConfigError::EmptyPrivateKey);
        }

        if !self.project_url.has_host() {
            return Err(ConfigError::InvalidUrl(self.project_url.to_string()));
        }

        Ok(())
    }
}
