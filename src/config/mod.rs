// Configuration management module
// Reads connection settings for Ollama and Supabase from the process environment

pub mod settings;

pub use settings::{Config, ConfigError, OllamaConfig, SupabaseConfig};
