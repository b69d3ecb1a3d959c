// Generation module
// Produces text completions from a prompt via a local Ollama instance

pub mod ollama;

pub use ollama::OllamaGenerator;

use anyhow::Result;

/// Text-completion capability consumed by the query pipeline.
pub trait TextGenerator {
    /// Generate text from a prompt, returning the full completion.
    fn generate(&self, prompt: &str) -> Result<String>;
}
