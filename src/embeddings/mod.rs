// Embeddings module
// Turns text into fixed-length vectors via a local Ollama instance

pub mod ollama;

pub use ollama::OllamaEmbedder;

use anyhow::Result;

/// Source of embedding vectors. The query and ingestion pipelines only see
/// this seam, which keeps them testable with in-memory fakes.
pub trait Embedder {
    /// Produce an embedding vector for a single text.
    fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Produce one embedding vector per input text, in input order.
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}
