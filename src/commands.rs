use console::style;
use tracing::{error, info};

use crate::config::Config;
use crate::embeddings::OllamaEmbedder;
use crate::generation::OllamaGenerator;
use crate::pipeline::{self, QueryOutcome};
use crate::store::SupabaseStore;
use crate::{RagError, Result};

/// Demo corpus embedded by the ingestion pipeline.
pub const SAMPLE_SNIPPETS: [&str; 5] = [
    "Beyond Mars: speculating life on distant planets.",
    "Jazz under stars: a night in New Orleans' music scene.",
    "Mysteries of the deep: exploring uncharted ocean caves.",
    "Rediscovering lost melodies: the rebirth of vinyl culture.",
    "Tales from the tech frontier: decoding AI ethics.",
];

/// Query used when none is given on the command line.
pub const DEFAULT_QUERY: &str = "life on distant planets";

/// Embed the demo corpus and write it to the documents table.
#[inline]
pub fn run_ingest(config: &Config) -> Result<()> {
    let embedder = OllamaEmbedder::new(&config.ollama)?;
    let store = SupabaseStore::new(&config.supabase)?;

    let chunks: Vec<String> = SAMPLE_SNIPPETS.iter().map(|s| (*s).to_string()).collect();

    info!("Ingesting {} snippets", chunks.len());
    let written = pipeline::ingest(&embedder, &store, &chunks)?;

    println!("Embedding complete! {} documents inserted.", written);
    Ok(())
}

/// Embed the query, find the closest stored snippet, and print a generated
/// blog post for it.
#[inline]
pub fn run_query(config: &Config, query: Option<String>) -> Result<()> {
    let embedder = OllamaEmbedder::new(&config.ollama)?;
    let store = SupabaseStore::new(&config.supabase)?;
    let generator = OllamaGenerator::new(&config.ollama)?;

    let query = query.unwrap_or_else(|| DEFAULT_QUERY.to_string());
    info!("Running query: {}", query);

    match pipeline::run_query(&embedder, &store, &generator, &query)? {
        QueryOutcome::NoMatch => {
            println!("No matching documents found");
        }
        QueryOutcome::Generated {
            matched_content,
            text,
        } => {
            println!("Matched content: {}", matched_content);
            println!();
            println!("{}", text);
        }
    }

    Ok(())
}

/// Verify that both external collaborators are reachable and the configured
/// models are available.
#[inline]
pub fn run_check(config: &Config) -> Result<()> {
    let embedder = OllamaEmbedder::new(&config.ollama)?;
    let store = SupabaseStore::new(&config.supabase)?;

    let mut healthy = true;

    match embedder.ping() {
        Ok(()) => {
            println!("{} Ollama server is reachable", style("✓").green());

            let models = embedder.list_models()?;
            for model in [
                config.ollama.embedding_model.as_str(),
                config.ollama.generation_model.as_str(),
            ] {
                if models.iter().any(|m| m.name == model) {
                    println!("{} Model available: {}", style("✓").green(), model);
                } else {
                    healthy = false;
                    println!(
                        "{} Model not found: {} (try `ollama pull {}`)",
                        style("⚠").yellow(),
                        model,
                        model
                    );
                }
            }
        }
        Err(e) => {
            healthy = false;
            error!("Ollama ping failed: {}", e);
            println!("{} Could not reach Ollama: {}", style("⚠").yellow(), e);
        }
    }

    match store.ping() {
        Ok(()) => {
            println!("{} Supabase documents table is reachable", style("✓").green());
        }
        Err(e) => {
            healthy = false;
            error!("Supabase ping failed: {}", e);
            println!("{} Could not reach Supabase: {}", style("⚠").yellow(), e);
        }
    }

    if healthy {
        println!("{}", style("All checks passed.").green());
        Ok(())
    } else {
        Err(RagError::Config(
            "One or more health checks failed".to_string(),
        ))
    }
}
