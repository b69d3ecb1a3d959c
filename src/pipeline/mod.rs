// Pipeline module
// The embed-then-match-then-generate contract: ingestion writes embedded
// snippets to the store, querying finds the best match and turns it into a
// blog post


use tracing::{debug, error, info};

use crate::embeddings::Embedder;
use crate::generation::TextGenerator;
use crate::store::{DocumentRecord, DocumentStore};
use crate::{RagError, Result};

/// Minimum similarity a stored document must exceed to count as a match.
pub const MATCH_THRESHOLD: f32 = 0.5;
/// Maximum number of documents requested from the similarity search.
pub const MATCH_COUNT: usize = 1;

const PROMPT_PREFIX: &str = "Write a blog post on: [";

/// Outcome of a query run. An empty similarity result is a normal
/// termination, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    NoMatch,
    Generated {
        matched_content: String,
        text: String,
    },
}

/// Embed every chunk and submit all (content, embedding) pairs as a single
/// batch insert. Returns the number of records written.
#[inline]
pub fn ingest<E, S>(embedder: &E, store: &S, chunks: &[String]) -> Result<usize>
where
    E: Embedder,
    S: DocumentStore,
{
    if chunks.is_empty() {
        return Err(RagError::Embedding(
            "Cannot ingest an empty set of chunks".to_string(),
        ));
    }

    if let Some(empty) = chunks.iter().position(|c| c.trim().is_empty()) {
        return Err(RagError::Embedding(format!(
            "Chunk at index {} is empty",
            empty
        )));
    }

    info!("Embedding {} chunks for ingestion", chunks.len());

    let embeddings = embedder
        .embed_batch(chunks)
        .map_err(|e| RagError::Embedding(format!("Failed to embed chunks: {}", e)))?;

    debug_assert_eq!(embeddings.len(), chunks.len());

    let records: Vec<DocumentRecord> = chunks
        .iter()
        .zip(embeddings)
        .map(|(content, embedding)| DocumentRecord {
            content: content.clone(),
            embedding,
        })
        .collect();

    if let Err(e) = store.insert(&records) {
        error!("Insert failed: {}", e);
        return Err(e);
    }

    info!("Ingestion complete: {} records written", records.len());
    Ok(records.len())
}

/// Embed the query, look up the closest stored document, and on a match
/// generate a blog post from its content.
#[inline]
pub fn run_query<E, S, G>(
    embedder: &E,
    store: &S,
    generator: &G,
    query: &str,
) -> Result<QueryOutcome>
where
    E: Embedder,
    S: DocumentStore,
    G: TextGenerator,
{
    let embedding = embedder
        .embed(query)
        .map_err(|e| RagError::Embedding(format!("Failed to embed query: {}", e)))?;

    debug!("Query embedding generated: {} dimensions", embedding.len());

    let matches = match store.match_documents(&embedding, MATCH_THRESHOLD, MATCH_COUNT) {
        Ok(matches) => matches,
        Err(e) => {
            error!("Similarity search failed: {}", e);
            return Err(e);
        }
    };

    let Some(best) = matches.into_iter().next() else {
        info!("No matching documents found");
        return Ok(QueryOutcome::NoMatch);
    };

    info!("Matched content: {}", best.content);

    let prompt = build_prompt(&best.content);
    let text = generator
        .generate(&prompt)
        .map_err(|e| RagError::Generation(format!("Failed to generate text: {}", e)))?;

    Ok(QueryOutcome::Generated {
        matched_content: best.content,
        text,
    })
}

/// Interpolate matched content into the fixed generation prompt template.
#[inline]
pub fn build_prompt(content: &str) -> String {
    format!("{}{}]", PROMPT_PREFIX, content)
}
