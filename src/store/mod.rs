// Store module
// Persists (content, embedding) pairs and answers nearest-neighbor queries
// through Supabase's PostgREST interface

pub mod supabase;

pub use supabase::SupabaseStore;

use serde::{Deserialize, Serialize};

use crate::Result;

/// A (content, embedding) pair as persisted in the documents table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentRecord {
    pub content: String,
    pub embedding: Vec<f32>,
}

/// A row returned by the similarity-search function. Only `content` is
/// consumed downstream; the similarity score is informational.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MatchedDocument {
    pub content: String,
    #[serde(default)]
    pub similarity: Option<f32>,
}

/// Persistent similarity-searchable document store. The pipelines only see
/// this seam, which keeps them testable with in-memory fakes.
pub trait DocumentStore {
    /// Insert all records as a single batch write. All-or-nothing as
    /// delegated to the remote insert; no partial-success reporting.
    fn insert(&self, records: &[DocumentRecord]) -> Result<()>;

    /// Return up to `limit` stored documents whose similarity to `embedding`
    /// exceeds `threshold`, best match first.
    fn match_documents(
        &self,
        embedding: &[f32],
        threshold: f32,
        limit: usize,
    ) -> Result<Vec<MatchedDocument>>;
}
