
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use crate::config::SupabaseConfig;
use crate::store::{DocumentRecord, DocumentStore, MatchedDocument};
use crate::{RagError, Result};

const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Supabase-backed document store speaking PostgREST: plain table inserts
/// plus a server-side similarity-search function (`match_documents` in the
/// deployed project).
#[derive(Debug, Clone)]
pub struct SupabaseStore {
    project_url: Url,
    private_key: String,
    table: String,
    match_function: String,
    agent: ureq::Agent,
}

#[derive(Debug, Serialize)]
struct MatchRequest<'a> {
    query_embedding: &'a [f32],
    match_threshold: f32,
    match_count: usize,
}

/// PostgREST error body; any of these fields may be absent.
#[derive(Debug, Deserialize)]
struct PostgrestError {
    message: Option<String>,
    code: Option<String>,
}

impl SupabaseStore {
    #[inline]
    pub fn new(config: &SupabaseConfig) -> Result<Self> {
        // Status errors are handled manually so the PostgREST error body can
        // be surfaced instead of a bare status code
        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(DEFAULT_TIMEOUT_SECONDS)))
            .http_status_as_error(false)
            .build()
            .into();

        Ok(Self {
            project_url: config.project_url.clone(),
            private_key: config.private_key.clone(),
            table: config.table.clone(),
            match_function: config.match_function.clone(),
            agent,
        })
    }

    #[inline]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();
        self
    }

    fn table_url(&self) -> Result<Url> {
        self.project_url
            .join(&format!("/rest/v1/{}", self.table))
            .map_err(|e| RagError::Store(format!("Failed to build table URL: {}", e)))
    }

    fn rpc_url(&self) -> Result<Url> {
        self.project_url
            .join(&format!("/rest/v1/rpc/{}", self.match_function))
            .map_err(|e| RagError::Store(format!("Failed to build RPC URL: {}", e)))
    }

    /// Probe the PostgREST endpoint with an empty-range read of the
    /// documents table.
    #[inline]
    pub fn ping(&self) -> Result<()> {
        let url = self.table_url()?;
        debug!("Pinging Supabase at {}", url);

        let mut response = self
            .agent
            .get(url.as_str())
            .header("apikey", self.private_key.as_str())
            .header("Authorization", format!("Bearer {}", self.private_key))
            .header("Range", "0-0")
            .call()
            .map_err(|e| RagError::Store(format!("Failed to reach Supabase: {}", e)))?;

        if !response.status().is_success() {
            return Err(self.status_error("ping", &mut response));
        }

        debug!("Supabase ping successful");
        Ok(())
    }

    fn post_json(&self, url: &Url, body: &str, prefer_minimal: bool) -> Result<String> {
        debug!("POST {} ({} bytes)", url, body.len());

        let mut request = self
            .agent
            .post(url.as_str())
            .header("apikey", self.private_key.as_str())
            .header("Authorization", format!("Bearer {}", self.private_key))
            .header("Content-Type", "application/json");

        if prefer_minimal {
            request = request.header("Prefer", "return=minimal");
        }

        let mut response = request
            .send(body)
            .map_err(|e| RagError::Store(format!("Request to Supabase failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(self.status_error(url.path(), &mut response));
        }

        response
            .body_mut()
            .read_to_string()
            .map_err(|e| RagError::Store(format!("Failed to read Supabase response: {}", e)))
    }

    fn status_error(&self, operation: &str, response: &mut ureq::http::Response<ureq::Body>) -> RagError {
        let status = response.status();
        let body = response.body_mut().read_to_string().unwrap_or_default();

        let detail = serde_json::from_str::<PostgrestError>(&body)
            .ok()
            .and_then(|e| match (e.message, e.code) {
                (Some(message), Some(code)) => Some(format!("{} (code {})", message, code)),
                (Some(message), None) => Some(message),
                _ => None,
            })
            .unwrap_or(body);

        RagError::Store(format!("{} returned HTTP {}: {}", operation, status, detail))
    }
}

impl DocumentStore for SupabaseStore {
    #[inline]
    fn insert(&self, records: &[DocumentRecord]) -> Result<()> {
        debug!("Inserting batch of {} documents", records.len());

        let url = self.table_url()?;
        let body = serde_json::to_string(records)
            .map_err(|e| RagError::Store(format!("Failed to serialize documents: {}", e)))?;

        self.post_json(&url, &body, true)?;

        info!("Inserted {} documents into {}", records.len(), self.table);
        Ok(())
    }

    #[inline]
    fn match_documents(
        &self,
        embedding: &[f32],
        threshold: f32,
        limit: usize,
    ) -> Result<Vec<MatchedDocument>> {
        debug!(
            "Searching for similar documents (threshold: {}, limit: {})",
            threshold, limit
        );

        let url = self.rpc_url()?;
        let request = MatchRequest {
            query_embedding: embedding,
            match_threshold: threshold,
            match_count: limit,
        };
        let body = serde_json::to_string(&request)
            .map_err(|e| RagError::Store(format!("Failed to serialize match request: {}", e)))?;

        let response_text = self.post_json(&url, &body, false)?;

        let matches: Vec<MatchedDocument> = serde_json::from_str(&response_text)
            .map_err(|e| RagError::Store(format!("Failed to parse match response: {}", e)))?;

        debug!("Similarity search returned {} documents", matches.len());
        Ok(matches)
    }
}
