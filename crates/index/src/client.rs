//! HTTP client for the hosted vector index (integrated-records API).
//!
//! Constructed explicitly by the caller and passed by reference; no global
//! client state. Records are upserted keyed by their `_id` field, so
//! re-indexing unchanged input updates records in place.

use std::time::Duration;

use bookrag_core::config::IndexConfig;
use bookrag_core::Chunk;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::retry::{retry_with_backoff, RetryPolicy};

const API_VERSION: &str = "2025-01";
const RERANK_MODEL: &str = "bge-reranker-v2-m3";

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl IndexError {
    /// Rate limiting and server-side failures are worth retrying;
    /// everything else fails the run immediately.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Api { status, .. } if *status == 429 || *status >= 500)
    }
}

/// One scored retrieval hit.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub id: String,
    pub score: f64,
    pub content: String,
    pub page_number: Option<u64>,
    pub chunk_index: Option<u64>,
    pub source_file: Option<String>,
}

pub struct IndexClient {
    http: reqwest::Client,
    host: String,
    api_key: String,
    namespace: String,
    batch_size: usize,
    retry: RetryPolicy,
}

impl IndexClient {
    pub fn new(config: &IndexConfig) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(120))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            host: config.host.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            namespace: config.namespace.clone(),
            batch_size: config.batch_size.max(1),
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Upsert all chunks in batches, retrying transient failures per batch.
    ///
    /// Any non-transient error (or a batch that exhausts its retries) aborts
    /// the whole run so the index never holds a partially updated corpus
    /// without signal.
    pub async fn batch_upsert(&self, chunks: &[Chunk]) -> Result<(), IndexError> {
        let total_batches = chunks.chunks(self.batch_size).count();
        for (i, batch) in chunks.chunks(self.batch_size).enumerate() {
            retry_with_backoff(&self.retry, IndexError::is_transient, || {
                self.upsert_batch(batch)
            })
            .await?;
            info!(
                batch = i + 1,
                total_batches,
                records = batch.len(),
                "upserted batch"
            );
            // Light pacing between batches to stay under write rate limits.
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        Ok(())
    }

    async fn upsert_batch(&self, batch: &[Chunk]) -> Result<(), IndexError> {
        let body = to_ndjson(batch)?;
        let url = format!(
            "{}/records/namespaces/{}/upsert",
            self.host, self.namespace
        );
        debug!(records = batch.len(), %url, "sending upsert request");

        let response = self
            .http
            .post(&url)
            .header("Api-Key", &self.api_key)
            .header("X-Pinecone-API-Version", API_VERSION)
            .header("Content-Type", "application/x-ndjson")
            .body(body)
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }

    /// Search the namespace with server-side reranking over chunk content.
    pub async fn search(&self, query: &str, top_k: usize) -> Result<Vec<SearchHit>, IndexError> {
        let request = search_request(query, top_k);
        let url = format!(
            "{}/records/namespaces/{}/search",
            self.host, self.namespace
        );

        let response = self
            .http
            .post(&url)
            .header("Api-Key", &self.api_key)
            .header("X-Pinecone-API-Version", API_VERSION)
            .json(&request)
            .send()
            .await?;

        let response = check_status(response).await?;
        let parsed: SearchResponse = response.json().await?;

        Ok(parsed
            .result
            .hits
            .into_iter()
            .map(|hit| SearchHit {
                id: hit.id,
                score: hit.score,
                content: hit.fields.content,
                page_number: hit.fields.page_num,
                chunk_index: hit.fields.chunk_index,
                source_file: hit.fields.source_file,
            })
            .collect())
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, IndexError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(IndexError::Api {
        status: status.as_u16(),
        message,
    })
}

/// Encode records as newline-delimited JSON, one record per line.
fn to_ndjson(batch: &[Chunk]) -> Result<String, IndexError> {
    let mut body = String::new();
    for record in batch {
        body.push_str(&serde_json::to_string(record)?);
        body.push('\n');
    }
    Ok(body)
}

/// Request twice the wanted hits so the reranker has candidates to reorder.
fn search_request(query: &str, top_k: usize) -> SearchRequest {
    SearchRequest {
        query: QuerySpec {
            top_k: top_k * 2,
            inputs: QueryInputs {
                text: query.to_string(),
            },
        },
        rerank: RerankSpec {
            model: RERANK_MODEL,
            top_n: top_k,
            rank_fields: vec!["content"],
        },
    }
}

// ── Wire types ──────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct SearchRequest {
    query: QuerySpec,
    rerank: RerankSpec,
}

#[derive(Debug, Serialize)]
struct QuerySpec {
    top_k: usize,
    inputs: QueryInputs,
}

#[derive(Debug, Serialize)]
struct QueryInputs {
    text: String,
}

#[derive(Debug, Serialize)]
struct RerankSpec {
    model: &'static str,
    top_n: usize,
    rank_fields: Vec<&'static str>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    result: SearchResultBody,
}

#[derive(Debug, Deserialize)]
struct SearchResultBody {
    hits: Vec<HitWire>,
}

#[derive(Debug, Deserialize)]
struct HitWire {
    #[serde(rename = "_id")]
    id: String,
    #[serde(rename = "_score")]
    score: f64,
    #[serde(default)]
    fields: HitFields,
}

#[derive(Debug, Default, Deserialize)]
struct HitFields {
    #[serde(default)]
    content: String,
    #[serde(default)]
    page_num: Option<u64>,
    #[serde(default)]
    chunk_index: Option<u64>,
    #[serde(default)]
    source_file: Option<String>,
}
