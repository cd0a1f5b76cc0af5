use std::env;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

fn env_usize(key: &str, default: usize) -> Result<usize, ConfigError> {
    match env_opt(key) {
        Some(v) => v.parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value: v,
        }),
        None => Ok(default),
    }
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub index: IndexConfig,
    pub chunking: ChunkingConfig,
}

/// Connection settings for the hosted vector index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// API key for the index service (`PINECONE_API_KEY`, required).
    pub api_key: String,
    /// Index host URL (`PINECONE_INDEX_HOST`).
    pub host: String,
    /// Namespace holding the book records (`PINECONE_NAMESPACE`).
    pub namespace: String,
    /// Records per upsert request (`UPSERT_BATCH_SIZE`).
    pub batch_size: usize,
}

/// Chunking parameters consumed by the ingest pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Target maximum characters per chunk (`CHUNK_SIZE`).
    pub chunk_size: usize,
    /// Characters of shared context between adjacent chunks (`CHUNK_OVERLAP`).
    pub overlap: usize,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            index: IndexConfig::from_env()?,
            chunking: ChunkingConfig::from_env()?,
        })
    }
}

impl IndexConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env_opt("PINECONE_API_KEY")
            .ok_or_else(|| ConfigError::MissingVar("PINECONE_API_KEY".to_string()))?;
        Ok(Self {
            api_key,
            host: env_or(
                "PINECONE_INDEX_HOST",
                "https://book-rag-index.svc.pinecone.io",
            ),
            namespace: env_or("PINECONE_NAMESPACE", "book_content"),
            batch_size: env_usize("UPSERT_BATCH_SIZE", 96)?,
        })
    }
}

impl ChunkingConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            chunk_size: env_usize("CHUNK_SIZE", 1000)?,
            overlap: env_usize("CHUNK_OVERLAP", 200)?,
        })
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            overlap: 200,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunking_defaults() {
        let c = ChunkingConfig::default();
        assert_eq!(c.chunk_size, 1000);
        assert_eq!(c.overlap, 200);
    }
}
