//! Boundary-aware text chunking for embedding and retrieval.
//!
//! Splits page text into bounded chunks, cutting at the largest unit of
//! meaning available inside the search window: end of sentence first, then
//! paragraph break, then word boundary, with a hard cut at the size limit
//! as last resort. Chunk ids are numbered globally across pages so that
//! re-running the pipeline on unchanged input upserts the same records.

mod splitter;


use bookrag_core::{Chunk, Page};
use thiserror::Error;
use tracing::debug;

use splitter::split_page;

#[derive(Debug, Error)]
pub enum ChunkError {
    #[error("Invalid chunker configuration: {0}")]
    Configuration(String),

    #[error("Invalid page input: {0}")]
    InvalidInput(String),
}

/// Chunking parameters.
#[derive(Debug, Clone)]
pub struct ChunkerConfig {
    /// Target maximum characters per chunk.
    pub chunk_size: usize,
    /// Characters of boundary-search slack shared between adjacent windows.
    pub overlap: usize,
    /// Label recorded on every chunk as its source document.
    pub source_file: String,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            overlap: 200,
            source_file: "book.pdf".to_string(),
        }
    }
}

impl ChunkerConfig {
    /// Reject parameter combinations the splitter cannot make progress with.
    pub fn validate(&self) -> Result<(), ChunkError> {
        if self.chunk_size == 0 {
            return Err(ChunkError::Configuration(
                "chunk_size must be positive".to_string(),
            ));
        }
        if self.overlap >= self.chunk_size {
            return Err(ChunkError::Configuration(format!(
                "overlap ({}) must be smaller than chunk_size ({})",
                self.overlap, self.chunk_size
            )));
        }
        Ok(())
    }
}

/// Split pages into ordered, overlapping chunks with stable ids.
///
/// Pure function of its inputs: identical pages and config produce
/// byte-identical output, including ids. Configuration and page records are
/// validated up front; nothing is emitted on error.
pub fn chunk_pages(pages: &[Page], config: &ChunkerConfig) -> Result<Vec<Chunk>, ChunkError> {
    config.validate()?;

    if let Some(pos) = pages.iter().position(|p| p.page_number == 0) {
        return Err(ChunkError::InvalidInput(format!(
            "page_number must be 1-based (record {pos} has page_number 0)"
        )));
    }

    let mut chunks = Vec::new();
    let mut next_id = 1usize;

    for page in pages {
        let pieces = split_page(&page.text, config.chunk_size, config.overlap);
        debug!(
            page = page.page_number,
            pieces = pieces.len(),
            "chunked page"
        );
        for (idx, content) in pieces.into_iter().enumerate() {
            chunks.push(Chunk {
                id: format!("chunk_{next_id}"),
                content,
                page_number: page.page_number,
                chunk_index: idx + 1,
                source_file: config.source_file.clone(),
            });
            next_id += 1;
        }
    }

    Ok(chunks)
}
