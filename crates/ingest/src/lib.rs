pub mod chunker;
pub mod document;

pub use chunker::{chunk_pages, ChunkError, ChunkerConfig};
pub use document::{extract_pdf, ExtractionError};
