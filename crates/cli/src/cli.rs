use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Book RAG pipeline: chunk a book PDF and upsert it into the vector index.
#[derive(Parser, Debug)]
#[command(name = "bookrag", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Extract, chunk, and upsert a book PDF into the index.
    Index {
        /// Path to the book PDF.
        #[arg(long, default_value = "data/book.pdf")]
        pdf: PathBuf,

        /// Source label stored on every chunk (defaults to the PDF filename).
        #[arg(long)]
        source_label: Option<String>,

        /// Characters per chunk (overrides CHUNK_SIZE).
        #[arg(long)]
        chunk_size: Option<usize>,

        /// Boundary-search overlap in characters (overrides CHUNK_OVERLAP).
        #[arg(long)]
        overlap: Option<usize>,
    },

    /// Search the indexed book content.
    Query {
        /// The question or phrase to search for.
        query: String,

        /// Number of reranked results to return.
        #[arg(long, default_value_t = 5)]
        top_k: usize,
    },
}
