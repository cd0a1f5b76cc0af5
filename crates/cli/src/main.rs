mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use bookrag_core::config::{load_dotenv, Config};
use bookrag_index::IndexClient;
use bookrag_ingest::{chunk_pages, extract_pdf, ChunkerConfig};

use crate::cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    load_dotenv();
    let cli = Cli::parse();

    match cli.command {
        Command::Index {
            pdf,
            source_label,
            chunk_size,
            overlap,
        } => {
            let config = Config::from_env().context("failed to load configuration")?;

            let pages = extract_pdf(&pdf)
                .with_context(|| format!("failed to extract text from {}", pdf.display()))?;

            let source_file = source_label.unwrap_or_else(|| {
                pdf.file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "book.pdf".to_string())
            });

            let chunker = ChunkerConfig {
                chunk_size: chunk_size.unwrap_or(config.chunking.chunk_size),
                overlap: overlap.unwrap_or(config.chunking.overlap),
                source_file,
            };
            let chunks = chunk_pages(&pages, &chunker).context("chunking failed")?;
            info!(
                pages = pages.len(),
                chunks = chunks.len(),
                chunk_size = chunker.chunk_size,
                overlap = chunker.overlap,
                "prepared chunks"
            );

            let client = IndexClient::new(&config.index);
            client
                .batch_upsert(&chunks)
                .await
                .context("upsert failed, aborting the indexing run")?;
            info!(records = chunks.len(), "indexing complete");
        }

        Command::Query { query, top_k } => {
            let config = Config::from_env().context("failed to load configuration")?;
            let client = IndexClient::new(&config.index);

            let hits = client
                .search(&query, top_k)
                .await
                .context("search failed")?;

            if hits.is_empty() {
                println!("No results found.");
                return Ok(());
            }

            println!("Found {} results:", hits.len());
            for (i, hit) in hits.iter().enumerate() {
                println!("\nResult {} (score: {:.4})", i + 1, hit.score);
                if let (Some(page), Some(index)) = (hit.page_number, hit.chunk_index) {
                    println!("Page: {page}, Chunk: {index}");
                }
                println!("{}", "-".repeat(80));
                println!("{}", preview(&hit.content, 300));
            }
        }
    }

    Ok(())
}

/// First `max_chars` characters of `content`, with an ellipsis when cut.
fn preview(content: &str, max_chars: usize) -> String {
    if content.chars().count() <= max_chars {
        content.to_string()
    } else {
        let cut: String = content.chars().take(max_chars).collect();
        format!("{cut}...")
    }
}
