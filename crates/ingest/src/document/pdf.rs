use std::path::Path;

use bookrag_core::Page;
use tracing::info;

use super::ExtractionError;

/// Extract per-page text from a PDF on disk.
///
/// Pages whose extracted text is empty after trimming are dropped; the
/// surviving pages keep their physical 1-based page numbers.
pub fn extract_pdf(path: impl AsRef<Path>) -> Result<Vec<Page>, ExtractionError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ExtractionError::FileNotFound(path.display().to_string()));
    }

    let bytes = std::fs::read(path)?;
    let text = pdf_extract::extract_text_from_mem(&bytes)
        .map_err(|e| ExtractionError::Pdf(e.to_string()))?;

    let pages = split_into_pages(&text);
    info!(path = %path.display(), pages = pages.len(), "extracted PDF text");
    Ok(pages)
}

/// pdf-extract returns all text as one string; form feed characters (\x0C)
/// typically separate pages. Without page breaks, treat it as a single page.
fn split_into_pages(text: &str) -> Vec<Page> {
    if text.contains('\x0C') {
        text.split('\x0C')
            .enumerate()
            .filter(|(_, page_text)| !page_text.trim().is_empty())
            .map(|(i, page_text)| Page::new(i + 1, page_text.trim()))
            .collect()
    } else {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            Vec::new()
        } else {
            vec![Page::new(1, trimmed)]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_form_feed() {
        let pages = split_into_pages("first page\x0Csecond page\x0Cthird page");
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0], Page::new(1, "first page"));
        assert_eq!(pages[2], Page::new(3, "third page"));
    }

    #[test]
    fn blank_pages_are_dropped_but_numbering_stays_physical() {
        let pages = split_into_pages("one\x0C   \n \x0Cthree");
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].page_number, 1);
        assert_eq!(pages[1].page_number, 3);
        assert_eq!(pages[1].text, "three");
    }

    #[test]
    fn no_page_breaks_means_single_page() {
        let pages = split_into_pages("  just one block of text  ");
        assert_eq!(pages, vec![Page::new(1, "just one block of text")]);
    }

    #[test]
    fn empty_document_yields_no_pages() {
        assert!(split_into_pages("   \n  ").is_empty());
    }
}
