use serde::{Deserialize, Serialize};

/// A page of extracted text.
///
/// Produced by PDF extraction, one per physical page with non-empty text,
/// in ascending page order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// 1-based page number.
    pub page_number: usize,
    /// The extracted text content.
    pub text: String,
}

impl Page {
    pub fn new(page_number: usize, text: impl Into<String>) -> Self {
        Self {
            page_number,
            text: text.into(),
        }
    }
}

/// A chunk of page text prepared for embedding and upsert.
///
/// Serialized field names follow the index record schema: the id is stored
/// as `_id` so the index can upsert keyed by it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Globally unique, stable id (`chunk_{n}`, n counted across all pages).
    #[serde(rename = "_id")]
    pub id: String,
    /// Trimmed, non-empty chunk text.
    pub content: String,
    /// 1-based page number the chunk was cut from.
    #[serde(rename = "page_num")]
    pub page_number: usize,
    /// 1-based position of the chunk within its page.
    pub chunk_index: usize,
    /// Label of the originating document.
    pub source_file: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_serializes_with_index_field_names() {
        let chunk = Chunk {
            id: "chunk_7".to_string(),
            content: "Some text.".to_string(),
            page_number: 3,
            chunk_index: 2,
            source_file: "book.pdf".to_string(),
        };
        let json = serde_json::to_value(&chunk).unwrap();
        assert_eq!(json["_id"], "chunk_7");
        assert_eq!(json["page_num"], 3);
        assert_eq!(json["chunk_index"], 2);
        assert_eq!(json["content"], "Some text.");
        assert_eq!(json["source_file"], "book.pdf");
    }
}
