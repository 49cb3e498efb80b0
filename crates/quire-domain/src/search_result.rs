//! Search results from the external catalog

use serde::{Deserialize, Serialize};

/// One transient entry returned by the catalog search endpoint. Not
/// persisted; the result list is replaced wholesale per query and cleared
/// when an entry is imported into the library.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub authors: Vec<String>,
    pub summary: String,
    pub pdf_url: String,
    pub published: String,
}

impl SearchResult {
    /// Author list joined for display, matching the comma-separated format
    /// the library uses for imported papers.
    pub fn authors_joined(&self) -> String {
        self.authors.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_catalog_entry() {
        let json = r#"{
            "title": "A Survey of Retrieval",
            "authors": ["Jane Doe", "John Smith"],
            "summary": "We survey retrieval methods.",
            "pdf_url": "http://arxiv.org/pdf/2301.00001",
            "published": "2023-01-01 00:00:00+00:00"
        }"#;
        let r: SearchResult = serde_json::from_str(json).unwrap();
        assert_eq!(r.authors.len(), 2);
        assert_eq!(r.authors_joined(), "Jane Doe, John Smith");
    }
}
