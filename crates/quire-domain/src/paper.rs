//! Paper metadata as served by the backend

use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A paper belonging to exactly one workspace (or the unscoped default).
/// Immutable once created on the client side; the collection is replaced
/// wholesale on every reload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Paper {
    pub id: i64,
    pub title: String,
    /// Comma-separated free-text author list, e.g. `"Alice, Bob"`.
    #[serde(default)]
    pub authors: String,
    #[serde(rename = "abstract", default)]
    pub abstract_text: String,
    #[serde(default)]
    pub pdf_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

impl Paper {
    /// Split the free-text author field into trimmed, non-empty tokens.
    /// Tokens are compared by exact case-sensitive equality downstream; no
    /// fuzzy name resolution.
    pub fn author_tokens(&self) -> BTreeSet<&str> {
        self.authors
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect()
    }

    /// True when both papers name at least one identical author token.
    pub fn shares_author_with(&self, other: &Paper) -> bool {
        let mine = self.author_tokens();
        if mine.is_empty() {
            return false;
        }
        other.author_tokens().iter().any(|t| mine.contains(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn paper(id: i64, authors: &str) -> Paper {
        Paper {
            id,
            title: format!("Paper {id}"),
            authors: authors.to_string(),
            abstract_text: String::new(),
            pdf_url: None,
            created_at: None,
        }
    }

    #[rstest]
    #[case("Alice, Bob", &["Alice", "Bob"])]
    #[case("  Alice ,Bob  ", &["Alice", "Bob"])]
    #[case("", &[])]
    #[case(" , , ", &[])]
    #[case("Alice, Alice", &["Alice"])]
    fn author_tokens_trim_and_dedupe(#[case] authors: &str, #[case] expected: &[&str]) {
        let p = paper(1, authors);
        let tokens: Vec<&str> = p.author_tokens().into_iter().collect();
        assert_eq!(tokens, expected);
    }

    #[test]
    fn shared_author_is_exact_and_case_sensitive() {
        let a = paper(1, "Alice, Bob");
        let b = paper(2, "Bob, Carol");
        let c = paper(3, "alice");
        assert!(a.shares_author_with(&b));
        assert!(!a.shares_author_with(&c));
    }

    #[test]
    fn whitespace_only_tokens_never_match() {
        let a = paper(1, " , ");
        let b = paper(2, ",,");
        assert!(!a.shares_author_with(&b));
    }

    #[test]
    fn deserializes_backend_shape() {
        let json = r#"{
            "id": 10,
            "title": "Attention Is All You Need",
            "abstract": "We propose a new architecture...",
            "authors": "Vaswani, Shazeer",
            "created_at": "2026-02-01T12:00:00"
        }"#;
        let p: Paper = serde_json::from_str(json).unwrap();
        assert_eq!(p.id, 10);
        assert!(p.abstract_text.starts_with("We propose"));
        assert_eq!(p.author_tokens().len(), 2);
        assert!(p.pdf_url.is_none());
    }
}
