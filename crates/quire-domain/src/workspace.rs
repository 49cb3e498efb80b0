//! Workspace: a named container scoping papers and chat history

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A backend-owned workspace. The client holds a read-through cache of the
/// list and the currently selected entry; ids are assigned by the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Backend timestamps are naive UTC.
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_backend_shape() {
        let json = r#"{"id": 3, "name": "Transformers", "description": null, "owner_id": 1}"#;
        let ws: Workspace = serde_json::from_str(json).unwrap();
        assert_eq!(ws.id, 3);
        assert_eq!(ws.name, "Transformers");
        assert!(ws.description.is_none());
        assert!(ws.created_at.is_none());
    }

    #[test]
    fn accepts_created_at() {
        let json = r#"{"id": 1, "name": "Default", "created_at": "2026-01-15T09:30:00"}"#;
        let ws: Workspace = serde_json::from_str(json).unwrap();
        assert!(ws.created_at.is_some());
    }
}
