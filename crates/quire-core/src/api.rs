//! Typed client for the backend REST surface
//!
//! The store talks to the backend exclusively through the [`ResearchApi`]
//! trait, which keeps the remote collaborator injectable: the production
//! implementation is [`HttpResearchApi`], tests supply their own.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use quire_domain::{Message, Paper, SearchResult, Workspace};

use crate::config::ClientConfig;
use crate::http::{HttpClient, HttpError};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),
    #[error("Rejected: {message}")]
    Rejected { message: String },
}

/// Reply to `POST /research/ask`. `context_used` lists the titles of the
/// papers the backend retrieved to ground the answer.
#[derive(Clone, Debug, Deserialize)]
pub struct AskReply {
    pub response: String,
    #[serde(default)]
    pub context_used: Vec<String>,
}

/// Reply to `POST /research/compare`.
#[derive(Clone, Debug, Deserialize)]
pub struct CompareReply {
    pub comparison: String,
}

/// Reply to `POST /research/upload` and `POST /research/import`.
#[derive(Clone, Debug, Deserialize)]
pub struct IngestReply {
    pub id: i64,
    pub filename: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Serialize)]
struct CreateWorkspaceBody<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
}

#[derive(Serialize)]
struct AskBody<'a> {
    message: &'a str,
    workspace_id: Option<i64>,
}

#[derive(Serialize)]
struct CompareBody<'a> {
    paper_ids: &'a [i64],
}

#[derive(Serialize)]
struct ImportBody<'a> {
    pdf_url: &'a str,
    title: &'a str,
    workspace_id: Option<i64>,
}

/// The backend REST surface consumed by the store. Every read and write
/// that touches per-workspace data takes the optional workspace id; `None`
/// means the unscoped default library.
#[async_trait]
pub trait ResearchApi: Send + Sync {
    async fn list_workspaces(&self) -> Result<Vec<Workspace>, ApiError>;

    async fn create_workspace(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<Workspace, ApiError>;

    async fn delete_workspace(&self, id: i64) -> Result<(), ApiError>;

    async fn list_papers(&self, workspace_id: Option<i64>) -> Result<Vec<Paper>, ApiError>;

    async fn upload_paper(
        &self,
        filename: &str,
        bytes: Vec<u8>,
        workspace_id: Option<i64>,
    ) -> Result<IngestReply, ApiError>;

    async fn import_paper(
        &self,
        pdf_url: &str,
        title: &str,
        workspace_id: Option<i64>,
    ) -> Result<IngestReply, ApiError>;

    async fn chat_history(&self, workspace_id: Option<i64>) -> Result<Vec<Message>, ApiError>;

    async fn ask(&self, message: &str, workspace_id: Option<i64>) -> Result<AskReply, ApiError>;

    async fn compare(&self, paper_ids: &[i64]) -> Result<CompareReply, ApiError>;

    async fn search_catalog(&self, query: &str) -> Result<Vec<SearchResult>, ApiError>;
}

/// Production implementation backed by [`HttpClient`].
pub struct HttpResearchApi {
    http: HttpClient,
    search_max_results: u32,
}

impl HttpResearchApi {
    pub fn new(config: &ClientConfig, bearer: &str) -> Self {
        Self {
            http: HttpClient::new(config, bearer),
            search_max_results: config.search_max_results,
        }
    }
}

fn scope_params(workspace_id: Option<i64>) -> Vec<(&'static str, String)> {
    match workspace_id {
        Some(id) => vec![("workspace_id", id.to_string())],
        None => Vec::new(),
    }
}

#[async_trait]
impl ResearchApi for HttpResearchApi {
    async fn list_workspaces(&self) -> Result<Vec<Workspace>, ApiError> {
        Ok(self.http.get_json("/workspaces", &[]).await?)
    }

    async fn create_workspace(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<Workspace, ApiError> {
        let body = CreateWorkspaceBody { name, description };
        Ok(self.http.post_json("/workspaces", &body).await?)
    }

    async fn delete_workspace(&self, id: i64) -> Result<(), ApiError> {
        Ok(self.http.delete(&format!("/workspaces/{id}")).await?)
    }

    async fn list_papers(&self, workspace_id: Option<i64>) -> Result<Vec<Paper>, ApiError> {
        Ok(self
            .http
            .get_json("/research/papers", &scope_params(workspace_id))
            .await?)
    }

    async fn upload_paper(
        &self,
        filename: &str,
        bytes: Vec<u8>,
        workspace_id: Option<i64>,
    ) -> Result<IngestReply, ApiError> {
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str("application/pdf")
            .map_err(|e| ApiError::Rejected {
                message: e.to_string(),
            })?;
        let mut form = reqwest::multipart::Form::new().part("file", part);
        if let Some(id) = workspace_id {
            form = form.text("workspace_id", id.to_string());
        }
        Ok(self.http.post_multipart("/research/upload", form).await?)
    }

    async fn import_paper(
        &self,
        pdf_url: &str,
        title: &str,
        workspace_id: Option<i64>,
    ) -> Result<IngestReply, ApiError> {
        let body = ImportBody {
            pdf_url,
            title,
            workspace_id,
        };
        Ok(self.http.post_json("/research/import", &body).await?)
    }

    async fn chat_history(&self, workspace_id: Option<i64>) -> Result<Vec<Message>, ApiError> {
        Ok(self
            .http
            .get_json("/research/chat/history", &scope_params(workspace_id))
            .await?)
    }

    async fn ask(&self, message: &str, workspace_id: Option<i64>) -> Result<AskReply, ApiError> {
        let body = AskBody {
            message,
            workspace_id,
        };
        Ok(self.http.post_json("/research/ask", &body).await?)
    }

    async fn compare(&self, paper_ids: &[i64]) -> Result<CompareReply, ApiError> {
        let body = CompareBody { paper_ids };
        Ok(self.http.post_json("/research/compare", &body).await?)
    }

    async fn search_catalog(&self, query: &str) -> Result<Vec<SearchResult>, ApiError> {
        let params = [
            ("query", query.to_string()),
            ("max_results", self.search_max_results.to_string()),
        ];
        Ok(self.http.get_json("/search/arxiv", &params).await?)
    }
}
