//! Shared test fixtures: an in-memory ResearchApi with per-operation
//! failure switches and gates for exercising stale-response handling.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::mpsc::Receiver;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use quire_core::api::{ApiError, AskReply, CompareReply, IngestReply, ResearchApi};
use quire_core::http::HttpError;
use quire_core::StoreEvent;
use quire_domain::{Message, Paper, SearchResult, Workspace};

pub fn workspace(id: i64, name: &str) -> Workspace {
    Workspace {
        id,
        name: name.to_string(),
        description: None,
        created_at: None,
    }
}

pub fn paper(id: i64, title: &str, authors: &str) -> Paper {
    Paper {
        id,
        title: title.to_string(),
        authors: authors.to_string(),
        abstract_text: String::new(),
        pdf_url: None,
        created_at: None,
    }
}

pub fn result(title: &str) -> SearchResult {
    SearchResult {
        title: title.to_string(),
        authors: vec!["Jane Doe".to_string()],
        summary: "A summary.".to_string(),
        pdf_url: format!("http://arxiv.org/pdf/{title}"),
        published: "2026-01-01".to_string(),
    }
}

/// Drain every event currently queued on a subscription.
pub fn drain(rx: &Receiver<StoreEvent>) -> Vec<StoreEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[derive(Default)]
struct MockState {
    workspaces: Vec<Workspace>,
    papers: HashMap<Option<i64>, Vec<Paper>>,
    history: HashMap<Option<i64>, Vec<Message>>,
    results: HashMap<String, Vec<SearchResult>>,
    context_titles: Vec<String>,
    next_id: i64,
    calls: Vec<String>,
}

/// In-memory backend double. Gates let a test hold one response open while
/// the store moves on, reproducing slow-network interleavings.
#[derive(Default)]
pub struct MockApi {
    state: Mutex<MockState>,
    failures: Mutex<HashSet<&'static str>>,
    paper_gates: Mutex<HashMap<Option<i64>, Arc<Notify>>>,
    search_gates: Mutex<HashMap<String, Arc<Notify>>>,
    ask_gate: Mutex<Option<Arc<Notify>>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MockState {
                next_id: 100,
                ..MockState::default()
            }),
            ..Self::default()
        }
    }

    pub fn add_workspace(&self, id: i64, name: &str) {
        self.state.lock().unwrap().workspaces.push(workspace(id, name));
    }

    pub fn set_papers(&self, scope: Option<i64>, papers: Vec<Paper>) {
        self.state.lock().unwrap().papers.insert(scope, papers);
    }

    pub fn set_history(&self, scope: Option<i64>, messages: Vec<Message>) {
        self.state.lock().unwrap().history.insert(scope, messages);
    }

    pub fn set_results(&self, query: &str, results: Vec<SearchResult>) {
        self.state
            .lock()
            .unwrap()
            .results
            .insert(query.to_string(), results);
    }

    pub fn set_context_titles(&self, titles: Vec<String>) {
        self.state.lock().unwrap().context_titles = titles;
    }

    /// Make the named operation fail with a 500 until cleared.
    pub fn fail_on(&self, op: &'static str) {
        self.failures.lock().unwrap().insert(op);
    }

    /// Hold every `list_papers` call for this scope until the returned
    /// gate is notified.
    pub fn gate_papers(&self, scope: Option<i64>) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.paper_gates.lock().unwrap().insert(scope, gate.clone());
        gate
    }

    /// Hold `search_catalog` calls for this query until notified.
    pub fn gate_search(&self, query: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.search_gates
            .lock()
            .unwrap()
            .insert(query.to_string(), gate.clone());
        gate
    }

    /// Hold every `ask` call until notified.
    pub fn gate_ask(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.ask_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn call_count(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }

    fn check(&self, op: &'static str) -> Result<(), ApiError> {
        if self.failures.lock().unwrap().contains(op) {
            Err(ApiError::Http(HttpError::Status { status: 500 }))
        } else {
            Ok(())
        }
    }

    fn record(&self, call: String) {
        self.state.lock().unwrap().calls.push(call);
    }
}

#[async_trait]
impl ResearchApi for MockApi {
    async fn list_workspaces(&self) -> Result<Vec<Workspace>, ApiError> {
        self.record("workspaces".to_string());
        self.check("list_workspaces")?;
        Ok(self.state.lock().unwrap().workspaces.clone())
    }

    async fn create_workspace(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<Workspace, ApiError> {
        self.record(format!("create:{name}"));
        self.check("create_workspace")?;
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let created = Workspace {
            id: state.next_id,
            name: name.to_string(),
            description: description.map(str::to_string),
            created_at: None,
        };
        state.workspaces.push(created.clone());
        Ok(created)
    }

    async fn delete_workspace(&self, id: i64) -> Result<(), ApiError> {
        self.record(format!("delete:{id}"));
        self.check("delete_workspace")?;
        let mut state = self.state.lock().unwrap();
        state.workspaces.retain(|w| w.id != id);
        Ok(())
    }

    async fn list_papers(&self, workspace_id: Option<i64>) -> Result<Vec<Paper>, ApiError> {
        let gate = self.paper_gates.lock().unwrap().get(&workspace_id).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.record(format!("papers:{workspace_id:?}"));
        self.check("list_papers")?;
        let state = self.state.lock().unwrap();
        Ok(state.papers.get(&workspace_id).cloned().unwrap_or_default())
    }

    async fn upload_paper(
        &self,
        filename: &str,
        _bytes: Vec<u8>,
        workspace_id: Option<i64>,
    ) -> Result<IngestReply, ApiError> {
        self.record(format!("upload:{filename}"));
        self.check("upload_paper")?;
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let id = state.next_id;
        state
            .papers
            .entry(workspace_id)
            .or_default()
            .push(paper(id, filename, "Unknown"));
        Ok(IngestReply {
            id,
            filename: filename.to_string(),
            message: "Paper processed successfully".to_string(),
        })
    }

    async fn import_paper(
        &self,
        pdf_url: &str,
        title: &str,
        workspace_id: Option<i64>,
    ) -> Result<IngestReply, ApiError> {
        self.record(format!("import:{title}"));
        self.check("import_paper")?;
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let id = state.next_id;
        let mut imported = paper(id, title, "Unknown");
        imported.pdf_url = Some(pdf_url.to_string());
        state.papers.entry(workspace_id).or_default().push(imported);
        Ok(IngestReply {
            id,
            filename: title.to_string(),
            message: "Paper imported successfully".to_string(),
        })
    }

    async fn chat_history(&self, workspace_id: Option<i64>) -> Result<Vec<Message>, ApiError> {
        self.record(format!("history:{workspace_id:?}"));
        self.check("chat_history")?;
        let state = self.state.lock().unwrap();
        Ok(state.history.get(&workspace_id).cloned().unwrap_or_default())
    }

    async fn ask(&self, message: &str, _workspace_id: Option<i64>) -> Result<AskReply, ApiError> {
        let gate = self.ask_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.record(format!("ask:{message}"));
        self.check("ask")?;
        let state = self.state.lock().unwrap();
        Ok(AskReply {
            response: format!("echo: {message}"),
            context_used: state.context_titles.clone(),
        })
    }

    async fn compare(&self, paper_ids: &[i64]) -> Result<CompareReply, ApiError> {
        self.record(format!("compare:{paper_ids:?}"));
        self.check("compare")?;
        Ok(CompareReply {
            comparison: format!("comparison of {paper_ids:?}"),
        })
    }

    async fn search_catalog(&self, query: &str) -> Result<Vec<SearchResult>, ApiError> {
        let gate = self.search_gates.lock().unwrap().get(query).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.record(format!("search:{query}"));
        self.check("search_catalog")?;
        let state = self.state.lock().unwrap();
        Ok(state.results.get(query).cloned().unwrap_or_default())
    }
}
