//! LibraryStore: the root coordinator for workspace state
//!
//! Owns the active workspace and keeps the dependent collections (papers,
//! chat history, comparison selection) consistent as it changes. All state
//! mutation goes through commands on this store; observers subscribe to a
//! channel of [`StoreEvent`]s and re-read snapshots.
//!
//! Concurrency: commands are async and may overlap. State sits behind a
//! mutex that is never held across an await point; every response handler
//! re-checks its originating context (workspace generation, search ticket)
//! before committing, and stale results are dropped rather than merged.
//! Busy flags are advisory, not mutexes.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard};

use quire_domain::{Message, Paper, SearchResult, Workspace};

use crate::api::ResearchApi;
use crate::chat::ChatSession;
use crate::collection::PaperCollection;
use crate::error::{CoreError, Result};
use crate::event::{Severity, StoreEvent};
use crate::graph::{build_graph, Graph};
use crate::playback::{AudioPlayback, NullPlayback, PlaybackId};
use crate::search::SearchSession;
use crate::selection::SelectionSet;

/// Hub label used while no workspace is selected (unscoped default library).
pub const DEFAULT_HUB_LABEL: &str = "Library";

struct StoreState {
    workspaces: Vec<Workspace>,
    active: Option<Workspace>,
    initialized: bool,
    /// Bumped on every activation change; in-flight fetches carry the value
    /// they were dispatched under and commit only if it still matches.
    generation: u64,
    papers: PaperCollection,
    chat: ChatSession,
    search: SearchSession,
    selection: SelectionSet,
    active_playback: Option<PlaybackId>,
    subscribers: Vec<Sender<StoreEvent>>,
}

impl StoreState {
    fn new() -> Self {
        Self {
            workspaces: Vec::new(),
            active: None,
            initialized: false,
            generation: 0,
            papers: PaperCollection::new(),
            chat: ChatSession::new(),
            search: SearchSession::new(),
            selection: SelectionSet::new(),
            active_playback: None,
            subscribers: Vec::new(),
        }
    }

    fn active_id(&self) -> Option<i64> {
        self.active.as_ref().map(|w| w.id)
    }
}

pub struct LibraryStore {
    api: Arc<dyn ResearchApi>,
    playback: Arc<dyn AudioPlayback>,
    state: Mutex<StoreState>,
}

impl LibraryStore {
    pub fn new(api: Arc<dyn ResearchApi>) -> Self {
        Self::with_playback(api, Arc::new(NullPlayback))
    }

    pub fn with_playback(api: Arc<dyn ResearchApi>, playback: Arc<dyn AudioPlayback>) -> Self {
        Self {
            api,
            playback,
            state: Mutex::new(StoreState::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap()
    }

    fn emit(state: &mut StoreState, event: StoreEvent) {
        state.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    fn notify(&self, severity: Severity, message: &str) {
        let mut state = self.lock();
        Self::emit(
            &mut state,
            StoreEvent::Notice {
                severity,
                message: message.to_string(),
            },
        );
    }

    /// Subscribe to store events. The receiver sees every event emitted
    /// after this call; disconnected receivers are pruned lazily.
    pub fn subscribe(&self) -> Receiver<StoreEvent> {
        let (tx, rx) = mpsc::channel();
        self.lock().subscribers.push(tx);
        rx
    }

    // ==================== Snapshots ====================

    pub fn workspaces(&self) -> Vec<Workspace> {
        self.lock().workspaces.clone()
    }

    pub fn active(&self) -> Option<Workspace> {
        self.lock().active.clone()
    }

    pub fn is_initialized(&self) -> bool {
        self.lock().initialized
    }

    pub fn papers(&self) -> Vec<Paper> {
        self.lock().papers.papers().to_vec()
    }

    pub fn messages(&self) -> Vec<Message> {
        self.lock().chat.messages().to_vec()
    }

    pub fn search_query(&self) -> String {
        self.lock().search.query().to_string()
    }

    pub fn search_results(&self) -> Vec<SearchResult> {
        self.lock().search.results().to_vec()
    }

    pub fn selected_ids(&self) -> Vec<i64> {
        self.lock().selection.as_vec()
    }

    pub fn selection_eligible(&self) -> bool {
        self.lock().selection.is_eligible_for_comparison()
    }

    pub fn is_loading(&self) -> bool {
        self.lock().papers.is_loading()
    }

    pub fn is_uploading(&self) -> bool {
        self.lock().papers.is_uploading()
    }

    pub fn is_searching(&self) -> bool {
        self.lock().search.is_searching()
    }

    pub fn is_pending(&self) -> bool {
        self.lock().chat.is_pending()
    }

    pub fn is_comparing(&self) -> bool {
        self.lock().chat.is_comparing()
    }

    pub fn active_playback(&self) -> Option<PlaybackId> {
        self.lock().active_playback
    }

    /// Derive the workspace graph from the current paper snapshot. Pure
    /// recomputation on every read; nothing is cached.
    pub fn graph(&self) -> Graph {
        let state = self.lock();
        let hub_label = state
            .active
            .as_ref()
            .map(|w| w.name.as_str())
            .unwrap_or(DEFAULT_HUB_LABEL);
        build_graph(state.papers.papers(), hub_label)
    }

    // ==================== Workspace commands ====================

    /// Fetch the workspace list and select the first entry, then load the
    /// dependent collections. A failed list fetch leaves the store in the
    /// unscoped state; the collections are loaded unscoped regardless.
    pub async fn initialize(&self) -> Result<()> {
        let outcome = self.api.list_workspaces().await;
        let (generation, scope) = {
            let mut state = self.lock();
            match outcome {
                Ok(list) => {
                    state.workspaces = list;
                    state.active = state.workspaces.first().cloned();
                }
                Err(err) => {
                    tracing::warn!(error = %err, "failed to fetch workspace list");
                }
            }
            state.initialized = true;
            state.generation += 1;
            state.papers.begin_load();
            Self::emit(&mut state, StoreEvent::WorkspaceListChanged);
            let active = state.active.clone();
            let scope = state.active_id();
            Self::emit(
                &mut state,
                StoreEvent::ActiveWorkspaceChanged { workspace: active },
            );
            (state.generation, scope)
        };
        self.reload_collections(generation, scope).await;
        Ok(())
    }

    /// Change the active workspace. Idempotent: re-selecting the current id
    /// performs no fetches. `None` selects the unscoped default library.
    pub async fn set_active(&self, workspace_id: Option<i64>) -> Result<()> {
        let (generation, scope) = {
            let mut state = self.lock();
            if state.initialized && state.active_id() == workspace_id {
                return Ok(());
            }
            let next = match workspace_id {
                Some(id) => Some(
                    state
                        .workspaces
                        .iter()
                        .find(|w| w.id == id)
                        .cloned()
                        .ok_or(CoreError::UnknownWorkspace(id))?,
                ),
                None => None,
            };
            state.active = next;
            state.initialized = true;
            state.generation += 1;
            state.papers.begin_load();
            let active = state.active.clone();
            Self::emit(
                &mut state,
                StoreEvent::ActiveWorkspaceChanged { workspace: active },
            );
            (state.generation, workspace_id)
        };
        self.reload_collections(generation, scope).await;
        Ok(())
    }

    /// Create a workspace and make it active. Returns the created workspace,
    /// or `None` when the backend rejected it (surfaced as a notice).
    pub async fn create_workspace(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<Option<Workspace>> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CoreError::InvalidOperation(
                "workspace name must not be empty".to_string(),
            ));
        }
        match self.api.create_workspace(name, description).await {
            Ok(workspace) => {
                let (generation, scope) = {
                    let mut state = self.lock();
                    state.workspaces.push(workspace.clone());
                    state.active = Some(workspace.clone());
                    state.generation += 1;
                    state.papers.begin_load();
                    Self::emit(&mut state, StoreEvent::WorkspaceListChanged);
                    let active = state.active.clone();
                    let scope = state.active_id();
                    Self::emit(
                        &mut state,
                        StoreEvent::ActiveWorkspaceChanged { workspace: active },
                    );
                    (state.generation, scope)
                };
                self.reload_collections(generation, scope).await;
                Ok(Some(workspace))
            }
            Err(err) => {
                tracing::warn!(error = %err, "workspace creation failed");
                self.notify(Severity::Error, "Failed to create workspace");
                Ok(None)
            }
        }
    }

    /// Delete a workspace. Deleting the active one falls back to the first
    /// remaining workspace, or the unscoped state when none remain; the
    /// store never points at a deleted id.
    pub async fn delete_workspace(&self, id: i64) -> Result<()> {
        {
            let state = self.lock();
            if !state.workspaces.iter().any(|w| w.id == id) {
                return Err(CoreError::UnknownWorkspace(id));
            }
        }
        match self.api.delete_workspace(id).await {
            Ok(()) => {
                let reload = {
                    let mut state = self.lock();
                    state.workspaces.retain(|w| w.id != id);
                    Self::emit(&mut state, StoreEvent::WorkspaceListChanged);
                    Self::emit(
                        &mut state,
                        StoreEvent::Notice {
                            severity: Severity::Success,
                            message: "Workspace deleted".to_string(),
                        },
                    );
                    if state.active_id() == Some(id) {
                        state.active = state.workspaces.first().cloned();
                        state.generation += 1;
                        state.papers.begin_load();
                        let active = state.active.clone();
                        let scope = state.active_id();
                        Self::emit(
                            &mut state,
                            StoreEvent::ActiveWorkspaceChanged { workspace: active },
                        );
                        Some((state.generation, scope))
                    } else {
                        None
                    }
                };
                if let Some((generation, scope)) = reload {
                    self.reload_collections(generation, scope).await;
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "workspace deletion failed");
                self.notify(Severity::Error, "Failed to delete workspace");
            }
        }
        Ok(())
    }

    // ==================== Chat commands ====================

    /// Send a message to the assistant. The user message is appended
    /// optimistically and never retracted; a failed request appends the
    /// fixed error reply instead. A reply that resolves after a workspace
    /// switch is dropped (the reload already replaced the log).
    pub async fn send(&self, text: &str) -> Result<()> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(());
        }
        let (generation, scope) = {
            let mut state = self.lock();
            if state.chat.is_pending() {
                return Err(CoreError::InvalidOperation(
                    "a chat request is already pending".to_string(),
                ));
            }
            let message = state.chat.begin_send(text);
            Self::emit(&mut state, StoreEvent::MessageAppended { message });
            (state.generation, state.active_id())
        };

        let outcome = self.api.ask(text, scope).await;

        let mut state = self.lock();
        if state.generation != generation {
            tracing::debug!("dropping assistant reply for a superseded workspace");
            return Ok(());
        }
        match outcome {
            Ok(reply) => {
                let message = state.chat.complete(reply.response);
                Self::emit(&mut state, StoreEvent::MessageAppended { message });
                if !reply.context_used.is_empty() {
                    Self::emit(
                        &mut state,
                        StoreEvent::ContextUsed {
                            titles: reply.context_used,
                        },
                    );
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "assistant request failed");
                let message = state.chat.fail();
                Self::emit(&mut state, StoreEvent::MessageAppended { message });
            }
        }
        Ok(())
    }

    /// Request a comparison of the selected papers (at least two). Success
    /// yields the comparison text and emits it as an event; failure surfaces
    /// a transient notice. The chat log is never mutated either way.
    pub async fn compare_selected(&self) -> Result<Option<String>> {
        let (ids, generation) = {
            let mut state = self.lock();
            if !state.selection.is_eligible_for_comparison() {
                return Err(CoreError::InvalidOperation(
                    "comparison requires at least two selected papers".to_string(),
                ));
            }
            if state.chat.is_comparing() {
                return Err(CoreError::InvalidOperation(
                    "a comparison is already in flight".to_string(),
                ));
            }
            state.chat.begin_compare();
            (state.selection.as_vec(), state.generation)
        };

        let outcome = self.api.compare(&ids).await;

        let mut state = self.lock();
        if state.generation != generation {
            tracing::debug!("dropping comparison for a superseded workspace");
            return Ok(None);
        }
        state.chat.end_compare();
        match outcome {
            Ok(reply) => {
                Self::emit(
                    &mut state,
                    StoreEvent::ComparisonReady {
                        comparison: reply.comparison.clone(),
                    },
                );
                Ok(Some(reply.comparison))
            }
            Err(err) => {
                tracing::warn!(error = %err, "comparison request failed");
                Self::emit(
                    &mut state,
                    StoreEvent::Notice {
                        severity: Severity::Error,
                        message: "Comparison failed".to_string(),
                    },
                );
                Ok(None)
            }
        }
    }

    // ==================== Search and ingest commands ====================

    /// Query the external catalog, replacing previous results wholesale. A
    /// response from a superseded query is dropped.
    pub async fn search(&self, query: &str) -> Result<()> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(());
        }
        let ticket = self.lock().search.begin(query);

        let outcome = self.api.search_catalog(query).await;

        let mut state = self.lock();
        match outcome {
            Ok(results) => {
                let count = results.len();
                if state.search.complete(ticket, results) {
                    Self::emit(&mut state, StoreEvent::SearchCompleted { count });
                } else {
                    tracing::debug!("dropping superseded search response");
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "catalog search failed");
                if state.search.fail(ticket) {
                    Self::emit(
                        &mut state,
                        StoreEvent::Notice {
                            severity: Severity::Error,
                            message: "Search failed".to_string(),
                        },
                    );
                }
            }
        }
        Ok(())
    }

    /// Import a catalog result into the active workspace. On success the
    /// search session is cleared (returning the user to the library view)
    /// and the paper collection reloads.
    pub async fn import_from_search(&self, result: &SearchResult) -> Result<()> {
        let scope = self.lock().active_id();

        let outcome = self
            .api
            .import_paper(&result.pdf_url, &result.title, scope)
            .await;

        match outcome {
            Ok(_) => {
                let (generation, scope) = {
                    let mut state = self.lock();
                    state.search.clear();
                    Self::emit(&mut state, StoreEvent::SearchCleared);
                    Self::emit(
                        &mut state,
                        StoreEvent::Notice {
                            severity: Severity::Success,
                            message: "Paper imported successfully".to_string(),
                        },
                    );
                    state.papers.begin_load();
                    (state.generation, state.active_id())
                };
                self.reload_papers(generation, scope).await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "import failed");
                self.notify(Severity::Error, "Import failed");
            }
        }
        Ok(())
    }

    /// Upload a PDF into the active workspace. Only `.pdf` filenames are
    /// accepted; the backend enforces the same rule.
    pub async fn upload(&self, filename: &str, bytes: Vec<u8>) -> Result<()> {
        if !filename.to_lowercase().ends_with(".pdf") {
            self.notify(Severity::Error, "Only PDF files are supported");
            return Ok(());
        }
        let scope = {
            let mut state = self.lock();
            if state.papers.is_uploading() {
                return Err(CoreError::InvalidOperation(
                    "an upload is already in progress".to_string(),
                ));
            }
            state.papers.begin_upload();
            state.active_id()
        };

        let outcome = self.api.upload_paper(filename, bytes, scope).await;

        match outcome {
            Ok(_) => {
                let (generation, scope) = {
                    let mut state = self.lock();
                    state.papers.end_upload();
                    Self::emit(
                        &mut state,
                        StoreEvent::Notice {
                            severity: Severity::Success,
                            message: "Paper uploaded successfully".to_string(),
                        },
                    );
                    state.papers.begin_load();
                    (state.generation, state.active_id())
                };
                self.reload_papers(generation, scope).await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "upload failed");
                let mut state = self.lock();
                state.papers.end_upload();
                Self::emit(
                    &mut state,
                    StoreEvent::Notice {
                        severity: Severity::Error,
                        message: "Upload failed".to_string(),
                    },
                );
            }
        }
        Ok(())
    }

    // ==================== Selection commands ====================

    /// Toggle a paper in the comparison selection. Ids outside the current
    /// collection are inert: they may be toggled but are pruned on the next
    /// reload.
    pub fn toggle_selection(&self, paper_id: i64) {
        let mut state = self.lock();
        state.selection.toggle(paper_id);
        let selected = state.selection.as_vec();
        let eligible = state.selection.is_eligible_for_comparison();
        Self::emit(&mut state, StoreEvent::SelectionChanged { selected, eligible });
    }

    pub fn clear_selection(&self) {
        let mut state = self.lock();
        state.selection.clear();
        Self::emit(
            &mut state,
            StoreEvent::SelectionChanged {
                selected: Vec::new(),
                eligible: false,
            },
        );
    }

    // ==================== Playback commands ====================

    /// Read a message aloud through the injected playback capability. Any
    /// previous playback is stopped first; only one is active at a time.
    pub fn play_message(&self, text: &str) -> Result<PlaybackId> {
        if let Some(previous) = self.lock().active_playback.take() {
            self.playback.stop(previous);
        }
        let id = self.playback.play(text)?;
        let mut state = self.lock();
        state.active_playback = Some(id);
        Self::emit(&mut state, StoreEvent::PlaybackStarted { id });
        Ok(id)
    }

    pub fn stop_playback(&self) {
        let id = self.lock().active_playback.take();
        if let Some(id) = id {
            self.playback.stop(id);
            let mut state = self.lock();
            Self::emit(&mut state, StoreEvent::PlaybackStopped);
        }
    }

    // ==================== Reload plumbing ====================

    async fn reload_collections(&self, generation: u64, scope: Option<i64>) {
        tokio::join!(
            self.reload_papers(generation, scope),
            self.reload_history(generation, scope),
        );
    }

    /// Fetch the paper list for `scope` and commit it if the store still
    /// points at the generation the fetch was dispatched under. Read
    /// failures keep the previous snapshot and are only logged.
    async fn reload_papers(&self, generation: u64, scope: Option<i64>) {
        let outcome = self.api.list_papers(scope).await;
        let mut state = self.lock();
        if state.generation != generation {
            tracing::debug!("dropping stale papers response");
            return;
        }
        match outcome {
            Ok(papers) => {
                state.papers.replace(papers);
                let before = state.selection.as_vec();
                let snapshot = state.papers.papers().to_vec();
                state.selection.retain_present(&snapshot);
                let selected = state.selection.as_vec();
                Self::emit(&mut state, StoreEvent::PapersReloaded);
                if selected != before {
                    let eligible = state.selection.is_eligible_for_comparison();
                    Self::emit(&mut state, StoreEvent::SelectionChanged { selected, eligible });
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to fetch papers");
                state.papers.load_failed();
            }
        }
    }

    async fn reload_history(&self, generation: u64, scope: Option<i64>) {
        let outcome = self.api.chat_history(scope).await;
        let mut state = self.lock();
        if state.generation != generation {
            tracing::debug!("dropping stale chat history response");
            return;
        }
        match outcome {
            Ok(messages) => {
                state.chat.replace(messages);
                Self::emit(&mut state, StoreEvent::ChatReloaded);
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to fetch chat history");
            }
        }
    }
}
