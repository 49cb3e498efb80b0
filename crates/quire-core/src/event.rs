//! Events emitted by the store when observable state changes.
//!
//! Subscribers receive these over a channel (see `LibraryStore::subscribe`)
//! and re-read the snapshots they care about; events carry just enough
//! payload to render transient UI (notices, comparisons) directly.

use serde::{Deserialize, Serialize};

use quire_domain::{Message, Workspace};

use crate::playback::PlaybackId;

/// Severity of a transient notice. Notices are auto-dismissing; nothing in
/// the store blocks on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// Events emitted by the store when state changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StoreEvent {
    /// The cached workspace list was replaced or edited.
    WorkspaceListChanged,
    /// The active workspace changed; dependent collections are reloading.
    ActiveWorkspaceChanged { workspace: Option<Workspace> },
    /// The paper collection was replaced wholesale.
    PapersReloaded,
    /// The chat log was replaced wholesale from history.
    ChatReloaded,
    /// A single message was appended to the chat log.
    MessageAppended { message: Message },
    /// Titles of the papers the assistant grounded its last answer on.
    ContextUsed { titles: Vec<String> },
    /// A comparison of the selected papers is ready.
    ComparisonReady { comparison: String },
    /// A catalog search completed and replaced the result list.
    SearchCompleted { count: usize },
    /// Search results and query were cleared.
    SearchCleared,
    /// The comparison selection changed.
    SelectionChanged { selected: Vec<i64>, eligible: bool },
    /// Transient, auto-dismissing notification.
    Notice { severity: Severity, message: String },
    /// Speech playback started for a message.
    PlaybackStarted { id: PlaybackId },
    /// Speech playback stopped.
    PlaybackStopped,
}
