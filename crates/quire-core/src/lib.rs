//! quire-core: workspace state synchronization for the quire
//! research-library client
//!
//! This library provides the non-view core of the client:
//! - LibraryStore: the coordinator owning the active workspace and keeping
//!   papers, chat history, and the comparison selection consistent across
//!   workspace switches (with stale-response guarding)
//! - Knowledge-graph derivation from paper metadata (hub + membership +
//!   shared-author edges)
//! - Typed client for the backend REST surface behind a trait seam
//! - Injected speech-playback capability
//!
//! The embedding UI subscribes to store events and re-reads snapshots; it
//! never mutates state directly.

pub mod api;
pub mod chat;
pub mod collection;
pub mod config;
pub mod error;
pub mod event;
pub mod graph;
pub mod http;
pub mod playback;
pub mod search;
pub mod selection;
pub mod store;

// Re-export main types for convenience
pub use api::{ApiError, AskReply, CompareReply, HttpResearchApi, IngestReply, ResearchApi};
pub use chat::{ChatSession, AI_ERROR_REPLY};
pub use collection::PaperCollection;
pub use config::{ClientConfig, ConfigError};
pub use error::{CoreError, Result};
pub use event::{Severity, StoreEvent};
pub use graph::{build_graph, EdgeKind, Graph, GraphEdge, GraphNode, NodeKind, HUB_NODE_ID};
pub use http::{HttpClient, HttpError};
pub use playback::{AudioPlayback, NullPlayback, PlaybackError, PlaybackId};
pub use search::{SearchSession, SearchTicket};
pub use selection::{SelectionSet, COMPARISON_MIN};
pub use store::{LibraryStore, DEFAULT_HUB_LABEL};

// Domain models are re-exported so embedders can depend on one crate.
pub use quire_domain::{Message, Paper, Role, SearchResult, Workspace};
