//! Injected speech-playback capability
//!
//! The store never touches a concrete speech engine; it holds only the id
//! of the active playback. The embedding application supplies the engine,
//! headless contexts use [`NullPlayback`].

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Handle identifying one playback started through [`AudioPlayback::play`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlaybackId(Uuid);

impl PlaybackId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PlaybackId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PlaybackId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Error, Debug)]
pub enum PlaybackError {
    #[error("Playback unavailable: {message}")]
    Unavailable { message: String },
}

/// Capability for reading a message aloud.
pub trait AudioPlayback: Send + Sync {
    fn play(&self, text: &str) -> Result<PlaybackId, PlaybackError>;
    fn stop(&self, id: PlaybackId);
}

/// No-op playback engine for tests and headless embeddings.
pub struct NullPlayback;

impl AudioPlayback for NullPlayback {
    fn play(&self, _text: &str) -> Result<PlaybackId, PlaybackError> {
        Ok(PlaybackId::new())
    }

    fn stop(&self, _id: PlaybackId) {}
}
