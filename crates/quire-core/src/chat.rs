//! Per-workspace chat session state
//!
//! Pure state transitions only; the store drives the async request flow and
//! decides whether a response still applies (stale responses never reach
//! these methods).

use quire_domain::Message;

/// Literal assistant reply appended when the backend call fails. The
/// optimistic user message is never retracted.
pub const AI_ERROR_REPLY: &str = "Error communicating with AI.";

/// Ordered message log plus in-flight request state for one workspace.
/// Replaced wholesale whenever the active workspace changes.
#[derive(Debug, Clone, Default)]
pub struct ChatSession {
    messages: Vec<Message>,
    pending: bool,
    comparing: bool,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the log with freshly fetched history.
    pub fn replace(&mut self, messages: Vec<Message>) {
        self.messages = messages;
        self.pending = false;
        self.comparing = false;
    }

    /// Optimistically append the user message and mark a request as
    /// outstanding. Caller must check `is_pending` first.
    pub fn begin_send(&mut self, text: &str) -> Message {
        let message = Message::user(text);
        self.messages.push(message.clone());
        self.pending = true;
        message
    }

    /// Append the assistant reply for the outstanding request.
    pub fn complete(&mut self, content: String) -> Message {
        let message = Message::assistant(content);
        self.messages.push(message.clone());
        self.pending = false;
        message
    }

    /// Append the fixed error reply for the outstanding request.
    pub fn fail(&mut self) -> Message {
        self.complete(AI_ERROR_REPLY.to_string())
    }

    pub fn begin_compare(&mut self) {
        self.comparing = true;
    }

    pub fn end_compare(&mut self) {
        self.comparing = false;
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn is_comparing(&self) -> bool {
        self.comparing
    }
}
