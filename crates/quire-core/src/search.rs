//! Transient catalog search session
//!
//! Decoupled from the active workspace: switching workspaces leaves results
//! in place, importing a result clears them. Each query gets a ticket; a
//! response only lands if its ticket is still the newest, so a slow
//! superseded query can never clobber a fresher one.

use quire_domain::SearchResult;

/// Ticket identifying one issued query.
pub type SearchTicket = u64;

#[derive(Debug, Clone, Default)]
pub struct SearchSession {
    query: String,
    results: Vec<SearchResult>,
    searching: bool,
    ticket: SearchTicket,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outgoing query and return its ticket.
    pub fn begin(&mut self, query: &str) -> SearchTicket {
        self.query = query.to_string();
        self.searching = true;
        self.ticket += 1;
        self.ticket
    }

    /// Replace results wholesale if the ticket is still current. Returns
    /// false when the response was superseded and dropped.
    pub fn complete(&mut self, ticket: SearchTicket, results: Vec<SearchResult>) -> bool {
        if ticket != self.ticket {
            return false;
        }
        self.results = results;
        self.searching = false;
        true
    }

    /// Clear the busy flag for a failed query, if still current.
    pub fn fail(&mut self, ticket: SearchTicket) -> bool {
        if ticket != self.ticket {
            return false;
        }
        self.searching = false;
        true
    }

    /// Drop results and query, returning to the library view.
    pub fn clear(&mut self) {
        self.query.clear();
        self.results.clear();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn is_searching(&self) -> bool {
        self.searching
    }
}
