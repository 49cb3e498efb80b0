//! Canonical domain models for the quire research-library client.
//!
//! These types mirror the backend's JSON surface one-to-one and are shared
//! between the synchronization core and any embedding UI. They carry no
//! behavior beyond cheap derived accessors; all lifecycle management lives
//! in `quire-core`.

pub mod message;
pub mod paper;
pub mod search_result;
pub mod workspace;

pub use message::*;
pub use paper::*;
pub use search_result::*;
pub use workspace::*;
