//! Async runtime for live principle-card battles.
//!
//! This crate is the imperative shell around the lgm-gameplay functional
//! core: it owns the live session registry, routes submissions through the
//! external judge, commits transitions to the store before installing them
//! in memory, and fans state-change hints out to watchers.
//!
//! ## Coordination
//!
//! - [`Arena`] — registry of live battles and the move pipeline entrypoint
//! - [`Table`] — one live battle: locked state plus a broadcast channel
//! - [`Directory`] — join-code issuance and lookup for waiting battles
//!
//! ## Wire
//!
//! - [`Event`] — internal state-change notifications
//! - [`ServerMessage`] — JSON wire format sent to watchers
//! - [`Protocol`] — event encoding and client-input parsing
//!
//! ## Participants
//!
//! - [`Advocate`] — pluggable automated-side move composer
//! - [`Zealot`] — stock automated advocate
mod advocate;
mod arena;
mod directory;
mod error;
mod event;
mod message;
mod protocol;
mod table;

pub use advocate::*;
pub use arena::*;
pub use directory::*;
pub use error::*;
pub use event::*;
pub use message::*;
pub use protocol::*;
pub use table::*;
