//! Principle card catalog, hands, and dealing.
//!
//! The unit of play is a [`Principle`]: an opaque symbolic token drawn from a
//! fixed 40-entry catalog. Sets of principles are represented as u64 bitmasks:
//!
//! - [`Hand`] — duplicate-free card set held or played by one side
//! - [`Deck`] — residual undealt pool, drawn down as sides are dealt in
//! - [`Dealer`] — randomized dealing behind an injected rng, so shuffles are
//!   seedable in tests
mod dealer;
mod deck;
mod hand;
mod principle;

pub use dealer::*;
pub use deck::*;
pub use hand::*;
pub use principle::*;
