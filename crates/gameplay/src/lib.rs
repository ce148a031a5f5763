//! Battle session state machine and move pipeline core.
//!
//! Pure functional core for a principle-card battle: no IO, no channels, no
//! persistence. The imperative shell (lgm-gameroom) drives it and commits the
//! results.
//!
//! ## Session
//!
//! - [`Battle`] — the aggregate: mode, status, prompt, turn pointer, sides
//! - [`Participant`] — one side: hand, played set, monotonic score
//! - [`Mode`] / [`Status`] / [`Kind`] — participant topology and lifecycle
//!
//! ## Moves
//!
//! - [`Submission`] — a (card, justification) pair from one side
//! - [`Verdict`] — the judge's outcome: approved/rejected, points, feedback
//! - [`Plea`] — append-only committed move record
//! - [`BattleError`] — precondition and terminal-state violations
mod battle;
mod error;
mod kind;
mod mode;
mod participant;
mod plea;
mod prompt;
mod status;
mod submission;
mod verdict;

pub use battle::*;
pub use error::*;
pub use kind::*;
pub use mode::*;
pub use participant::*;
pub use plea::*;
pub use prompt::*;
pub use status::*;
pub use submission::*;
pub use verdict::*;
