//! External judge collaborator.
//!
//! Every submitted move is adjudicated by a judge outside this process. The
//! engine treats it as fallible and slow: calls are bounded by a timeout, and
//! any failure is surfaced as retryable because nothing is committed until a
//! verdict lands.
//!
//! - [`Judge`] — the collaborator seam
//! - [`HttpJudge`] — production client posting to `JUDGE_URL`
//! - [`ScriptedJudge`] / [`Approving`] — test and exhibition doubles
mod http;
mod script;

pub use http::*;
pub use script::*;

use lgm_cards::Principle;
use lgm_gameplay::Prompt;
use lgm_gameplay::Verdict;

/// Failures of the judge collaborator. All variants are transient: the move
/// was not committed and the identical submission is safe to resubmit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JudgeError {
    Timeout,
    Transport(String),
    Malformed(String),
}

impl std::fmt::Display for JudgeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Timeout => write!(f, "judge timed out"),
            Self::Transport(s) => write!(f, "judge transport error: {}", s),
            Self::Malformed(s) => write!(f, "malformed judge response: {}", s),
        }
    }
}

impl std::error::Error for JudgeError {}

/// Adjudicates one submission against the session prompt.
///
/// Implementations must be side-effect free with respect to battle state:
/// the pipeline owns all commits. The verdict's points total is treated as
/// untrusted and clamped downstream.
#[async_trait::async_trait]
pub trait Judge: Send + Sync {
    async fn review(
        &self,
        prompt: &Prompt,
        card: Principle,
        justification: &str,
    ) -> Result<Verdict, JudgeError>;
}
