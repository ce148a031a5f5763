use lgm_database::PgErr;
use lgm_gameplay::BattleError;
use lgm_judge::JudgeError;

/// Failures surfaced by the live-battle coordinator.
///
/// `Conflict` means another submission committed first against the same turn
/// pointer; the caller should refetch and retry if it still holds the turn.
/// `Rule` is a synchronous precondition rejection that consumed nothing.
#[derive(Debug)]
pub enum ArenaError {
    /// No live battle (or join code) under that identifier.
    NotFound,
    /// Join-code space exhausted after the retry budget.
    Saturated,
    /// Lost an optimistic race against a concurrent commit.
    Conflict,
    Rule(BattleError),
    Judge(JudgeError),
    Store(PgErr),
}

impl std::fmt::Display for ArenaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(f, "battle not found"),
            Self::Saturated => write!(f, "could not issue a unique join code"),
            Self::Conflict => write!(f, "another move committed first"),
            Self::Rule(e) => write!(f, "{}", e),
            Self::Judge(e) => write!(f, "{}", e),
            Self::Store(e) => write!(f, "store error: {}", e),
        }
    }
}

impl std::error::Error for ArenaError {}

impl From<BattleError> for ArenaError {
    fn from(e: BattleError) -> Self {
        Self::Rule(e)
    }
}
impl From<JudgeError> for ArenaError {
    fn from(e: JudgeError) -> Self {
        Self::Judge(e)
    }
}
impl From<PgErr> for ArenaError {
    fn from(e: PgErr) -> Self {
        Self::Store(e)
    }
}
