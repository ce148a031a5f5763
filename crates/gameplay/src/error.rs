use lgm_cards::DealError;

/// Rule violations surfaced by the battle state machine.
///
/// Precondition violations (`NotActive`, `NotYourTurn`, `CardNotHeld`,
/// `EmptyJustification`) are rejected before the judge is consulted and never
/// consume a turn. `Completed` signals the caller's view is stale and should
/// be refreshed, not retried. `NotWaiting` is a join against a battle that
/// already has both parties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BattleError {
    NotWaiting,
    NotActive,
    Completed,
    NotYourTurn,
    CardNotHeld,
    EmptyJustification,
    Deck(DealError),
}

impl std::fmt::Display for BattleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotWaiting => write!(f, "battle is not waiting for a second party"),
            Self::NotActive => write!(f, "battle is not active"),
            Self::Completed => write!(f, "battle is completed"),
            Self::NotYourTurn => write!(f, "not this side's turn"),
            Self::CardNotHeld => write!(f, "card is not in this side's hand"),
            Self::EmptyJustification => write!(f, "justification must not be empty"),
            Self::Deck(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for BattleError {}

impl From<DealError> for BattleError {
    fn from(e: DealError) -> Self {
        Self::Deck(e)
    }
}
