use lgm_cards::Principle;
use lgm_core::Side;

/// A move as submitted: acting side, card, free-text justification.
/// Identical for human and automated participants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    side: Side,
    card: Principle,
    justification: String,
}

impl Submission {
    pub fn new(side: Side, card: Principle, justification: String) -> Self {
        Self {
            side,
            card,
            justification,
        }
    }
    pub fn side(&self) -> Side {
        self.side
    }
    pub fn card(&self) -> Principle {
        self.card
    }
    pub fn justification(&self) -> &str {
        &self.justification
    }
}

impl std::fmt::Display for Submission {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "S{} plays {}", self.side, self.card)
    }
}
