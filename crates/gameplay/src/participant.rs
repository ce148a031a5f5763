use super::Kind;
use lgm_cards::Hand;
use lgm_cards::Principle;
use lgm_core::ID;
use lgm_core::Points;
use lgm_core::Unique;

/// One side of a battle: identity, hand, played set, and score.
///
/// Hand and score are mutated only through [`Battle::apply`]; score is
/// monotonically non-decreasing for the life of the session.
///
/// [`Battle::apply`]: super::battle::Battle::apply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    id: ID<Self>,
    kind: Kind,
    label: String,
    hand: Hand,
    played: Hand,
    score: Points,
}

impl Participant {
    pub fn new(id: ID<Self>, kind: Kind, label: String, hand: Hand) -> Self {
        Self {
            id,
            kind,
            label,
            hand,
            played: Hand::empty(),
            score: 0,
        }
    }
    /// Rebuilds a participant from persisted columns.
    pub fn restore(
        id: ID<Self>,
        kind: Kind,
        label: String,
        hand: Hand,
        played: Hand,
        score: Points,
    ) -> Self {
        Self {
            id,
            kind,
            label,
            hand,
            played,
            score,
        }
    }
    pub fn kind(&self) -> Kind {
        self.kind
    }
    pub fn label(&self) -> &str {
        &self.label
    }
    pub fn hand(&self) -> Hand {
        self.hand
    }
    pub fn played(&self) -> Hand {
        self.played
    }
    pub fn score(&self) -> Points {
        self.score
    }
    /// Commits an approved move: card moves hand → played, score accrues.
    /// Points are pre-clamped by the caller.
    pub(crate) fn approve(&mut self, card: Principle, points: Points) {
        self.hand.remove(card);
        self.played.insert(card);
        self.score += points;
    }
}

impl Unique for Participant {
    fn id(&self) -> ID<Self> {
        self.id
    }
}
