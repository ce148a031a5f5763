use super::Hand;
use super::Principle;

/// The residual undealt pool of a battle.
///
/// Starts as the full catalog and only shrinks: initial deals draw from it,
/// and a late-joining side in two-party modes draws its hand from what
/// remains. The deck never receives cards back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deck(Hand);

impl Deck {
    /// The full catalog, before any card is dealt.
    pub fn full() -> Self {
        Self(Principle::all().collect())
    }
    /// Cards still available to deal.
    pub fn remaining(&self) -> usize {
        self.0.size()
    }
    pub fn contains(&self, card: Principle) -> bool {
        self.0.contains(card)
    }
    /// Residual pool as a card set.
    pub fn cards(&self) -> Hand {
        self.0
    }
    /// Removes a dealt card. Dealing is strictly without replacement.
    pub(crate) fn take(&mut self, card: Principle) {
        self.0.remove(card);
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::full()
    }
}

/// u64 isomorphism, for persistence as a BIGINT column.
impl From<u64> for Deck {
    fn from(mask: u64) -> Self {
        Self(Hand::from(mask))
    }
}
impl From<Deck> for u64 {
    fn from(deck: Deck) -> u64 {
        deck.0.into()
    }
}
