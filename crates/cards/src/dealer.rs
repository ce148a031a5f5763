use super::Deck;
use super::Hand;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::IteratorRandom;

/// Dealing failed because the request exceeds the residual pool.
/// This is a setup configuration error: fail closed, never retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DealError {
    Exhausted { requested: usize, remaining: usize },
}

impl std::fmt::Display for DealError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exhausted {
                requested,
                remaining,
            } => write!(
                f,
                "deal exhausted: requested {} with {} remaining",
                requested, remaining
            ),
        }
    }
}

impl std::error::Error for DealError {}

/// Randomized dealer over an injected rng.
///
/// Callers in production construct it from OS entropy so shuffles are not
/// predictable from the participant side; tests seed it for determinism.
#[derive(Debug)]
pub struct Dealer<R: Rng> {
    rng: R,
}

impl Dealer<SmallRng> {
    /// Production dealer seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self::new(SmallRng::from_os_rng())
    }
    /// Deterministic dealer for tests.
    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Dealer<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
    /// Draws n cards from the deck without replacement.
    pub fn draw(&mut self, deck: &mut Deck, n: usize) -> Result<Hand, DealError> {
        if n > deck.remaining() {
            return Err(DealError::Exhausted {
                requested: n,
                remaining: deck.remaining(),
            });
        }
        let drawn = deck
            .cards()
            .iter()
            .choose_multiple(&mut self.rng, n)
            .into_iter()
            .collect::<Hand>();
        for card in drawn.iter() {
            deck.take(card);
        }
        Ok(drawn)
    }
    /// Deals pairwise-disjoint hands of n cards to each of `sides` sides.
    /// Fails closed before mutating the deck if the total exceeds the pool.
    pub fn partition(
        &mut self,
        deck: &mut Deck,
        sides: usize,
        n: usize,
    ) -> Result<Vec<Hand>, DealError> {
        if sides * n > deck.remaining() {
            return Err(DealError::Exhausted {
                requested: sides * n,
                remaining: deck.remaining(),
            });
        }
        (0..sides).map(|_| self.draw(deck, n)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::Principle;
    use lgm_core::HAND_SIZE;

    #[test]
    fn two_hands_of_seven_are_disjoint() {
        let mut deck = Deck::full();
        let mut dealer = Dealer::seeded(7);
        let hands = dealer.partition(&mut deck, 2, HAND_SIZE).unwrap();
        assert_eq!(hands.len(), 2);
        assert!(hands.iter().all(|h| h.size() == HAND_SIZE));
        assert!(hands[0].disjoint(&hands[1]));
        assert_eq!(deck.remaining(), Principle::COUNT - 2 * HAND_SIZE);
    }
    #[test]
    fn dealt_cards_leave_the_deck() {
        let mut deck = Deck::full();
        let mut dealer = Dealer::seeded(11);
        let hand = dealer.draw(&mut deck, HAND_SIZE).unwrap();
        assert!(hand.iter().all(|c| !deck.contains(c)));
        assert!(hand.disjoint(&deck.cards()));
    }
    #[test]
    fn exhaustion_fails_closed() {
        let mut deck = Deck::full();
        let mut dealer = Dealer::seeded(13);
        let err = dealer.partition(&mut deck, 6, HAND_SIZE).unwrap_err();
        assert_eq!(
            err,
            DealError::Exhausted {
                requested: 42,
                remaining: 40
            }
        );
        // nothing was consumed
        assert_eq!(deck.remaining(), Principle::COUNT);
    }
    #[test]
    fn seeded_deals_are_reproducible() {
        let deal = |seed| {
            let mut deck = Deck::full();
            Dealer::seeded(seed).partition(&mut deck, 2, HAND_SIZE).unwrap()
        };
        assert_eq!(deal(42), deal(42));
    }
    #[test]
    fn draw_from_residual_is_disjoint_with_prior_hands() {
        let mut deck = Deck::full();
        let mut dealer = Dealer::seeded(17);
        let first = dealer.draw(&mut deck, HAND_SIZE).unwrap();
        let late = dealer.draw(&mut deck, HAND_SIZE).unwrap();
        assert!(first.disjoint(&late));
    }
}
