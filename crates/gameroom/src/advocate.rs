use lgm_cards::Hand;
use lgm_cards::Principle;
use lgm_gameplay::Prompt;

/// Composes moves for automated sides.
///
/// Implementations only pick a card and write its justification; the move
/// then goes through the same validate/judge/commit pipeline as a human's,
/// so every invariant applies identically.
#[async_trait::async_trait]
pub trait Advocate: Send + Sync {
    /// Chooses a card from the hand and argues for it. None on an empty hand.
    async fn plead(&self, hand: Hand, prompt: &Prompt) -> Option<(Principle, String)>;
}

/// Stock automated advocate: a uniformly random card and a templated
/// argument tying it to the prompt.
#[derive(Default)]
pub struct Zealot;

#[async_trait::async_trait]
impl Advocate for Zealot {
    async fn plead(&self, hand: Hand, prompt: &Prompt) -> Option<(Principle, String)> {
        use rand::seq::IteratorRandom;
        let card = hand.iter().choose(&mut rand::rng())?;
        let justification = format!(
            "{} is the principle this calls for. {}",
            card,
            prompt.text()
        );
        Some((card, justification))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    fn prompt() -> Prompt {
        Prompt::new("Bread alone does not sustain".to_string(), None)
    }
    #[tokio::test]
    async fn zealot_plays_from_its_own_hand() {
        let hand = Hand::from(0b1011);
        let (card, justification) = Zealot.plead(hand, &prompt()).await.unwrap();
        assert!(hand.contains(card));
        assert!(!justification.trim().is_empty());
    }
    #[tokio::test]
    async fn zealot_folds_on_empty_hand() {
        assert!(Zealot.plead(Hand::empty(), &prompt()).await.is_none());
    }
}
