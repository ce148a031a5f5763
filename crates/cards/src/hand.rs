use super::Principle;

/// A duplicate-free set of principle cards as a u64 bitmask.
///
/// Bit i set means catalog card i is present. Within one battle, every card
/// lives in exactly one place: some side's Hand, some side's Played set, or
/// the residual [`Deck`] — the masks partition the catalog.
///
/// [`Deck`]: super::deck::Deck
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hand(u64);

impl Hand {
    /// The empty hand.
    pub fn empty() -> Self {
        Self(0)
    }
    pub fn contains(&self, card: Principle) -> bool {
        self.0 & u64::from(card) != 0
    }
    pub fn insert(&mut self, card: Principle) {
        self.0 |= u64::from(card);
    }
    pub fn remove(&mut self, card: Principle) {
        self.0 &= !u64::from(card);
    }
    /// Number of cards held.
    pub fn size(&self) -> usize {
        self.0.count_ones() as usize
    }
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
    /// True when no card appears in both hands.
    pub fn disjoint(&self, other: &Hand) -> bool {
        self.0 & other.0 == 0
    }
    /// Set union, used for partition checks.
    pub fn union(&self, other: &Hand) -> Hand {
        Hand(self.0 | other.0)
    }
    /// Cards in canonical catalog order.
    pub fn iter(&self) -> impl Iterator<Item = Principle> + '_ {
        Principle::all().filter(|card| self.contains(*card))
    }
}

/// u64 isomorphism, for persistence as a BIGINT column.
impl From<u64> for Hand {
    fn from(mask: u64) -> Self {
        Self(mask & ((1 << Principle::COUNT) - 1))
    }
}
impl From<Hand> for u64 {
    fn from(hand: Hand) -> u64 {
        hand.0
    }
}

impl FromIterator<Principle> for Hand {
    fn from_iter<I: IntoIterator<Item = Principle>>(iter: I) -> Self {
        let mut hand = Hand::empty();
        for card in iter {
            hand.insert(card);
        }
        hand
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}",
            self.iter()
                .map(|c| c.name())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    fn card(i: u8) -> Principle {
        Principle::try_from(i).unwrap()
    }
    #[test]
    fn insert_remove_contains() {
        let mut hand = Hand::empty();
        hand.insert(card(3));
        assert!(hand.contains(card(3)));
        assert_eq!(hand.size(), 1);
        hand.remove(card(3));
        assert!(hand.is_empty());
    }
    #[test]
    fn insert_is_idempotent() {
        let mut hand = Hand::empty();
        hand.insert(card(7));
        hand.insert(card(7));
        assert_eq!(hand.size(), 1);
    }
    #[test]
    fn disjointness() {
        let a = Hand::from_iter([card(0), card(1)]);
        let b = Hand::from_iter([card(2), card(3)]);
        let c = Hand::from_iter([card(1), card(2)]);
        assert!(a.disjoint(&b));
        assert!(!a.disjoint(&c));
    }
    #[test]
    fn u64_roundtrip_masks_out_of_catalog_bits() {
        let hand = Hand::from(u64::MAX);
        assert_eq!(hand.size(), Principle::COUNT);
    }
}
