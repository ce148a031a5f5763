/// A principle card: one opaque symbolic token from the fixed catalog.
///
/// Identity is the token value alone. The catalog is global and finite, so a
/// card is just an index into [`Principle::NAMES`], which keeps set operations
/// on [`Hand`] and [`Deck`] cheap bitmask arithmetic.
///
/// [`Hand`]: super::hand::Hand
/// [`Deck`]: super::deck::Deck
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Principle(u8);

impl Principle {
    /// Size of the fixed catalog.
    pub const COUNT: usize = 40;

    /// Catalog of unique symbolic tokens, in canonical order.
    #[rustfmt::skip]
    pub const NAMES: [&'static str; Self::COUNT] = [
        "Faith",          "Hope",           "Love",          "Grace",
        "Mercy",          "Justice",        "Wisdom",        "Humility",
        "Obedience",      "Sacrifice",      "Forgiveness",   "Redemption",
        "Covenant",       "Atonement",      "Repentance",    "Righteousness",
        "Holiness",       "Prayer",         "Worship",       "Stewardship",
        "Servanthood",    "Discipleship",   "Fellowship",    "Compassion",
        "Patience",       "Kindness",       "Gentleness",    "Self-Control",
        "Peace",          "Joy",            "Gratitude",     "Generosity",
        "Truth",          "Light",          "Salvation",     "Providence",
        "Sanctification", "Reconciliation", "Perseverance",  "Discernment",
    ];

    /// All catalog cards in canonical order.
    pub fn all() -> impl Iterator<Item = Principle> {
        (0..Self::COUNT as u8).map(Principle)
    }
    /// Display name of this token.
    pub fn name(&self) -> &'static str {
        Self::NAMES[self.0 as usize]
    }
}

/// u8 isomorphism
impl From<Principle> for u8 {
    fn from(p: Principle) -> u8 {
        p.0
    }
}
impl TryFrom<u8> for Principle {
    type Error = String;
    fn try_from(n: u8) -> Result<Self, Self::Error> {
        if (n as usize) < Self::COUNT {
            Ok(Principle(n))
        } else {
            Err(format!("invalid principle index: {}", n))
        }
    }
}

/// u64 bit representation, for Hand and Deck masks.
impl From<Principle> for u64 {
    fn from(p: Principle) -> u64 {
        1 << p.0
    }
}

/// str isomorphism, case-insensitive.
impl TryFrom<&str> for Principle {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let needle = s.trim();
        Self::NAMES
            .iter()
            .position(|name| name.eq_ignore_ascii_case(needle))
            .map(|i| Principle(i as u8))
            .ok_or_else(|| format!("invalid principle str: {}", s))
    }
}

impl std::fmt::Display for Principle {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl lgm_core::Arbitrary for Principle {
    fn random() -> Self {
        use rand::Rng;
        Principle(rand::rng().random_range(0..Self::COUNT as u8))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn catalog_names_are_unique() {
        let mut names = Principle::NAMES.to_vec();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), Principle::COUNT);
    }
    #[test]
    fn str_roundtrip_is_case_insensitive() {
        for card in Principle::all() {
            let upper = card.name().to_uppercase();
            assert_eq!(card, Principle::try_from(upper.as_str()).unwrap());
        }
    }
    #[test]
    fn unknown_str_is_rejected() {
        assert!(Principle::try_from("Hubris").is_err());
    }
    #[test]
    fn u8_bounds_are_enforced() {
        assert!(Principle::try_from(Principle::COUNT as u8).is_err());
        assert!(Principle::try_from(0u8).is_ok());
    }
    #[test]
    fn random_cards_are_catalog_members() {
        use lgm_core::Arbitrary;
        for _ in 0..64 {
            let card = Principle::random();
            assert!(Principle::all().any(|c| c == card));
        }
    }
    #[test]
    fn bits_are_distinct() {
        let mut mask = 0u64;
        for card in Principle::all() {
            assert_eq!(mask & u64::from(card), 0);
            mask |= u64::from(card);
        }
        assert_eq!(mask.count_ones() as usize, Principle::COUNT);
    }
}
