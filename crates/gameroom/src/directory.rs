use super::ArenaError;
use lgm_core::CODE_LENGTH;
use lgm_core::CODE_RETRIES;
use lgm_core::ID;
use lgm_gameplay::Battle;
use rand::Rng;
use std::collections::HashMap;

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Human-shareable join code: fixed-length uppercase alphanumeric.
/// Client input is normalized to uppercase before lookup, so codes are
/// case-insensitive on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Code(String);

impl Code {
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let code = (0..CODE_LENGTH)
            .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
            .collect();
        Self(code)
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for Code {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let code = s.trim().to_uppercase();
        match code.len() == CODE_LENGTH && code.bytes().all(|b| ALPHABET.contains(&b)) {
            true => Ok(Self(code)),
            false => Err(format!("invalid join code: {}", s)),
        }
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// In-memory map from join codes to waiting battles.
///
/// A code is bound at open, resolved at join, and consumed by the first
/// successful joiner. Issuance retries on collision up to CODE_RETRIES;
/// exhaustion means the live-code space is effectively full.
#[derive(Default)]
pub struct Directory {
    codes: HashMap<Code, ID<Battle>>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn issue<R: Rng>(
        &mut self,
        battle: ID<Battle>,
        rng: &mut R,
    ) -> Result<Code, ArenaError> {
        for _ in 0..CODE_RETRIES {
            let code = Code::random(rng);
            if !self.codes.contains_key(&code) {
                self.codes.insert(code.clone(), battle);
                return Ok(code);
            }
        }
        log::error!("[directory] code space saturated at {} codes", self.codes.len());
        Err(ArenaError::Saturated)
    }
    pub fn lookup(&self, code: &Code) -> Option<ID<Battle>> {
        self.codes.get(code).copied()
    }
    pub fn consume(&mut self, code: &Code) -> Option<ID<Battle>> {
        self.codes.remove(code)
    }
    pub fn len(&self) -> usize {
        self.codes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn codes_normalize_case_and_whitespace() {
        let code = Code::try_from("  ab12cd ").unwrap();
        assert_eq!(code.as_str(), "AB12CD");
    }
    #[test]
    fn malformed_codes_are_rejected() {
        assert!(Code::try_from("SHORT").is_err());
        assert!(Code::try_from("TOOLONG1").is_err());
        assert!(Code::try_from("AB 1CD").is_err());
    }
    #[test]
    fn issued_code_resolves_until_consumed() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut directory = Directory::new();
        let battle = ID::default();
        let code = directory.issue(battle, &mut rng).unwrap();
        assert_eq!(directory.lookup(&code), Some(battle));
        assert_eq!(directory.consume(&code), Some(battle));
        assert_eq!(directory.lookup(&code), None);
        assert_eq!(directory.consume(&code), None);
    }
    #[test]
    fn issued_codes_are_unique() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut directory = Directory::new();
        let a = directory.issue(ID::default(), &mut rng).unwrap();
        let b = directory.issue(ID::default(), &mut rng).unwrap();
        assert_ne!(a, b);
        assert_eq!(directory.len(), 2);
    }
}
