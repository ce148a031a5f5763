use serde::Deserialize;
use serde::Serialize;

/// The narrative prompt every justification in a battle must address.
/// Free text plus an optional structured reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    text: String,
    reference: Option<String>,
}

impl Prompt {
    pub fn new(text: String, reference: Option<String>) -> Self {
        Self { text, reference }
    }
    pub fn text(&self) -> &str {
        &self.text
    }
    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }
}

impl std::fmt::Display for Prompt {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match &self.reference {
            Some(r) => write!(f, "{} ({})", self.text, r),
            None => write!(f, "{}", self.text),
        }
    }
}
