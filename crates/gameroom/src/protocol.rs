use super::*;
use lgm_cards::Principle;
use lgm_gameplay::Mode;

/// Errors that can occur while parsing client input.
#[derive(Debug, Clone)]
pub enum ProtocolError {
    UnknownCard(String),
    UnknownMode(String),
}

impl std::fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownCard(s) => write!(f, "unknown card: {}", s),
            Self::UnknownMode(s) => write!(f, "unknown mode: {}", s),
        }
    }
}

impl std::error::Error for ProtocolError {}

/// Handles Event to ServerMessage conversion and client-input parsing.
/// Centralizes the protocol layer between internal events and wire format.
pub struct Protocol;

impl Protocol {
    /// Converts an internal Event to a wire ServerMessage.
    pub fn encode(event: &Event) -> ServerMessage {
        match event {
            Event::Joined { side, label } => ServerMessage::joined(*side, label),
            Event::Judged { plea, feedback } => ServerMessage::judged(plea, feedback),
            Event::Turn { side, seq } => ServerMessage::turn(*side, *seq),
            Event::Completed { winner, scores } => {
                ServerMessage::completed(*winner, scores.clone())
            }
        }
    }
    /// Parses a client card name into a Principle.
    pub fn card(s: &str) -> Result<Principle, ProtocolError> {
        Principle::try_from(s).map_err(|_| ProtocolError::UnknownCard(s.to_string()))
    }
    /// Parses a client mode name into a Mode.
    pub fn mode(s: &str) -> Result<Mode, ProtocolError> {
        Mode::try_from(s).map_err(|_| ProtocolError::UnknownMode(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn card_parsing_is_case_insensitive() {
        assert!(Protocol::card("Faith").is_ok());
        assert!(Protocol::card("faith").is_ok());
        assert!(Protocol::card("SELF-CONTROL").is_ok());
    }
    #[test]
    fn unknown_card_is_rejected() {
        assert!(Protocol::card("Bluff").is_err());
        assert!(Protocol::card("").is_err());
    }
    #[test]
    fn mode_parsing() {
        assert_eq!(Protocol::mode("duel").unwrap(), Mode::Duel);
        assert!(Protocol::mode("tournament").is_err());
    }
    #[test]
    fn judged_event_serializes_with_tag() {
        let plea = lgm_gameplay::Plea::new(
            lgm_core::ID::default(),
            0,
            0,
            lgm_core::ID::default(),
            Protocol::card("Hope").unwrap(),
            "it endures".to_string(),
            true,
            3,
            std::time::SystemTime::now(),
        );
        let json = Protocol::encode(&Event::Judged {
            plea,
            feedback: "well argued".to_string(),
        })
        .to_json();
        assert!(json.contains("\"type\":\"judged\""));
        assert!(json.contains("\"card\":\"Hope\""));
        assert!(json.contains("\"points\":3"));
    }
}
