use super::Kind;

/// Participant topology of a battle.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Mode {
    /// One human against an automated side. Starts active.
    Solo = 0,
    /// Two humans. Starts waiting for the second party to join by code.
    Duel = 1,
    /// Two teams. Starts waiting for the second party to join by code.
    Teams = 2,
    /// Two automated sides. Starts active and plays itself out.
    Exhibition = 3,
}

impl Mode {
    /// True for two-party modes that open in the waiting state and accept a
    /// join code. Solo and Exhibition enter active immediately.
    pub fn joinable(&self) -> bool {
        matches!(self, Mode::Duel | Mode::Teams)
    }
    /// Kind of the side that opens the battle.
    pub fn opener(&self) -> Kind {
        match self {
            Mode::Solo | Mode::Duel => Kind::Human,
            Mode::Teams => Kind::Team,
            Mode::Exhibition => Kind::Automated,
        }
    }
    /// Kind of the opposing side.
    pub fn joiner(&self) -> Kind {
        match self {
            Mode::Solo | Mode::Exhibition => Kind::Automated,
            Mode::Duel => Kind::Human,
            Mode::Teams => Kind::Team,
        }
    }
}

/// i16 isomorphism, for persistence as a SMALLINT column.
impl From<Mode> for i16 {
    fn from(m: Mode) -> i16 {
        m as i16
    }
}
impl TryFrom<i16> for Mode {
    type Error = String;
    fn try_from(n: i16) -> Result<Self, Self::Error> {
        match n {
            0 => Ok(Mode::Solo),
            1 => Ok(Mode::Duel),
            2 => Ok(Mode::Teams),
            3 => Ok(Mode::Exhibition),
            _ => Err(format!("invalid mode: {}", n)),
        }
    }
}

/// str isomorphism, for the HTTP surface.
impl TryFrom<&str> for Mode {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.trim().to_lowercase().as_str() {
            "solo" => Ok(Mode::Solo),
            "duel" => Ok(Mode::Duel),
            "teams" => Ok(Mode::Teams),
            "exhibition" => Ok(Mode::Exhibition),
            _ => Err(format!("invalid mode str: {}", s)),
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Mode::Solo => write!(f, "solo"),
            Mode::Duel => write!(f, "duel"),
            Mode::Teams => write!(f, "teams"),
            Mode::Exhibition => write!(f, "exhibition"),
        }
    }
}
