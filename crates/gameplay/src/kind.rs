/// Tagged participant kind.
///
/// The move pipeline is kind-agnostic: every invariant applies identically to
/// humans, teams, and automated sides. Only the driver that decides who acts
/// next dispatches on this.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Kind {
    Human = 0,
    Automated = 1,
    Team = 2,
}

impl Kind {
    pub fn is_automated(&self) -> bool {
        matches!(self, Kind::Automated)
    }
}

/// i16 isomorphism, for persistence as a SMALLINT column.
impl From<Kind> for i16 {
    fn from(k: Kind) -> i16 {
        k as i16
    }
}
impl TryFrom<i16> for Kind {
    type Error = String;
    fn try_from(n: i16) -> Result<Self, Self::Error> {
        match n {
            0 => Ok(Kind::Human),
            1 => Ok(Kind::Automated),
            2 => Ok(Kind::Team),
            _ => Err(format!("invalid kind: {}", n)),
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Kind::Human => write!(f, "human"),
            Kind::Automated => write!(f, "automated"),
            Kind::Team => write!(f, "team"),
        }
    }
}
