/// Battle lifecycle. Transitions are forward-only:
/// waiting → active (second party joins, exactly once) and
/// active → completed (a hand empties after an approved move, exactly once).
/// Completed is absorbing.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Status {
    Waiting = 0,
    Active = 1,
    Completed = 2,
}

/// i16 isomorphism, for persistence as a SMALLINT column.
impl From<Status> for i16 {
    fn from(s: Status) -> i16 {
        s as i16
    }
}
impl TryFrom<i16> for Status {
    type Error = String;
    fn try_from(n: i16) -> Result<Self, Self::Error> {
        match n {
            0 => Ok(Status::Waiting),
            1 => Ok(Status::Active),
            2 => Ok(Status::Completed),
            _ => Err(format!("invalid status: {}", n)),
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Status::Waiting => write!(f, "waiting"),
            Status::Active => write!(f, "active"),
            Status::Completed => write!(f, "completed"),
        }
    }
}
