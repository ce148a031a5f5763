use lgm_core::Points;
use lgm_core::Seq;
use lgm_core::Side;
use lgm_gameplay::Plea;

/// State-change notifications fanned out to a battle's watchers.
/// These are hints, not state transfer: a watcher that misses one refetches
/// the snapshot rather than replaying events.
#[derive(Clone, Debug)]
pub enum Event {
    /// The second party joined and the battle went active.
    Joined { side: Side, label: String },
    /// A move was adjudicated and committed, approved or not.
    Judged { plea: Plea, feedback: String },
    /// The turn pointer after a committed move or join.
    Turn { side: Side, seq: Seq },
    /// A hand emptied; the battle is over.
    Completed { winner: Side, scores: Vec<Points> },
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Event::Joined { side, label } => write!(f, "S{} ({}) joined", side, label),
            Event::Judged { plea, .. } => write!(f, "{}", plea),
            Event::Turn { side, seq } => write!(f, "S{} to move (#{})", side, seq),
            Event::Completed { winner, scores } => {
                let s = scores
                    .iter()
                    .map(|p| p.to_string())
                    .collect::<Vec<_>>()
                    .join("-");
                write!(f, "S{} wins {}", winner, s)
            }
        }
    }
}
