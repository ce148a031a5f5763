use super::Battle;
use super::Participant;
use lgm_cards::Principle;
use lgm_core::ID;
use lgm_core::Points;
use lgm_core::Seq;
use lgm_core::Side;
use std::time::SystemTime;

/// Committed move record. Append-only: never mutated after creation.
/// Composite key: (battle_id, seq). Doubles as the audit log and the source
/// for re-deriving hand/score state if ever needed.
#[derive(Debug, Clone)]
pub struct Plea {
    battle: ID<Battle>,
    seq: Seq,
    side: Side,
    participant: ID<Participant>,
    card: Principle,
    justification: String,
    approved: bool,
    points: Points,
    at: SystemTime,
}

impl Plea {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        battle: ID<Battle>,
        seq: Seq,
        side: Side,
        participant: ID<Participant>,
        card: Principle,
        justification: String,
        approved: bool,
        points: Points,
        at: SystemTime,
    ) -> Self {
        Self {
            battle,
            seq,
            side,
            participant,
            card,
            justification,
            approved,
            points,
            at,
        }
    }
    pub fn battle(&self) -> ID<Battle> {
        self.battle
    }
    pub fn seq(&self) -> Seq {
        self.seq
    }
    pub fn side(&self) -> Side {
        self.side
    }
    pub fn participant(&self) -> ID<Participant> {
        self.participant
    }
    pub fn card(&self) -> Principle {
        self.card
    }
    pub fn justification(&self) -> &str {
        &self.justification
    }
    pub fn approved(&self) -> bool {
        self.approved
    }
    pub fn points(&self) -> Points {
        self.points
    }
    pub fn at(&self) -> SystemTime {
        self.at
    }
}

impl std::fmt::Display for Plea {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "#{} S{} {} {} (+{})",
            self.seq,
            self.side,
            self.card,
            if self.approved { "approved" } else { "rejected" },
            self.points,
        )
    }
}
