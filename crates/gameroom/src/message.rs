use lgm_core::Points;
use lgm_core::Seq;
use lgm_core::Side;
use lgm_core::Unique;
use lgm_gameplay::Battle;
use lgm_gameplay::Plea;
use serde::Serialize;

/// Messages sent from server to watchers over WebSocket.
/// Every message carries enough sequencing context (`seq`) for clients to
/// discard stale frames and to know when to refetch the full snapshot.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Initial connection confirmation with the current session position.
    Connected {
        battle: String,
        status: String,
        seq: Seq,
        turn: Side,
    },
    /// The second party joined.
    Joined { side: Side, label: String },
    /// A committed move and its verdict.
    Judged {
        seq: Seq,
        side: Side,
        card: String,
        approved: bool,
        points: Points,
        feedback: String,
    },
    /// Whose move it is now.
    Turn { side: Side, seq: Seq },
    /// The battle is over.
    Completed { winner: Side, scores: Vec<Points> },
}

impl ServerMessage {
    pub fn connected(battle: &Battle) -> Self {
        Self::Connected {
            battle: battle.id().to_string(),
            status: battle.status().to_string(),
            seq: battle.seq(),
            turn: battle.turn(),
        }
    }
    pub fn joined(side: Side, label: &str) -> Self {
        Self::Joined {
            side,
            label: label.to_string(),
        }
    }
    pub fn judged(plea: &Plea, feedback: &str) -> Self {
        Self::Judged {
            seq: plea.seq(),
            side: plea.side(),
            card: plea.card().to_string(),
            approved: plea.approved(),
            points: plea.points(),
            feedback: feedback.to_string(),
        }
    }
    pub fn turn(side: Side, seq: Seq) -> Self {
        Self::Turn { side, seq }
    }
    pub fn completed(winner: Side, scores: Vec<Points>) -> Self {
        Self::Completed { winner, scores }
    }
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("serialize server message")
    }
}
