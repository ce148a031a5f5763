use lgm_core::Points;
use lgm_core::Seq;
use lgm_core::Side;
use lgm_core::Unique;
use lgm_gameplay::Battle;
use lgm_gameplay::Participant;
use lgm_gameplay::Plea;
use lgm_gameplay::Verdict;
use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Deserialize)]
pub struct OpenRequest {
    pub mode: String,
    pub prompt: String,
    #[serde(default)]
    pub reference: Option<String>,
    pub label: String,
}

#[derive(Debug, Serialize)]
pub struct OpenResponse {
    pub battle_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct JoinRequest {
    pub label: String,
}

#[derive(Debug, Serialize)]
pub struct JoinResponse {
    pub battle_id: String,
    pub side: Side,
}

#[derive(Debug, Deserialize)]
pub struct PleaRequest {
    pub side: Side,
    pub card: String,
    pub justification: String,
}

#[derive(Debug, Serialize)]
pub struct PleaResponse {
    pub seq: Seq,
    pub side: Side,
    pub card: String,
    pub approved: bool,
    pub points: Points,
    pub feedback: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<Side>,
}

impl PleaResponse {
    pub fn new(battle: &Battle, plea: &Plea, verdict: &Verdict) -> Self {
        Self {
            seq: plea.seq(),
            side: plea.side(),
            card: plea.card().to_string(),
            approved: plea.approved(),
            points: plea.points(),
            feedback: verdict.feedback().to_string(),
            status: battle.status().to_string(),
            winner: battle.winner(),
        }
    }
}

/// Full session snapshot as returned by GET. Both hands are included; the
/// client is trusted to render only its own, matching the session model
/// where participants share one screen or one fetch each.
#[derive(Debug, Serialize)]
pub struct BattleView {
    pub id: String,
    pub mode: String,
    pub status: String,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    pub turn: Side,
    pub seq: Seq,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<Side>,
    pub participants: Vec<ParticipantView>,
}

#[derive(Debug, Serialize)]
pub struct ParticipantView {
    pub side: Side,
    pub label: String,
    pub kind: String,
    pub hand: Vec<String>,
    pub played: Vec<String>,
    pub score: Points,
}

impl From<&Battle> for BattleView {
    fn from(battle: &Battle) -> Self {
        Self {
            id: battle.id().to_string(),
            mode: battle.mode().to_string(),
            status: battle.status().to_string(),
            prompt: battle.prompt().text().to_string(),
            reference: battle.prompt().reference().map(String::from),
            turn: battle.turn(),
            seq: battle.seq(),
            winner: battle.winner(),
            participants: battle
                .participants()
                .iter()
                .enumerate()
                .map(|(side, p)| ParticipantView::view(side, p))
                .collect(),
        }
    }
}

impl ParticipantView {
    fn view(side: Side, participant: &Participant) -> Self {
        Self {
            side,
            label: participant.label().to_string(),
            kind: participant.kind().to_string(),
            hand: participant.hand().iter().map(|c| c.to_string()).collect(),
            played: participant.played().iter().map(|c| c.to_string()).collect(),
            score: participant.score(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PleaRecord {
    pub seq: Seq,
    pub side: Side,
    pub card: String,
    pub justification: String,
    pub approved: bool,
    pub points: Points,
}

impl From<&Plea> for PleaRecord {
    fn from(plea: &Plea) -> Self {
        Self {
            seq: plea.seq(),
            side: plea.side(),
            card: plea.card().to_string(),
            justification: plea.justification().to_string(),
            approved: plea.approved(),
            points: plea.points(),
        }
    }
}
