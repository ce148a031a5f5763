use super::*;
use lgm_cards::Deck;
use lgm_cards::Hand;
use lgm_cards::Principle;
use lgm_core::ID;
use lgm_core::Side;
use lgm_core::Unique;
use lgm_gameplay::Battle;
use lgm_gameplay::Kind;
use lgm_gameplay::Mode;
use lgm_gameplay::Participant;
use lgm_gameplay::Plea;
use lgm_gameplay::Prompt;
use lgm_gameplay::Status;
use std::sync::Arc;
use tokio_postgres::Client;
use tokio_postgres::Row;

/// Repository trait for battle persistence.
///
/// Every write is a single data-modifying-CTE statement: either every effect
/// lands or none does. `commit_move` and `activate` are additionally guarded
/// on the battle row, where zero rows affected signals a lost optimistic race.
#[allow(async_fn_in_trait)]
pub trait BattleRepository {
    /// Inserts the battle row and its opening roster in one statement, so a
    /// failure mid-create never leaves an orphan battle without participants.
    async fn create_battle(&self, battle: &Battle) -> Result<(), PgErr>;
    /// Atomically records a judged move: plea insert, participant update, and
    /// battle row advance, all guarded by `(id, seq, status = active)`.
    /// Returns false when the guard did not match (stale turn pointer).
    async fn commit_move(&self, next: &Battle, plea: &Plea) -> Result<bool, PgErr>;
    /// Atomically records a second party joining: participant insert plus the
    /// waiting → active battle transition, guarded by `status = waiting`.
    /// Returns false when the battle was not waiting.
    async fn activate(&self, next: &Battle, joiner: &Participant, side: Side)
    -> Result<bool, PgErr>;
    async fn get_battle(&self, id: ID<Battle>) -> Result<Option<Battle>, PgErr>;
    async fn get_pleas(&self, id: ID<Battle>) -> Result<Vec<Plea>, PgErr>;
    async fn create_code(&self, code: &str, battle: ID<Battle>) -> Result<(), PgErr>;
    async fn lookup_code(&self, code: &str) -> Result<Option<ID<Battle>>, PgErr>;
    async fn consume_code(&self, code: &str) -> Result<(), PgErr>;
}

fn participant_row(row: &Row) -> Participant {
    Participant::restore(
        ID::from(row.get::<_, uuid::Uuid>(0)),
        Kind::try_from(row.get::<_, i16>(1)).expect("valid kind column"),
        row.get::<_, String>(2),
        Hand::from(row.get::<_, i64>(3) as u64),
        Hand::from(row.get::<_, i64>(4) as u64),
        row.get(5),
    )
}

impl BattleRepository for Arc<Client> {
    async fn create_battle(&self, battle: &Battle) -> Result<(), PgErr> {
        let roster = battle.participants();
        let ids = roster.iter().map(|p| p.id().inner()).collect::<Vec<_>>();
        let sides = (0..roster.len() as i16).collect::<Vec<_>>();
        let kinds = roster.iter().map(|p| i16::from(p.kind())).collect::<Vec<_>>();
        let labels = roster.iter().map(|p| p.label()).collect::<Vec<_>>();
        let hands = roster
            .iter()
            .map(|p| u64::from(p.hand()) as i64)
            .collect::<Vec<_>>();
        let played = roster
            .iter()
            .map(|p| u64::from(p.played()) as i64)
            .collect::<Vec<_>>();
        let scores = roster.iter().map(|p| p.score()).collect::<Vec<_>>();
        self.execute(
            const_format::concatcp!(
                "WITH created AS (
                    INSERT INTO ",
                BATTLES,
                " (id, mode, status, prompt, reference, deck, turn, seq, winner)
                    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                )
                INSERT INTO ",
                PARTICIPANTS,
                " (id, battle_id, side, kind, label, hand, played, score)
                SELECT p.id, $1, p.side, p.kind, p.label, p.hand, p.played, p.score
                FROM UNNEST($10::uuid[], $11::smallint[], $12::smallint[], $13::text[],
                            $14::bigint[], $15::bigint[], $16::smallint[])
                     AS p (id, side, kind, label, hand, played, score)"
            ),
            &[
                &battle.id().inner(),
                &i16::from(battle.mode()),
                &i16::from(battle.status()),
                &battle.prompt().text(),
                &battle.prompt().reference(),
                &(u64::from(battle.deck()) as i64),
                &(battle.turn() as i16),
                &battle.seq(),
                &battle.winner().map(|w| w as i16),
                &ids,
                &sides,
                &kinds,
                &labels,
                &hands,
                &played,
                &scores,
            ],
        )
        .await
        .map(|_| ())
    }
    async fn commit_move(&self, next: &Battle, plea: &Plea) -> Result<bool, PgErr> {
        let actor = &next.participants()[plea.side()];
        self.execute(
            const_format::concatcp!(
                "WITH target AS (
                    SELECT id FROM ",
                BATTLES,
                " WHERE id = $1 AND seq = $2 AND status = 1 FOR UPDATE
                ), recorded AS (
                    INSERT INTO ",
                PLEAS,
                " (battle_id, seq, side, participant_id, card, justification, approved, points, at)
                    SELECT $1, $2, $3, $4, $5, $6, $7, $8, $9 FROM target
                ), acted AS (
                    UPDATE ",
                PARTICIPANTS,
                " p SET hand = $10, played = $11, score = $12
                    FROM target t WHERE p.id = $4
                )
                UPDATE ",
                BATTLES,
                " b SET status = $13, turn = $14, seq = $15, winner = $16
                FROM target t WHERE b.id = t.id"
            ),
            &[
                &plea.battle().inner(),
                &plea.seq(),
                &(plea.side() as i16),
                &plea.participant().inner(),
                &(u8::from(plea.card()) as i16),
                &plea.justification(),
                &plea.approved(),
                &plea.points(),
                &plea.at(),
                &(u64::from(actor.hand()) as i64),
                &(u64::from(actor.played()) as i64),
                &actor.score(),
                &i16::from(next.status()),
                &(next.turn() as i16),
                &next.seq(),
                &next.winner().map(|w| w as i16),
            ],
        )
        .await
        .map(|rows| rows == 1)
    }
    async fn activate(
        &self,
        next: &Battle,
        joiner: &Participant,
        side: Side,
    ) -> Result<bool, PgErr> {
        self.execute(
            const_format::concatcp!(
                "WITH target AS (
                    SELECT id FROM ",
                BATTLES,
                " WHERE id = $1 AND status = 0 FOR UPDATE
                ), joined AS (
                    INSERT INTO ",
                PARTICIPANTS,
                " (id, battle_id, side, kind, label, hand, played, score)
                    SELECT $2, $1, $3, $4, $5, $6, $7, $8 FROM target
                )
                UPDATE ",
                BATTLES,
                " b SET status = 1, deck = $9 FROM target t WHERE b.id = t.id"
            ),
            &[
                &next.id().inner(),
                &joiner.id().inner(),
                &(side as i16),
                &i16::from(joiner.kind()),
                &joiner.label(),
                &(u64::from(joiner.hand()) as i64),
                &(u64::from(joiner.played()) as i64),
                &joiner.score(),
                &(u64::from(next.deck()) as i64),
            ],
        )
        .await
        .map(|rows| rows == 1)
    }
    async fn get_battle(&self, id: ID<Battle>) -> Result<Option<Battle>, PgErr> {
        let row = self
            .query_opt(
                const_format::concatcp!(
                    "SELECT id, mode, status, prompt, reference, deck, turn, seq, winner FROM ",
                    BATTLES,
                    " WHERE id = $1"
                ),
                &[&id.inner()],
            )
            .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        let participants = self
            .query(
                const_format::concatcp!(
                    "SELECT id, kind, label, hand, played, score FROM ",
                    PARTICIPANTS,
                    " WHERE battle_id = $1 ORDER BY side"
                ),
                &[&id.inner()],
            )
            .await?
            .iter()
            .map(participant_row)
            .collect();
        Ok(Some(Battle::restore(
            ID::from(row.get::<_, uuid::Uuid>(0)),
            Mode::try_from(row.get::<_, i16>(1)).expect("valid mode column"),
            Status::try_from(row.get::<_, i16>(2)).expect("valid status column"),
            Prompt::new(row.get(3), row.get(4)),
            Deck::from(row.get::<_, i64>(5) as u64),
            row.get::<_, i16>(6) as Side,
            row.get(7),
            participants,
            row.get::<_, Option<i16>>(8).map(|w| w as Side),
        )))
    }
    async fn get_pleas(&self, id: ID<Battle>) -> Result<Vec<Plea>, PgErr> {
        self.query(
            const_format::concatcp!(
                "SELECT battle_id, seq, side, participant_id, card, justification, approved, points, at FROM ",
                PLEAS,
                " WHERE battle_id = $1 ORDER BY seq"
            ),
            &[&id.inner()],
        )
        .await
        .map(|rows| {
            rows.iter()
                .map(|row| {
                    Plea::new(
                        ID::from(row.get::<_, uuid::Uuid>(0)),
                        row.get(1),
                        row.get::<_, i16>(2) as Side,
                        ID::from(row.get::<_, uuid::Uuid>(3)),
                        Principle::try_from(row.get::<_, i16>(4) as u8)
                            .expect("valid card column"),
                        row.get(5),
                        row.get(6),
                        row.get(7),
                        row.get(8),
                    )
                })
                .collect()
        })
    }
    async fn create_code(&self, code: &str, battle: ID<Battle>) -> Result<(), PgErr> {
        self.execute(
            const_format::concatcp!(
                "INSERT INTO ",
                CODES,
                " (code, battle_id) VALUES ($1, $2)"
            ),
            &[&code, &battle.inner()],
        )
        .await
        .map(|_| ())
    }
    async fn lookup_code(&self, code: &str) -> Result<Option<ID<Battle>>, PgErr> {
        self.query_opt(
            const_format::concatcp!("SELECT battle_id FROM ", CODES, " WHERE code = $1"),
            &[&code],
        )
        .await
        .map(|opt| opt.map(|row| ID::from(row.get::<_, uuid::Uuid>(0))))
    }
    async fn consume_code(&self, code: &str) -> Result<(), PgErr> {
        self.execute(
            const_format::concatcp!("DELETE FROM ", CODES, " WHERE code = $1"),
            &[&code],
        )
        .await
        .map(|_| ())
    }
}
