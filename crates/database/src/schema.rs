//! Database schema implementations for domain types.
//!
//! Implements Schema directly on types from lgm-gameplay.
//! This is possible because Schema is local to this crate.
use super::*;
use lgm_gameplay::Battle;
use lgm_gameplay::Participant;
use lgm_gameplay::Plea;

impl Schema for Battle {
    fn name() -> &'static str {
        BATTLES
    }
    fn creates() -> &'static str {
        const_format::concatcp!(
            "CREATE TABLE IF NOT EXISTS ",
            BATTLES,
            " (
                id          UUID PRIMARY KEY,
                mode        SMALLINT NOT NULL,
                status      SMALLINT NOT NULL,
                prompt      TEXT NOT NULL,
                reference   TEXT,
                deck        BIGINT NOT NULL,
                turn        SMALLINT NOT NULL,
                seq         SMALLINT NOT NULL,
                winner      SMALLINT
            );"
        )
    }
    fn indices() -> &'static str {
        const_format::concatcp!(
            "CREATE INDEX IF NOT EXISTS idx_battles_status ON ",
            BATTLES,
            " (status);"
        )
    }
}

impl Schema for Participant {
    fn name() -> &'static str {
        PARTICIPANTS
    }
    fn creates() -> &'static str {
        const_format::concatcp!(
            "CREATE TABLE IF NOT EXISTS ",
            PARTICIPANTS,
            " (
                id          UUID PRIMARY KEY,
                battle_id   UUID NOT NULL REFERENCES ",
            BATTLES,
            "(id) ON DELETE CASCADE,
                side        SMALLINT NOT NULL,
                kind        SMALLINT NOT NULL,
                label       TEXT NOT NULL,
                hand        BIGINT NOT NULL,
                played      BIGINT NOT NULL,
                score       SMALLINT NOT NULL,
                UNIQUE (battle_id, side)
            );"
        )
    }
    fn indices() -> &'static str {
        const_format::concatcp!(
            "CREATE INDEX IF NOT EXISTS idx_participants_battle ON ",
            PARTICIPANTS,
            " (battle_id);"
        )
    }
}

impl Schema for Plea {
    fn name() -> &'static str {
        PLEAS
    }
    fn creates() -> &'static str {
        const_format::concatcp!(
            "CREATE TABLE IF NOT EXISTS ",
            PLEAS,
            " (
                battle_id      UUID NOT NULL REFERENCES ",
            BATTLES,
            "(id) ON DELETE CASCADE,
                seq            SMALLINT NOT NULL,
                side           SMALLINT NOT NULL,
                participant_id UUID NOT NULL REFERENCES ",
            PARTICIPANTS,
            "(id),
                card           SMALLINT NOT NULL,
                justification  TEXT NOT NULL,
                approved       BOOLEAN NOT NULL,
                points         SMALLINT NOT NULL,
                at             TIMESTAMPTZ NOT NULL,
                PRIMARY KEY (battle_id, seq)
            );"
        )
    }
    fn indices() -> &'static str {
        const_format::concatcp!(
            "CREATE INDEX IF NOT EXISTS idx_pleas_participant ON ",
            PLEAS,
            " (participant_id);"
        )
    }
}

impl Schema for Codes {
    fn name() -> &'static str {
        CODES
    }
    fn creates() -> &'static str {
        const_format::concatcp!(
            "CREATE TABLE IF NOT EXISTS ",
            CODES,
            " (
                code        TEXT PRIMARY KEY,
                battle_id   UUID NOT NULL REFERENCES ",
            BATTLES,
            "(id) ON DELETE CASCADE
            );"
        )
    }
    fn indices() -> &'static str {
        ""
    }
}
