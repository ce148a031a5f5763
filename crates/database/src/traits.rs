use super::*;
use lgm_gameplay::Battle;
use lgm_gameplay::Participant;
use lgm_gameplay::Plea;
use tokio_postgres::Client;

/// Table metadata and DDL generation for persistent entities.
pub trait Schema {
    /// Table name.
    fn name() -> &'static str;
    /// CREATE TABLE IF NOT EXISTS statement.
    fn creates() -> &'static str;
    /// CREATE INDEX IF NOT EXISTS statements, empty if none.
    fn indices() -> &'static str;
}

/// Marker for the join-code table, which has no domain type of its own.
pub struct Codes;

/// Creates all tables and indices idempotently. Run once at startup.
pub async fn migrate(db: &Client) -> Result<(), PgErr> {
    db.batch_execute(Battle::creates()).await?;
    db.batch_execute(Participant::creates()).await?;
    db.batch_execute(Plea::creates()).await?;
    db.batch_execute(Codes::creates()).await?;
    db.batch_execute(Battle::indices()).await?;
    db.batch_execute(Participant::indices()).await?;
    db.batch_execute(Plea::indices()).await?;
    db.batch_execute(Codes::indices()).await?;
    log::info!("database schema is current");
    Ok(())
}
