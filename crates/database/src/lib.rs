//! Postgres persistence for battles.
//!
//! Sessions, participants, and move records are durable rows, and the move
//! commit is a single guarded statement so no partial state is ever visible
//! to any reader.
//!
//! ## Connectivity
//!
//! - [`db()`] — Establishes a database connection from `DB_URL`
//!
//! ## Serialization
//!
//! - [`Schema`] — Table metadata and DDL generation
//! - [`migrate()`] — Idempotent table/index creation at startup
//! - [`BattleRepository`] — Row operations implemented on `Arc<Client>`
mod repository;
mod schema;
mod traits;

pub use repository::*;
pub use traits::*;
// schema module provides trait impls, no items to re-export

use std::sync::Arc;
use tokio_postgres::Client;

/// Establishes a database connection.
///
/// Connects to PostgreSQL using the `DB_URL` environment variable.
/// Returns an `Arc<Client>` suitable for sharing across async tasks.
///
/// # Panics
///
/// Panics if `DB_URL` is not set or if connection fails.
pub async fn db() -> Arc<Client> {
    log::info!("connecting to database");
    let tls = tokio_postgres::tls::NoTls;
    let ref url = std::env::var("DB_URL").expect("DB_URL must be set");
    let (client, connection) = tokio_postgres::connect(url, tls)
        .await
        .expect("database connection failed");
    tokio::spawn(connection);
    client
        .execute("SET client_min_messages TO WARNING", &[])
        .await
        .expect("set client_min_messages");
    Arc::new(client)
}

/// PostgreSQL error type alias.
pub type PgErr = tokio_postgres::Error;

/// Table for battle sessions.
#[rustfmt::skip]
pub const BATTLES:      &str = "battles";
/// Table for battle sides (hand, played set, score).
#[rustfmt::skip]
pub const PARTICIPANTS: &str = "participants";
/// Table for committed move records.
#[rustfmt::skip]
pub const PLEAS:        &str = "pleas";
/// Table for join codes bound to waiting battles.
#[rustfmt::skip]
pub const CODES:        &str = "codes";
