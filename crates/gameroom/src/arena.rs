use super::*;
use lgm_cards::Dealer;
use lgm_core::AUTO_DELAY;
use lgm_core::AUTO_RETRIES;
use lgm_core::ID;
use lgm_core::Side;
use lgm_database::BattleRepository;
use lgm_gameplay::Battle;
use lgm_gameplay::BattleError;
use lgm_gameplay::Mode;
use lgm_gameplay::Plea;
use lgm_gameplay::Prompt;
use lgm_gameplay::Status;
use lgm_gameplay::Submission;
use lgm_gameplay::Verdict;
use lgm_judge::Judge;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::sync::RwLock;
use tokio::sync::broadcast;
use tokio_postgres::Client;

/// Registry of live battles and the move pipeline entrypoint.
///
/// Every state transition is persisted before it is installed in memory, and
/// the registry is a cache over the store: a battle missing from the map is
/// rehydrated from its durable rows on the next touch, so a restart never
/// strands a committed session. Completed battles are evicted from the
/// registry; their snapshots remain readable from the store.
pub struct Arena {
    db: Arc<Client>,
    judge: Arc<dyn Judge>,
    advocate: Arc<dyn Advocate>,
    tables: RwLock<HashMap<ID<Battle>, Arc<Table>>>,
    directory: Mutex<Directory>,
}

impl Arena {
    pub fn new(db: Arc<Client>, judge: Arc<dyn Judge>, advocate: Arc<dyn Advocate>) -> Self {
        Self {
            db,
            judge,
            advocate,
            tables: RwLock::new(HashMap::new()),
            directory: Mutex::new(Directory::new()),
        }
    }

    /// Opens a battle. Joinable modes come back with the join code to hand
    /// to the second party; the rest start active immediately.
    pub async fn open(
        self: &Arc<Self>,
        mode: Mode,
        prompt: Prompt,
        label: String,
    ) -> Result<(ID<Battle>, Option<Code>), ArenaError> {
        let id = ID::default();
        let mut dealer = Dealer::from_entropy();
        let battle =
            Battle::open(id, mode, prompt, label, &mut dealer).map_err(BattleError::from)?;
        self.db.create_battle(&battle).await?;
        let code = match mode.joinable() {
            true => {
                let code = self.directory.lock().await.issue(id, &mut rand::rng())?;
                self.db.create_code(code.as_str(), id).await?;
                Some(code)
            }
            false => None,
        };
        let automated = battle
            .current()
            .map(|p| p.kind().is_automated())
            .unwrap_or(false);
        self.tables
            .write()
            .await
            .insert(id, Arc::new(Table::new(battle)));
        log::info!("[arena] opened {} battle {}", mode, id);
        if automated {
            self.drive(id);
        }
        Ok((id, code))
    }

    /// Resolves a join code and admits the second party. The code is
    /// consumed by the first joiner to commit; a racing joiner loses at the
    /// store guard and gets a Conflict.
    pub async fn join(
        self: &Arc<Self>,
        code: &str,
        label: String,
    ) -> Result<(ID<Battle>, Side), ArenaError> {
        let code = Code::try_from(code).map_err(|_| ArenaError::NotFound)?;
        // codes are durable: a code issued before a restart still resolves
        let id = match self.directory.lock().await.lookup(&code) {
            Some(id) => id,
            None => self
                .db
                .lookup_code(code.as_str())
                .await?
                .ok_or(ArenaError::NotFound)?,
        };
        let table = self.table(id).await?;
        let mut dealer = Dealer::from_entropy();
        let next = table.snapshot().await.join(label, &mut dealer)?;
        let side = next.participants().len() - 1;
        let joiner = next.participants()[side].clone();
        match self.db.activate(&next, &joiner, side).await? {
            true => {}
            false => return Err(ArenaError::Conflict),
        }
        let turn = (next.turn(), next.seq());
        table.activate(next).await;
        self.directory.lock().await.consume(&code);
        self.db.consume_code(code.as_str()).await?;
        table.publish(&Event::Joined {
            side,
            label: joiner.label().to_string(),
        });
        table.publish(&Event::Turn {
            side: turn.0,
            seq: turn.1,
        });
        log::info!("[arena] {} joined battle {} as S{}", joiner.label(), id, side);
        Ok((id, side))
    }

    /// Runs one submission through the full pipeline: adjudicate against
    /// live state, commit durably, install, and notify watchers. Kicks the
    /// automated driver when the turn passes to an automated side.
    pub async fn submit(
        self: &Arc<Self>,
        id: ID<Battle>,
        sub: Submission,
    ) -> Result<(Battle, Plea, Verdict), ArenaError> {
        let table = self.table(id).await?;
        let (next, plea, verdict) = table.adjudicate(&sub, self.judge.as_ref()).await?;
        match self.db.commit_move(&next, &plea).await? {
            true => {}
            false => return Err(ArenaError::Conflict),
        }
        table.advance(next.clone()).await;
        table.publish(&Event::Judged {
            plea: plea.clone(),
            feedback: verdict.feedback().to_string(),
        });
        match next.status() {
            Status::Completed => {
                let winner = next.winner().expect("completed battle has a winner");
                let scores = next.participants().iter().map(|p| p.score()).collect();
                table.publish(&Event::Completed { winner, scores });
                self.close(id).await;
                log::info!("[arena] battle {} completed, S{} wins", id, winner);
            }
            _ => {
                table.publish(&Event::Turn {
                    side: next.turn(),
                    seq: next.seq(),
                });
                if next
                    .current()
                    .map(|p| p.kind().is_automated())
                    .unwrap_or(false)
                {
                    self.drive(id);
                }
            }
        }
        Ok((next, plea, verdict))
    }

    /// Current state of a battle: live if a table exists, otherwise the
    /// durable snapshot (completed or pre-restart sessions).
    pub async fn snapshot(&self, id: ID<Battle>) -> Result<Battle, ArenaError> {
        let table = self.tables.read().await.get(&id).cloned();
        match table {
            Some(table) => Ok(table.snapshot().await),
            None => self.db.get_battle(id).await?.ok_or(ArenaError::NotFound),
        }
    }
    /// Committed move history, oldest first.
    pub async fn pleas(&self, id: ID<Battle>) -> Result<Vec<Plea>, ArenaError> {
        Ok(self.db.get_pleas(id).await?)
    }
    /// Subscription for a live battle: the current snapshot plus the hint
    /// stream from this point forward. Re-kicks the automated driver if the
    /// turn is sitting on a stalled automated side; the seq guard makes a
    /// redundant kick harmless.
    pub async fn watch(
        self: &Arc<Self>,
        id: ID<Battle>,
    ) -> Result<(Battle, broadcast::Receiver<ServerMessage>), ArenaError> {
        let table = self.table(id).await?;
        let rx = table.subscribe();
        let battle = table.snapshot().await;
        if battle.status() == Status::Active
            && battle
                .current()
                .map(|p| p.kind().is_automated())
                .unwrap_or(false)
        {
            self.drive(id);
        }
        Ok((battle, rx))
    }

    /// Evicts a battle from the live registry. Watchers see their hint
    /// stream end; the durable snapshot stays readable through the store.
    async fn close(&self, id: ID<Battle>) {
        self.tables.write().await.remove(&id);
    }
    async fn table(&self, id: ID<Battle>) -> Result<Arc<Table>, ArenaError> {
        if let Some(table) = self.tables.read().await.get(&id).cloned() {
            return Ok(table);
        }
        self.resume(id).await
    }
    /// Rehydrates a battle from the store into the live registry, so
    /// sessions opened before a process restart can be played forward.
    /// Completed battles stay store-only.
    async fn resume(&self, id: ID<Battle>) -> Result<Arc<Table>, ArenaError> {
        let battle = self.db.get_battle(id).await?.ok_or(ArenaError::NotFound)?;
        if battle.status() == Status::Completed {
            return Err(ArenaError::NotFound);
        }
        let mut tables = self.tables.write().await;
        // a concurrent caller may have resumed it while we read the store
        let table = tables
            .entry(id)
            .or_insert_with(|| {
                log::info!("[arena] resumed battle {} from store", id);
                Arc::new(Table::new(battle))
            })
            .clone();
        Ok(table)
    }

    /// Spawns the automated-side driver: after a short delay, composes a
    /// move through the Advocate and submits it through the normal pipeline.
    /// Transient judge failures and lost races retry up to AUTO_RETRIES;
    /// anything else abandons the attempt and the battle stalls visibly.
    fn drive(self: &Arc<Self>, id: ID<Battle>) {
        let arena = self.clone();
        tokio::spawn(async move {
            for attempt in 1..=AUTO_RETRIES {
                tokio::time::sleep(Duration::from_secs(AUTO_DELAY)).await;
                let Ok(battle) = arena.snapshot(id).await else {
                    return;
                };
                if battle.status() != Status::Active {
                    return;
                }
                let Some(actor) = battle.current() else { return };
                if !actor.kind().is_automated() {
                    return;
                }
                let Some((card, justification)) =
                    arena.advocate.plead(actor.hand(), battle.prompt()).await
                else {
                    return;
                };
                let sub = Submission::new(battle.turn(), card, justification);
                match arena.submit(id, sub).await {
                    Ok((_, plea, _)) => {
                        log::debug!("[arena] automated move in {}: {}", id, plea);
                        return;
                    }
                    Err(e @ (ArenaError::Judge(_) | ArenaError::Conflict)) => {
                        log::warn!(
                            "[arena] automated move in {} failed (attempt {}): {}",
                            id,
                            attempt,
                            e
                        );
                    }
                    Err(e) => {
                        log::warn!("[arena] automated move in {} abandoned: {}", id, e);
                        return;
                    }
                }
            }
            log::error!("[arena] automated side stalled in battle {}", id);
        });
    }
}
