use super::*;
use lgm_core::BROADCAST_CAPACITY;
use lgm_core::JUDGE_TIMEOUT;
use lgm_gameplay::Battle;
use lgm_gameplay::Plea;
use lgm_gameplay::Status;
use lgm_gameplay::Submission;
use lgm_gameplay::Verdict;
use lgm_judge::Judge;
use lgm_judge::JudgeError;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::sync::broadcast;

/// One live battle: the authoritative in-memory state behind a lock, plus
/// the broadcast channel its watchers subscribe to.
///
/// The channel is lossy by design (laggards drop hints and refetch), so
/// nothing here blocks on slow watchers.
pub struct Table {
    state: Mutex<Battle>,
    tx: broadcast::Sender<ServerMessage>,
}

impl Table {
    pub fn new(battle: Battle) -> Self {
        let (tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self {
            state: Mutex::new(battle),
            tx,
        }
    }
    pub fn subscribe(&self) -> broadcast::Receiver<ServerMessage> {
        self.tx.subscribe()
    }
    pub fn publish(&self, event: &Event) {
        log::debug!("[table] {}", event);
        let _ = self.tx.send(Protocol::encode(event));
    }
    pub async fn snapshot(&self) -> Battle {
        self.state.lock().await.clone()
    }

    /// Runs one submission through validate → judge → re-validate.
    ///
    /// The lock is released while the judge deliberates, so the turn pointer
    /// can move underneath us; the captured seq is re-checked on re-lock and
    /// a mismatch is a Conflict. Returns the computed transition without
    /// installing it: the caller must persist first, then [`Table::advance`].
    pub async fn adjudicate(
        &self,
        sub: &Submission,
        judge: &dyn Judge,
    ) -> Result<(Battle, Plea, Verdict), ArenaError> {
        let (prompt, seq) = {
            let state = self.state.lock().await;
            state.validate(sub)?;
            (state.prompt().clone(), state.seq())
        };
        let verdict = tokio::time::timeout(
            Duration::from_secs(JUDGE_TIMEOUT),
            judge.review(&prompt, sub.card(), sub.justification()),
        )
        .await
        .map_err(|_| JudgeError::Timeout)??;
        let state = self.state.lock().await;
        if state.seq() != seq {
            return Err(ArenaError::Conflict);
        }
        state.validate(sub)?;
        let (next, plea) = state.apply(sub, &verdict);
        Ok((next, plea, verdict))
    }
    /// Installs a committed move transition. Guarded on seq so a stale
    /// transition that lost the durable race can never clobber live state.
    pub async fn advance(&self, next: Battle) -> bool {
        let mut state = self.state.lock().await;
        match next.seq() == state.seq() + 1 {
            true => {
                *state = next;
                true
            }
            false => {
                log::warn!("[table] stale transition dropped at seq {}", state.seq());
                false
            }
        }
    }
    /// Installs the waiting → active join transition.
    pub async fn activate(&self, next: Battle) -> bool {
        let mut state = self.state.lock().await;
        match state.status() == Status::Waiting {
            true => {
                *state = next;
                true
            }
            false => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lgm_cards::Dealer;
    use lgm_cards::Principle;
    use lgm_core::ID;
    use lgm_gameplay::BattleError;
    use lgm_gameplay::Mode;
    use lgm_gameplay::Prompt;
    use lgm_judge::Approving;
    use lgm_judge::ScriptedJudge;
    use std::sync::Arc;
    use tokio::sync::oneshot;

    fn open(mode: Mode) -> Battle {
        let mut dealer = Dealer::seeded(11);
        let prompt = Prompt::new("The last will be first".to_string(), None);
        Battle::open(ID::default(), mode, prompt, "Alice".to_string(), &mut dealer).unwrap()
    }
    fn submission(battle: &Battle, nth: usize) -> Submission {
        let card = battle.participants()[battle.turn()]
            .hand()
            .iter()
            .nth(nth)
            .unwrap();
        Submission::new(battle.turn(), card, "it holds".to_string())
    }

    /// Judge that signals entry, then blocks until released. Lets tests
    /// interleave a competing commit while a verdict is pending.
    struct GateJudge {
        entered: std::sync::Mutex<Option<oneshot::Sender<()>>>,
        gate: Mutex<Option<oneshot::Receiver<()>>>,
    }
    #[async_trait::async_trait]
    impl Judge for GateJudge {
        async fn review(
            &self,
            _: &Prompt,
            _: Principle,
            _: &str,
        ) -> Result<Verdict, JudgeError> {
            let _ = self
                .entered
                .lock()
                .expect("entered lock")
                .take()
                .expect("review called once")
                .send(());
            let gate = self.gate.lock().await.take().expect("review called once");
            let _ = gate.await;
            Ok(Verdict::approve(1, "late"))
        }
    }

    #[tokio::test]
    async fn adjudicate_computes_without_installing() {
        let table = Table::new(open(Mode::Solo));
        let sub = submission(&table.snapshot().await, 0);
        let (next, plea, verdict) = table.adjudicate(&sub, &Approving(2)).await.unwrap();
        assert!(verdict.approved());
        assert_eq!(plea.points(), 2);
        assert_eq!(next.seq(), 1);
        // nothing installed yet
        assert_eq!(table.snapshot().await.seq(), 0);
        assert!(table.advance(next).await);
        assert_eq!(table.snapshot().await.seq(), 1);
    }
    #[tokio::test]
    async fn judge_timeout_leaves_state_intact_and_is_retryable() {
        let table = Table::new(open(Mode::Solo));
        let before = table.snapshot().await;
        let sub = submission(&before, 0);
        let judge = ScriptedJudge::new([
            Err(JudgeError::Timeout),
            Ok(Verdict::approve(4, "on reflection")),
        ]);
        let err = table.adjudicate(&sub, &judge).await.unwrap_err();
        assert!(matches!(err, ArenaError::Judge(JudgeError::Timeout)));
        assert_eq!(table.snapshot().await, before);
        // the identical submission goes through on retry
        let (next, plea, _) = table.adjudicate(&sub, &judge).await.unwrap();
        assert_eq!(plea.points(), 4);
        assert!(table.advance(next).await);
    }
    #[tokio::test]
    async fn verdict_landing_after_a_commit_is_a_conflict() {
        let table = Arc::new(Table::new(open(Mode::Solo)));
        let (entered_tx, entered_rx) = oneshot::channel();
        let (gate_tx, gate_rx) = oneshot::channel();
        let slow = GateJudge {
            entered: std::sync::Mutex::new(Some(entered_tx)),
            gate: Mutex::new(Some(gate_rx)),
        };
        let battle = table.snapshot().await;
        let racing = submission(&battle, 0);
        let winning = submission(&battle, 1);
        let pending = tokio::spawn({
            let table = table.clone();
            async move { table.adjudicate(&racing, &slow).await }
        });
        // the slow path has validated and released the lock
        entered_rx.await.unwrap();
        let (next, _, _) = table.adjudicate(&winning, &Approving(1)).await.unwrap();
        assert!(table.advance(next).await);
        let _ = gate_tx.send(());
        let err = pending.await.unwrap().unwrap_err();
        assert!(matches!(err, ArenaError::Conflict));
        assert_eq!(table.snapshot().await.seq(), 1);
    }
    #[tokio::test]
    async fn stale_transition_is_dropped() {
        let table = Table::new(open(Mode::Solo));
        let battle = table.snapshot().await;
        let (first, _, _) = table.adjudicate(&submission(&battle, 0), &Approving(1)).await.unwrap();
        let (second, _, _) = table.adjudicate(&submission(&battle, 1), &Approving(1)).await.unwrap();
        assert!(table.advance(first).await);
        assert!(!table.advance(second).await);
        assert_eq!(table.snapshot().await.seq(), 1);
    }
    #[tokio::test]
    async fn activation_is_once_only() {
        let table = Table::new(open(Mode::Duel));
        let mut dealer = Dealer::seeded(5);
        let joined = table
            .snapshot()
            .await
            .join("Bob".to_string(), &mut dealer)
            .unwrap();
        assert!(table.activate(joined.clone()).await);
        assert!(!table.activate(joined).await);
        assert_eq!(table.snapshot().await.status(), Status::Active);
    }
    #[tokio::test]
    async fn waiting_battle_rejects_submissions() {
        let table = Table::new(open(Mode::Duel));
        let card = table.snapshot().await.participants()[0]
            .hand()
            .iter()
            .next()
            .unwrap();
        let sub = Submission::new(0, card, "early".to_string());
        let err = table.adjudicate(&sub, &Approving(1)).await.unwrap_err();
        assert!(matches!(err, ArenaError::Rule(BattleError::NotActive)));
    }
    #[tokio::test]
    async fn watchers_receive_published_hints() {
        let table = Table::new(open(Mode::Solo));
        let mut rx = table.subscribe();
        table.publish(&Event::Turn { side: 1, seq: 3 });
        match rx.recv().await.unwrap() {
            ServerMessage::Turn { side, seq } => {
                assert_eq!(side, 1);
                assert_eq!(seq, 3);
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }
}
