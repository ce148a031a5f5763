use super::*;
use lgm_cards::DealError;
use lgm_cards::Dealer;
use lgm_cards::Deck;
use lgm_core::HAND_SIZE;
use lgm_core::ID;
use lgm_core::POINTS_CAP;
use lgm_core::SIDES;
use lgm_core::Seq;
use lgm_core::Side;
use lgm_core::Unique;
use rand::Rng;

/// Display label for automated sides created at open time.
const AUTOMATED_LABEL: &str = "Zealot";

/// A battle session: the single source of truth for one game.
///
/// Pure value type. `open`, `join`, and `apply` return new states instead of
/// mutating in place, so the imperative shell can persist a transition before
/// installing it, and a failed judge or store call leaves the prior state
/// untouched by construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Battle {
    id: ID<Self>,
    mode: Mode,
    status: Status,
    prompt: Prompt,
    deck: Deck,
    turn: Side,
    seq: Seq,
    participants: Vec<Participant>,
    winner: Option<Side>,
}

impl Battle {
    /// Opens a new battle, dealing the opening side (and, for non-joinable
    /// modes, the automated opposition) from a fresh deck. Deal exhaustion is
    /// a fatal setup error, not retried.
    pub fn open<R: Rng>(
        id: ID<Self>,
        mode: Mode,
        prompt: Prompt,
        label: String,
        dealer: &mut Dealer<R>,
    ) -> Result<Self, DealError> {
        let mut deck = Deck::full();
        let mut participants = Vec::with_capacity(SIDES);
        let hand = dealer.draw(&mut deck, HAND_SIZE)?;
        participants.push(Participant::new(ID::default(), mode.opener(), label, hand));
        let status = if mode.joinable() {
            Status::Waiting
        } else {
            let hand = dealer.draw(&mut deck, HAND_SIZE)?;
            participants.push(Participant::new(
                ID::default(),
                mode.joiner(),
                AUTOMATED_LABEL.to_string(),
                hand,
            ));
            Status::Active
        };
        Ok(Self {
            id,
            mode,
            status,
            prompt,
            deck,
            turn: 0,
            seq: 0,
            participants,
            winner: None,
        })
    }
    /// The waiting → active transition: the second party joins and is dealt
    /// a hand from the residual pool. Occurs exactly once per battle.
    pub fn join<R: Rng>(
        &self,
        label: String,
        dealer: &mut Dealer<R>,
    ) -> Result<Self, BattleError> {
        if self.status != Status::Waiting {
            return Err(BattleError::NotWaiting);
        }
        let mut next = self.clone();
        let hand = dealer.draw(&mut next.deck, HAND_SIZE)?;
        next.participants.push(Participant::new(
            ID::default(),
            self.mode.joiner(),
            label,
            hand,
        ));
        next.status = Status::Active;
        Ok(next)
    }
    /// Checks the move preconditions. Violations are rejected synchronously,
    /// before the judge is consulted, and do not consume a turn.
    pub fn validate(&self, sub: &Submission) -> Result<(), BattleError> {
        match self.status {
            Status::Waiting => return Err(BattleError::NotActive),
            Status::Completed => return Err(BattleError::Completed),
            Status::Active => {}
        }
        if sub.side() >= self.participants.len() || sub.side() != self.turn {
            return Err(BattleError::NotYourTurn);
        }
        if !self.participants[sub.side()].hand().contains(sub.card()) {
            return Err(BattleError::CardNotHeld);
        }
        if sub.justification().trim().is_empty() {
            return Err(BattleError::EmptyJustification);
        }
        Ok(())
    }
    /// Applies a judged submission as one atomic transition.
    ///
    /// Approved: card moves hand → played, score accrues the verdict's points
    /// clamped into [0, POINTS_CAP], and an emptied hand completes the battle
    /// with this side as winner. Rejected: zero points, hand unchanged.
    /// Either way the turn advances and seq increments — rejection consumes
    /// the turn.
    ///
    /// The submission must have passed [`Battle::validate`] against this
    /// exact state.
    pub fn apply(&self, sub: &Submission, verdict: &Verdict) -> (Self, Plea) {
        let mut next = self.clone();
        let points = if verdict.approved() {
            verdict.points().clamp(0, POINTS_CAP)
        } else {
            0
        };
        if verdict.approved() {
            next.participants[sub.side()].approve(sub.card(), points);
        }
        let plea = Plea::new(
            self.id,
            self.seq,
            sub.side(),
            self.participants[sub.side()].id(),
            sub.card(),
            sub.justification().to_string(),
            verdict.approved(),
            points,
            std::time::SystemTime::now(),
        );
        next.seq += 1;
        next.turn = (self.turn + 1) % SIDES;
        if verdict.approved() && next.participants[sub.side()].hand().is_empty() {
            next.status = Status::Completed;
            next.winner = Some(sub.side());
        }
        (next, plea)
    }
    /// Rebuilds a battle from persisted columns.
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: ID<Self>,
        mode: Mode,
        status: Status,
        prompt: Prompt,
        deck: Deck,
        turn: Side,
        seq: Seq,
        participants: Vec<Participant>,
        winner: Option<Side>,
    ) -> Self {
        Self {
            id,
            mode,
            status,
            prompt,
            deck,
            turn,
            seq,
            participants,
            winner,
        }
    }
    pub fn mode(&self) -> Mode {
        self.mode
    }
    pub fn status(&self) -> Status {
        self.status
    }
    pub fn prompt(&self) -> &Prompt {
        &self.prompt
    }
    pub fn deck(&self) -> Deck {
        self.deck
    }
    /// Side holding the turn pointer.
    pub fn turn(&self) -> Side {
        self.turn
    }
    /// Next move sequence number.
    pub fn seq(&self) -> Seq {
        self.seq
    }
    pub fn winner(&self) -> Option<Side> {
        self.winner
    }
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }
    pub fn participant(&self, side: Side) -> Option<&Participant> {
        self.participants.get(side)
    }
    /// Participant holding the turn, if both sides are present.
    pub fn current(&self) -> Option<&Participant> {
        self.participants.get(self.turn)
    }
}

impl Unique for Battle {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lgm_cards::Hand;
    use lgm_cards::Principle;

    fn prompt() -> Prompt {
        Prompt::new(
            "The wilderness tests what the feast conceals".to_string(),
            Some("Deut 8:2-3".to_string()),
        )
    }
    fn open(mode: Mode) -> Battle {
        let mut dealer = Dealer::seeded(42);
        Battle::open(ID::default(), mode, prompt(), "Alice".to_string(), &mut dealer).unwrap()
    }
    fn first_card(battle: &Battle, side: Side) -> Principle {
        battle.participants()[side].hand().iter().next().unwrap()
    }
    fn submission(battle: &Battle, side: Side) -> Submission {
        Submission::new(side, first_card(battle, side), "because it holds".to_string())
    }

    #[test]
    fn solo_opens_active_with_disjoint_hands() {
        let battle = open(Mode::Solo);
        assert_eq!(battle.status(), Status::Active);
        assert_eq!(battle.participants().len(), 2);
        let [a, b] = [&battle.participants()[0], &battle.participants()[1]];
        assert_eq!(a.hand().size(), HAND_SIZE);
        assert_eq!(b.hand().size(), HAND_SIZE);
        assert!(a.hand().disjoint(&b.hand()));
        assert_eq!(a.kind(), Kind::Human);
        assert!(b.kind().is_automated());
        assert_eq!(battle.deck().remaining(), Principle::COUNT - 2 * HAND_SIZE);
    }
    #[test]
    fn duel_opens_waiting_with_one_side() {
        let battle = open(Mode::Duel);
        assert_eq!(battle.status(), Status::Waiting);
        assert_eq!(battle.participants().len(), 1);
        assert_eq!(battle.winner(), None);
    }
    #[test]
    fn join_activates_and_deals_from_residual() {
        let battle = open(Mode::Duel);
        let mut dealer = Dealer::seeded(7);
        let joined = battle.join("Bob".to_string(), &mut dealer).unwrap();
        assert_eq!(joined.status(), Status::Active);
        assert_eq!(joined.participants().len(), 2);
        let [a, b] = [&joined.participants()[0], &joined.participants()[1]];
        assert!(a.hand().disjoint(&b.hand()));
        assert!(b.hand().disjoint(&joined.deck().cards()));
        // the opener still acts first
        assert_eq!(joined.turn(), 0);
    }
    #[test]
    fn join_on_active_battle_fails() {
        let battle = open(Mode::Solo);
        let mut dealer = Dealer::seeded(7);
        let err = battle.join("Bob".to_string(), &mut dealer).unwrap_err();
        assert_eq!(err, BattleError::NotWaiting);
    }
    #[test]
    fn waiting_battle_rejects_moves() {
        let battle = open(Mode::Duel);
        let sub = Submission::new(0, first_card(&battle, 0), "text".to_string());
        assert_eq!(battle.validate(&sub), Err(BattleError::NotActive));
    }
    #[test]
    fn wrong_turn_is_rejected() {
        let battle = open(Mode::Solo);
        let sub = submission(&battle, 1);
        assert_eq!(battle.validate(&sub), Err(BattleError::NotYourTurn));
    }
    #[test]
    fn card_not_held_is_rejected_without_consuming_turn() {
        let battle = open(Mode::Solo);
        // a card from the opponent's hand is by construction not in ours
        let foreign = first_card(&battle, 1);
        let sub = Submission::new(0, foreign, "text".to_string());
        assert_eq!(battle.validate(&sub), Err(BattleError::CardNotHeld));
        assert_eq!(battle.turn(), 0);
        assert_eq!(battle.seq(), 0);
    }
    #[test]
    fn blank_justification_is_rejected() {
        let battle = open(Mode::Solo);
        let sub = Submission::new(0, first_card(&battle, 0), "   ".to_string());
        assert_eq!(battle.validate(&sub), Err(BattleError::EmptyJustification));
    }
    #[test]
    fn approved_move_commits_atomically() {
        let battle = open(Mode::Solo);
        let sub = submission(&battle, 0);
        let (next, plea) = battle.apply(&sub, &Verdict::approve(3, "sound"));
        let actor = &next.participants()[0];
        assert!(!actor.hand().contains(sub.card()));
        assert!(actor.played().contains(sub.card()));
        assert_eq!(actor.score(), 3);
        assert_eq!(next.turn(), 1);
        assert_eq!(next.seq(), battle.seq() + 1);
        assert!(plea.approved());
        assert_eq!(plea.points(), 3);
        assert_eq!(plea.seq(), 0);
    }
    #[test]
    fn rejected_move_still_consumes_the_turn() {
        let battle = open(Mode::Solo);
        let sub = submission(&battle, 0);
        let (next, plea) = battle.apply(&sub, &Verdict::reject("off topic"));
        let actor = &next.participants()[0];
        assert!(actor.hand().contains(sub.card()));
        assert!(actor.played().is_empty());
        assert_eq!(actor.score(), 0);
        assert_eq!(next.turn(), 1);
        assert_eq!(next.status(), Status::Active);
        assert!(!plea.approved());
        assert_eq!(plea.points(), 0);
    }
    #[test]
    fn points_are_clamped_to_cap() {
        let battle = open(Mode::Solo);
        let sub = submission(&battle, 0);
        let (next, plea) = battle.apply(&sub, &Verdict::approve(99, "generous"));
        assert_eq!(next.participants()[0].score(), POINTS_CAP);
        assert_eq!(plea.points(), POINTS_CAP);
    }
    #[test]
    fn negative_points_are_clamped_to_zero() {
        let battle = open(Mode::Solo);
        let sub = submission(&battle, 0);
        let (next, _) = battle.apply(&sub, &Verdict::approve(-4, "malformed judge"));
        assert_eq!(next.participants()[0].score(), 0);
    }
    #[test]
    fn emptying_a_hand_completes_the_battle() {
        // Scenario C: a hand of size 1, approved with points=3
        let battle = open(Mode::Solo);
        let last = first_card(&battle, 0);
        let solo_hand = Hand::from_iter([last]);
        let trimmed = Participant::restore(
            battle.participants()[0].id(),
            Kind::Human,
            "Alice".to_string(),
            solo_hand,
            battle.participants()[0].played(),
            0,
        );
        let battle = Battle::restore(
            battle.id(),
            battle.mode(),
            Status::Active,
            battle.prompt().clone(),
            battle.deck(),
            0,
            battle.seq(),
            vec![trimmed, battle.participants()[1].clone()],
            None,
        );
        let sub = Submission::new(0, last, "the last word".to_string());
        let (next, _) = battle.apply(&sub, &Verdict::approve(3, "decisive"));
        assert!(next.participants()[0].hand().is_empty());
        assert_eq!(next.participants()[0].score(), 3);
        assert_eq!(next.status(), Status::Completed);
        assert_eq!(next.winner(), Some(0));
    }
    #[test]
    fn rejection_never_completes_a_battle() {
        let battle = open(Mode::Solo);
        let sub = submission(&battle, 0);
        let (next, _) = battle.apply(&sub, &Verdict::reject("no"));
        assert_eq!(next.status(), Status::Active);
        assert_eq!(next.winner(), None);
    }
    #[test]
    fn completed_is_absorbing() {
        let battle = open(Mode::Solo);
        let sub = submission(&battle, 0);
        let completed = Battle::restore(
            battle.id(),
            battle.mode(),
            Status::Completed,
            battle.prompt().clone(),
            battle.deck(),
            1,
            battle.seq(),
            battle.participants().to_vec(),
            Some(0),
        );
        assert_eq!(completed.validate(&sub), Err(BattleError::Completed));
    }
    #[test]
    fn racing_submission_loses_turn_ownership() {
        // both submissions validated against the same turn pointer; the one
        // that commits second must fail re-validation
        let battle = open(Mode::Solo);
        let first = submission(&battle, 0);
        let second = Submission::new(
            0,
            battle.participants()[0].hand().iter().nth(1).unwrap(),
            "me again".to_string(),
        );
        assert!(battle.validate(&first).is_ok());
        assert!(battle.validate(&second).is_ok());
        let (next, _) = battle.apply(&first, &Verdict::approve(2, "ok"));
        assert_eq!(next.validate(&second), Err(BattleError::NotYourTurn));
    }
    #[test]
    fn seq_is_strictly_monotonic() {
        let battle = open(Mode::Exhibition);
        let (after_one, plea_one) = battle.apply(&submission(&battle, 0), &Verdict::reject("no"));
        let (after_two, plea_two) =
            after_one.apply(&submission(&after_one, 1), &Verdict::approve(1, "yes"));
        assert_eq!(plea_one.seq() + 1, plea_two.seq());
        assert_eq!(after_two.seq(), 2);
    }
}
