use super::Judge;
use super::JudgeError;
use lgm_cards::Principle;
use lgm_core::Points;
use lgm_gameplay::Prompt;
use lgm_gameplay::Verdict;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Test judge replaying a scripted sequence of outcomes.
/// Panics if consulted past the end of the script.
pub struct ScriptedJudge {
    script: Mutex<VecDeque<Result<Verdict, JudgeError>>>,
}

impl ScriptedJudge {
    pub fn new(script: impl IntoIterator<Item = Result<Verdict, JudgeError>>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
        }
    }
    /// Remaining unconsumed script entries.
    pub fn remaining(&self) -> usize {
        self.script.lock().expect("script lock").len()
    }
}

#[async_trait::async_trait]
impl Judge for ScriptedJudge {
    async fn review(
        &self,
        _: &Prompt,
        _: Principle,
        _: &str,
    ) -> Result<Verdict, JudgeError> {
        self.script
            .lock()
            .expect("script lock")
            .pop_front()
            .expect("scripted judge consulted past end of script")
    }
}

/// Trivially approving judge awarding a fixed total. Used for exhibitions
/// and smoke runs where a real judge service is unavailable.
pub struct Approving(pub Points);

#[async_trait::async_trait]
impl Judge for Approving {
    async fn review(
        &self,
        _: &Prompt,
        card: Principle,
        _: &str,
    ) -> Result<Verdict, JudgeError> {
        Ok(Verdict::approve(self.0, format!("{} stands unchallenged", card)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    fn prompt() -> Prompt {
        Prompt::new("test".to_string(), None)
    }
    fn card() -> Principle {
        Principle::try_from("Faith").unwrap()
    }
    #[tokio::test]
    async fn script_plays_in_order() {
        let judge = ScriptedJudge::new([
            Ok(Verdict::approve(2, "first")),
            Err(JudgeError::Timeout),
        ]);
        let first = judge.review(&prompt(), card(), "j").await.unwrap();
        assert_eq!(first.points(), 2);
        let second = judge.review(&prompt(), card(), "j").await;
        assert_eq!(second, Err(JudgeError::Timeout));
        assert_eq!(judge.remaining(), 0);
    }
    #[tokio::test]
    async fn approving_always_approves() {
        let judge = Approving(1);
        let verdict = judge.review(&prompt(), card(), "j").await.unwrap();
        assert!(verdict.approved());
        assert_eq!(verdict.points(), 1);
    }
}
