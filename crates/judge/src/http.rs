use super::Judge;
use super::JudgeError;
use lgm_cards::Principle;
use lgm_core::JUDGE_TIMEOUT;
use lgm_core::Points;
use lgm_gameplay::Prompt;
use lgm_gameplay::Verdict;
use serde::Deserialize;
use serde::Serialize;

/// Wire request to the judge service.
#[derive(Debug, Serialize)]
struct Review {
    prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    reference: Option<String>,
    card: String,
    justification: String,
}

/// Wire response from the judge service.
#[derive(Debug, Deserialize)]
struct Ruling {
    verdict: String,
    points: Points,
    feedback: String,
}

impl Ruling {
    fn into_verdict(self) -> Result<Verdict, JudgeError> {
        match self.verdict.as_str() {
            "approved" => Ok(Verdict::new(true, self.points, self.feedback)),
            "rejected" => Ok(Verdict::new(false, 0, self.feedback)),
            other => Err(JudgeError::Malformed(format!("unknown verdict: {}", other))),
        }
    }
}

/// Production judge client posting submissions to an external service.
pub struct HttpJudge {
    client: reqwest::Client,
    url: String,
}

impl HttpJudge {
    pub fn new(url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(JUDGE_TIMEOUT))
            .build()
            .expect("build judge http client");
        Self { client, url }
    }
    /// Reads the service endpoint from `JUDGE_URL`.
    ///
    /// # Panics
    ///
    /// Panics if `JUDGE_URL` is not set.
    pub fn from_env() -> Self {
        Self::new(std::env::var("JUDGE_URL").expect("JUDGE_URL must be set"))
    }
}

#[async_trait::async_trait]
impl Judge for HttpJudge {
    async fn review(
        &self,
        prompt: &Prompt,
        card: Principle,
        justification: &str,
    ) -> Result<Verdict, JudgeError> {
        let review = Review {
            prompt: prompt.text().to_string(),
            reference: prompt.reference().map(str::to_string),
            card: card.name().to_string(),
            justification: justification.to_string(),
        };
        log::debug!("[judge] reviewing {} against prompt", card);
        let response = self
            .client
            .post(&self.url)
            .json(&review)
            .send()
            .await
            .map_err(|e| match e.is_timeout() {
                true => JudgeError::Timeout,
                false => JudgeError::Transport(e.to_string()),
            })?;
        if !response.status().is_success() {
            return Err(JudgeError::Transport(format!(
                "judge returned {}",
                response.status()
            )));
        }
        response
            .json::<Ruling>()
            .await
            .map_err(|e| JudgeError::Malformed(e.to_string()))?
            .into_verdict()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn approved_ruling_parses() {
        let ruling: Ruling =
            serde_json::from_str(r#"{"verdict":"approved","points":3,"feedback":"sound"}"#)
                .unwrap();
        let verdict = ruling.into_verdict().unwrap();
        assert!(verdict.approved());
        assert_eq!(verdict.points(), 3);
    }
    #[test]
    fn rejected_ruling_zeroes_points() {
        let ruling: Ruling =
            serde_json::from_str(r#"{"verdict":"rejected","points":4,"feedback":"off"}"#).unwrap();
        let verdict = ruling.into_verdict().unwrap();
        assert!(!verdict.approved());
        assert_eq!(verdict.points(), 0);
    }
    #[test]
    fn unknown_verdict_is_malformed() {
        let ruling: Ruling =
            serde_json::from_str(r#"{"verdict":"maybe","points":1,"feedback":""}"#).unwrap();
        assert!(matches!(
            ruling.into_verdict(),
            Err(JudgeError::Malformed(_))
        ));
    }
}
