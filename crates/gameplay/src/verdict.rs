use lgm_core::Points;
use serde::Deserialize;
use serde::Serialize;

/// The judge collaborator's outcome for one submission.
///
/// The rubric behind `points` is owned by the judge; the pipeline trusts the
/// verdict semantics but treats the numeric total as untrusted and clamps it
/// at apply time. A rejection is a normal game outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    approved: bool,
    points: Points,
    feedback: String,
}

impl Verdict {
    pub fn new(approved: bool, points: Points, feedback: String) -> Self {
        Self {
            approved,
            points,
            feedback,
        }
    }
    pub fn approve(points: Points, feedback: impl Into<String>) -> Self {
        Self::new(true, points, feedback.into())
    }
    pub fn reject(feedback: impl Into<String>) -> Self {
        Self::new(false, 0, feedback.into())
    }
    pub fn approved(&self) -> bool {
        self.approved
    }
    pub fn points(&self) -> Points {
        self.points
    }
    pub fn feedback(&self) -> &str {
        &self.feedback
    }
}
