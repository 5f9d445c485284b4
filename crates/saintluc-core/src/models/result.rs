use serde::{Deserialize, Serialize};

/// Outcome of scoring one complete patient record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Linear model output, rounded to 4 decimal places.
    pub score: f64,
    /// Whether a post-operative blood test is recommended.
    pub recommend_blood_test: bool,
}
