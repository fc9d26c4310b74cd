//! Significance evaluation errors.

/// Errors that can occur while querying a histogram or parsing candidate scores.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvaluationError {
    #[error("Histogram contains no trials")]
    DegenerateHistogram,

    #[error("Candidate score must be non-negative, got {score}")]
    NegativeScore { score: i64 },

    #[error("Candidate score is not an integer: {token:?}")]
    MalformedScore { token: String },

    #[error("No candidate scores given")]
    EmptyScoreList,
}
