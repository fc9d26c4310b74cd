//! Configuration errors.

/// Errors raised while resolving or validating a [`crate::types::SimulationConfig`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid config value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error(
        "questions_per_trial ({questions_per_trial}) must equal max_observable_score \
         ({max_observable_score})"
    )]
    ScoreRangeMismatch {
        questions_per_trial: usize,
        max_observable_score: usize,
    },
}

impl ConfigError {
    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            field: field.to_string(),
            message: message.into(),
        }
    }
}
