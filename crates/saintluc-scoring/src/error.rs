use thiserror::Error;

use saintluc_core::ValidationErrors;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("unknown variant '{0}' (expected 'en' or 'fr')")]
    UnknownVariant(String),

    #[error(transparent)]
    Validation(#[from] ValidationErrors),
}
