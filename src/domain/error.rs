//! Domain error taxonomy for issuance and resolution.

use thiserror::Error;

/// Failures reported by a [`crate::domain::repositories::ShortLinkRepository`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// The `code` uniqueness constraint rejected an insert.
    #[error("short code is already present in the store")]
    UniqueViolation,

    /// The operation did not finish before its deadline.
    #[error("store operation exceeded its deadline")]
    Timeout,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Errors produced by the issuance and resolution engines.
///
/// Validation variants are caller mistakes and must not be retried as-is.
/// [`LinkError::CodeAlreadyUsed`] may be retried with a different code.
#[derive(Debug, Error)]
pub enum LinkError {
    #[error("number of days should be between {min} and {max}, got {days}")]
    DaysOutOfRange { days: i64, min: u32, max: u32 },

    #[error("target url must not be empty")]
    EmptyTarget,

    #[error("custom code too short (minimum {min} characters)")]
    CodeTooShort { min: usize },

    #[error("custom code too long (maximum {max} characters)")]
    CodeTooLong { max: usize },

    #[error("custom code may only contain letters, digits, '-' and '_'")]
    CodeInvalidCharacters,

    #[error("code already used: {code}")]
    CodeAlreadyUsed { code: String },

    #[error("short code not found: {code}")]
    NotFound { code: String },

    #[error("gave up generating a unique code after {attempts} attempts")]
    GenerationExhausted { attempts: u32 },

    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl LinkError {
    /// Returns true for errors caused by malformed caller input.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::DaysOutOfRange { .. }
                | Self::EmptyTarget
                | Self::CodeTooShort { .. }
                | Self::CodeTooLong { .. }
                | Self::CodeInvalidCharacters
        )
    }
}
