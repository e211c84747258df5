// Error taxonomy shared by the engine, the registry and the service layer.

use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Every way a draft operation can be rejected.
///
/// None of these is fatal: the registry and every other draft stay usable
/// after any single operation fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("validation error for field `{field}`: {message}")]
    Validation { field: String, message: String },

    #[error("draft `{id}` does not exist")]
    NotFound { id: String },

    #[error("draft `{id}` already exists")]
    AlreadyExists { id: String },

    #[error("`{requested}` cannot pick now; it is `{current}`'s turn")]
    NotYourTurn { requested: String, current: String },

    #[error("draft is complete; all {total_rounds} picks have been made")]
    DraftAlreadyComplete { total_rounds: usize },

    #[error("`{selection}` is not among the remaining options")]
    OptionNotAvailable { selection: String },

    #[error("a draft needs at least one drafter")]
    InvalidDrafters,

    #[error("rounds per drafter must be at least 1")]
    InvalidRounds,

    #[error("{required} picks need at least {required} options, got {available}")]
    InsufficientOptions { available: usize, required: usize },

    #[error("current drafter `{drafter}` is not in the drafter list")]
    UnknownDrafter { drafter: String },
}

/// Coarse classification of a [`DraftError`], used by callers that translate
/// failures into user-facing messages or transport status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Missing or malformed request input.
    Validation,
    /// The referenced draft id does not exist.
    NotFound,
    /// The draft id is already taken.
    Conflict,
    /// Someone other than the current drafter tried to pick.
    TurnViolation,
    /// A pick was attempted after the last round.
    Completion,
    /// The selection is not in the remaining pool.
    OptionUnavailable,
    /// Drafter/round/option counts are inconsistent at creation.
    Invariant,
    /// Internal consistency fault; unreachable while invariants hold.
    Internal,
}

impl DraftError {
    /// Shorthand for building a [`DraftError::Validation`].
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        DraftError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DraftError::Validation { .. } | DraftError::InvalidRounds => ErrorKind::Validation,
            DraftError::NotFound { .. } => ErrorKind::NotFound,
            DraftError::AlreadyExists { .. } => ErrorKind::Conflict,
            DraftError::NotYourTurn { .. } => ErrorKind::TurnViolation,
            DraftError::DraftAlreadyComplete { .. } => ErrorKind::Completion,
            DraftError::OptionNotAvailable { .. } => ErrorKind::OptionUnavailable,
            DraftError::InvalidDrafters | DraftError::InsufficientOptions { .. } => {
                ErrorKind::Invariant
            }
            DraftError::UnknownDrafter { .. } => ErrorKind::Internal,
        }
    }
}
