use thiserror::Error;

use crate::models::slot_key::SlotKeyError;

/// Failures surfaced by the availability board.
///
/// None of these are fatal: the board turns each one into a notice for the
/// user and keeps running.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AvailabilityError {
    /// No owner identity is available, so nothing can be loaded or saved.
    #[error("Sign in to view and edit your availability")]
    NotAuthenticated,

    /// A gesture finished while no category was selected.
    #[error("Select at least one category before marking availability")]
    NoCategorySelected,

    /// A slot key could not be decoded. Indicates a bug, never retried.
    #[error("Malformed slot key '{0}'")]
    MalformedKey(String),

    /// The store rejected a fetch, delete or insert.
    #[error("Could not save availability: {0}")]
    PersistenceFailure(String),
}

impl AvailabilityError {
    /// Wrap a store error, keeping its context chain in the message.
    pub fn persistence(err: anyhow::Error) -> Self {
        Self::PersistenceFailure(format!("{:#}", err))
    }

    /// Text shown to the user for this failure.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

impl From<SlotKeyError> for AvailabilityError {
    fn from(err: SlotKeyError) -> Self {
        match err {
            SlotKeyError::MalformedKey(raw) => Self::MalformedKey(raw),
        }
    }
}
