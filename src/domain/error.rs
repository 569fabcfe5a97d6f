use thiserror::Error;

/// Domain-level errors for the checking session
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("At least {required} drugs are required to check interactions, {selected} selected")]
    NotEnoughSelections { required: usize, selected: usize },

    #[error("An interaction check is already in progress")]
    CheckInProgress,
}
