use thiserror::Error;

/// A write that would violate a field invariant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Description must be at least {min} characters long")]
    DescriptionTooShort { min: usize, actual: usize },

    #[error("Description is required")]
    MissingDescription,

    #[error("validation errors")]
    InvalidStrength(String),
}
