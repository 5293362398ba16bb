use crate::error::ValidationError;

/// Shortest description a power may carry.
pub const MIN_DESCRIPTION_LEN: usize = 20;

/// Checks a candidate power description before it is written.
///
/// Length is counted in characters, not bytes, so multi-byte text is not
/// accepted early.
pub fn validate_description(description: &str) -> Result<(), ValidationError> {
    let actual = description.chars().count();
    if actual < MIN_DESCRIPTION_LEN {
        return Err(ValidationError::DescriptionTooShort {
            min: MIN_DESCRIPTION_LEN,
            actual,
        });
    }
    Ok(())
}
