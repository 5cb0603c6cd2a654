//! Group conversation name validation

/// Maximum length for group names in characters
pub const MAX_GROUP_NAME_LENGTH: usize = 64;

/// Validation error for group names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupNameError {
    /// Name is empty or whitespace only
    Empty,
    /// Name exceeds maximum length
    TooLong,
    /// Name contains control characters
    InvalidCharacters,
}

/// Validate a group conversation name
///
/// Checks:
/// - Not empty after trimming
/// - Does not exceed maximum length (64 characters)
/// - Contains no control characters
///
/// # Examples
///
/// ```
/// use modchat_common::validators::{GroupNameError, validate_group_name};
///
/// assert!(validate_group_name("Weekend hikers").is_ok());
/// assert_eq!(validate_group_name("   "), Err(GroupNameError::Empty));
/// assert_eq!(validate_group_name("a\tb"), Err(GroupNameError::InvalidCharacters));
/// ```
pub fn validate_group_name(name: &str) -> Result<(), GroupNameError> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(GroupNameError::Empty);
    }

    if trimmed.chars().count() > MAX_GROUP_NAME_LENGTH {
        return Err(GroupNameError::TooLong);
    }

    if trimmed.chars().any(char::is_control) {
        return Err(GroupNameError::InvalidCharacters);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert!(validate_group_name("Team").is_ok());
        assert!(validate_group_name("Release crew 2.0").is_ok());
        assert!(validate_group_name("日本語チーム").is_ok());
        assert!(validate_group_name("  padded  ").is_ok());
        assert!(validate_group_name(&"a".repeat(MAX_GROUP_NAME_LENGTH)).is_ok());
    }

    #[test]
    fn test_empty() {
        assert_eq!(validate_group_name(""), Err(GroupNameError::Empty));
        assert_eq!(validate_group_name(" \t "), Err(GroupNameError::Empty));
    }

    #[test]
    fn test_too_long() {
        let name = "a".repeat(MAX_GROUP_NAME_LENGTH + 1);
        assert_eq!(validate_group_name(&name), Err(GroupNameError::TooLong));
    }

    #[test]
    fn test_control_characters() {
        assert_eq!(
            validate_group_name("team\nname"),
            Err(GroupNameError::InvalidCharacters)
        );
        assert_eq!(
            validate_group_name("team\0"),
            Err(GroupNameError::InvalidCharacters)
        );
    }
}
