//! Chat message validation

/// Maximum length for chat messages in characters
pub const MAX_MESSAGE_LENGTH: usize = 1024;

/// Validation error for chat messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageError {
    /// Message is empty or whitespace only
    Empty,
    /// Message exceeds maximum length
    TooLong,
    /// Message contains control characters other than newline and tab
    InvalidCharacters,
}

/// Validate a chat message before publishing
///
/// Content moderation is not checked here; that is the service's job.
///
/// # Examples
///
/// ```
/// use modchat_common::validators::{MessageError, validate_message};
///
/// assert!(validate_message("hello").is_ok());
/// assert_eq!(validate_message(""), Err(MessageError::Empty));
/// ```
pub fn validate_message(message: &str) -> Result<(), MessageError> {
    if message.trim().is_empty() {
        return Err(MessageError::Empty);
    }

    if message.chars().count() > MAX_MESSAGE_LENGTH {
        return Err(MessageError::TooLong);
    }

    if message
        .chars()
        .any(|c| c.is_control() && c != '\n' && c != '\t')
    {
        return Err(MessageError::InvalidCharacters);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_messages() {
        assert!(validate_message("hi").is_ok());
        assert!(validate_message("line one\nline two").is_ok());
        assert!(validate_message("tab\tseparated").is_ok());
        assert!(validate_message(&"x".repeat(MAX_MESSAGE_LENGTH)).is_ok());
    }

    #[test]
    fn test_empty() {
        assert_eq!(validate_message(""), Err(MessageError::Empty));
        assert_eq!(validate_message("   "), Err(MessageError::Empty));
    }

    #[test]
    fn test_too_long() {
        let message = "x".repeat(MAX_MESSAGE_LENGTH + 1);
        assert_eq!(validate_message(&message), Err(MessageError::TooLong));
    }

    #[test]
    fn test_control_characters() {
        assert_eq!(
            validate_message("bell\u{7}"),
            Err(MessageError::InvalidCharacters)
        );
    }
}
