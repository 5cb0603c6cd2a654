//! Remote error policy
//!
//! Every failed remote call is logged. A moderated publish raises a blocking
//! alert, an access-denied error restricts the session, and anything else is
//! swallowed.

use modchat_common::{ServiceError, StatusCategory};

/// Blocking alert shown over the chat surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alert {
    /// The service rejected a publish by moderation
    MessageBlocked,
}

/// What the application should do about an error
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ErrorOutcome {
    pub alert: Option<Alert>,
    pub access_denied: bool,
}

/// Classify a remote error
///
/// A denied request is never a moderation rejection, even for a forbidden
/// publish; the access notice replaces the chat surface instead.
pub fn classify_error(error: &ServiceError) -> ErrorOutcome {
    let access_denied = error.category == StatusCategory::AccessDenied;
    ErrorOutcome {
        alert: (!access_denied && error.is_moderation_rejection())
            .then_some(Alert::MessageBlocked),
        access_denied,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modchat_common::Operation;

    #[test]
    fn test_forbidden_publish_raises_alert() {
        let error = ServiceError::new(
            Some(Operation::Publish),
            StatusCategory::Unknown,
            "Forbidden",
        )
        .with_status(403);
        assert_eq!(classify_error(&error).alert, Some(Alert::MessageBlocked));
    }

    #[test]
    fn test_publish_failed_message_raises_alert() {
        let error = ServiceError::new(None, StatusCategory::Unknown, "Publish failed: blocked");
        assert_eq!(classify_error(&error).alert, Some(Alert::MessageBlocked));

        let error = ServiceError::publish_rejected("message blocked by moderation");
        assert_eq!(
            classify_error(&error),
            ErrorOutcome {
                alert: Some(Alert::MessageBlocked),
                access_denied: false,
            }
        );
    }

    #[test]
    fn test_other_errors_raise_nothing() {
        let not_found = ServiceError::new(
            Some(Operation::Publish),
            StatusCategory::BadRequest,
            "Bad request",
        )
        .with_status(400);
        assert_eq!(classify_error(&not_found), ErrorOutcome::default());

        let other_forbidden = ServiceError::new(
            Some(Operation::History),
            StatusCategory::Unknown,
            "Forbidden",
        )
        .with_status(403);
        assert_eq!(classify_error(&other_forbidden).alert, None);

        let network = ServiceError::new(None, StatusCategory::NetworkIssues, "timeout");
        assert_eq!(classify_error(&network), ErrorOutcome::default());
    }

    #[test]
    fn test_access_denied_restricts() {
        let error = ServiceError::access_denied(Operation::GetMemberships);
        let outcome = classify_error(&error);
        assert!(outcome.access_denied);
        assert_eq!(outcome.alert, None);
    }

    #[test]
    fn test_denied_publish_is_not_blocked_message() {
        let error = ServiceError::access_denied(Operation::Publish);
        assert!(error.is_moderation_rejection());
        assert_eq!(
            classify_error(&error),
            ErrorOutcome {
                alert: None,
                access_denied: true,
            }
        );
    }
}
