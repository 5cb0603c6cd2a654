//! Remote error handling

use modchat_common::ServiceError;

use crate::ModchatApp;
use crate::surface::classify_error;

impl ModchatApp {
    /// Log a failed remote call and apply the error policy
    ///
    /// A moderated publish queues a blocking alert and an access-denied
    /// error restricts the session. Anything else is only logged.
    pub fn handle_service_error(&mut self, error: &ServiceError) {
        tracing::warn!(
            operation = ?error.operation,
            status = ?error.status_code,
            category = ?error.category,
            "{error}"
        );

        let outcome = classify_error(error);
        if let Some(alert) = outcome.alert {
            self.alerts.push_back(alert);
        }
        if outcome.access_denied && self.session.restrict() {
            tracing::warn!("access denied, keyset has access manager enabled");
        }
    }
}

#[cfg(test)]
mod tests {
    use modchat_common::{Operation, StatusCategory};

    use super::*;
    use crate::bootstrap::Screen;
    use crate::surface::Alert;

    #[test]
    fn test_one_alert_per_blocked_message() {
        let mut app = super::super::app_for("bob");

        let _ = app.handle_message_sent(Err(ServiceError::publish_rejected("spam")));
        let _ = app.handle_message_sent(Err(ServiceError::publish_rejected("spam")));
        assert_eq!(app.alerts.len(), 2);
        assert!(app.alerts.iter().all(|alert| *alert == Alert::MessageBlocked));

        // Other failures are only logged
        let _ = app.handle_message_sent(Err(ServiceError::new(
            Some(Operation::Publish),
            StatusCategory::NetworkIssues,
            "timeout",
        )));
        let _ = app.handle_typing_signal_result(Err(ServiceError::new(
            Some(Operation::Signal),
            StatusCategory::Unknown,
            "Forbidden",
        )
        .with_status(403)));
        assert_eq!(app.alerts.len(), 2);
        assert_eq!(app.session.screen(), Screen::Chat);

        let _ = app.handle_dismiss_alert();
        assert_eq!(app.alerts.len(), 1);
    }

    #[test]
    fn test_denied_publish_shows_notice_without_alert() {
        let mut app = super::super::app_for("bob");

        let _ = app.handle_message_sent(Err(ServiceError::access_denied(Operation::Publish)));
        assert!(app.alerts.is_empty());
        assert_eq!(app.session.screen(), Screen::AccessManagerEnabled);
    }
}
