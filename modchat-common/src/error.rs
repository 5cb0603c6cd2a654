//! Errors returned by the messaging client

use thiserror::Error;

use crate::status::{Operation, StatusCategory};

/// Message prefix the service uses for rejected publishes
pub const PUBLISH_FAILED_PREFIX: &str = "Publish failed";

/// HTTP-style status code for a forbidden request
pub const STATUS_FORBIDDEN: u16 = 403;

/// A failed remote operation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ServiceError {
    pub operation: Option<Operation>,
    pub status_code: Option<u16>,
    pub category: StatusCategory,
    pub message: String,
}

impl ServiceError {
    pub fn new(
        operation: Option<Operation>,
        category: StatusCategory,
        message: impl Into<String>,
    ) -> Self {
        Self {
            operation,
            status_code: None,
            category,
            message: message.into(),
        }
    }

    pub fn with_status(mut self, status_code: u16) -> Self {
        self.status_code = Some(status_code);
        self
    }

    /// Request rejected because the keyset enforces access grants
    pub fn access_denied(operation: Operation) -> Self {
        Self::new(Some(operation), StatusCategory::AccessDenied, "Forbidden")
            .with_status(STATUS_FORBIDDEN)
    }

    /// Publish rejected by content moderation
    pub fn publish_rejected(reason: &str) -> Self {
        Self::new(
            Some(Operation::Publish),
            StatusCategory::BadRequest,
            format!("{PUBLISH_FAILED_PREFIX}: {reason}"),
        )
        .with_status(STATUS_FORBIDDEN)
    }

    /// Whether this error is a publish blocked by moderation
    ///
    /// Matches a forbidden publish, or any error whose message carries the
    /// publish-failure prefix.
    pub fn is_moderation_rejection(&self) -> bool {
        (self.operation == Some(Operation::Publish)
            && self.status_code == Some(STATUS_FORBIDDEN))
            || self.message.starts_with(PUBLISH_FAILED_PREFIX)
    }
}

/// Result alias for client operations
pub type Result<T> = std::result::Result<T, ServiceError>;
