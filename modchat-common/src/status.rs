//! Status events reported by the messaging service

use std::fmt;

/// Broad classification of a status event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCategory {
    Connected,
    Reconnected,
    NetworkIssues,
    /// The keyset has access management enabled and the request lacked a grant
    AccessDenied,
    BadRequest,
    Unknown,
}

/// The client operation a status or error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Subscribe,
    Publish,
    Signal,
    History,
    HereNow,
    GetUser,
    GetAllUsers,
    GetMemberships,
    SetMemberships,
    RemoveMemberships,
    GetChannelMembers,
    SetChannelMembers,
    SetChannelMetadata,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Subscribe => "subscribe",
            Operation::Publish => "publish",
            Operation::Signal => "signal",
            Operation::History => "history",
            Operation::HereNow => "here-now",
            Operation::GetUser => "get-user",
            Operation::GetAllUsers => "get-all-users",
            Operation::GetMemberships => "get-memberships",
            Operation::SetMemberships => "set-memberships",
            Operation::RemoveMemberships => "remove-memberships",
            Operation::GetChannelMembers => "get-channel-members",
            Operation::SetChannelMembers => "set-channel-members",
            Operation::SetChannelMetadata => "set-channel-metadata",
        };
        f.write_str(name)
    }
}

/// A status notification from the service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEvent {
    pub category: StatusCategory,
    pub operation: Option<Operation>,
    pub status_code: Option<u16>,
}

impl StatusEvent {
    pub fn new(category: StatusCategory) -> Self {
        Self {
            category,
            operation: None,
            status_code: None,
        }
    }

    pub fn access_denied(operation: Operation) -> Self {
        Self {
            category: StatusCategory::AccessDenied,
            operation: Some(operation),
            status_code: Some(403),
        }
    }

    pub fn is_access_denied(&self) -> bool {
        self.category == StatusCategory::AccessDenied
    }
}
