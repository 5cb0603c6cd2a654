//! User and channel identifiers
//!
//! Channel identifiers carry a naming convention that tells the client how a
//! conversation should be rendered:
//! - `direct.<idA>@<idB>` is a one-to-one conversation between two users
//! - `group.<token>` is a multi-party conversation
//! - anything else is a plain channel (including the `default` placeholder)
//!
//! [`ChannelKind`] turns that convention into a tagged value so the rest of
//! the code never parses the prefixes itself.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Prefix of one-to-one conversation ids
pub const DIRECT_PREFIX: &str = "direct.";

/// Prefix of multi-party conversation ids
pub const GROUP_PREFIX: &str = "group.";

/// Separator between the two participants of a direct conversation id
pub const DIRECT_SEPARATOR: char = '@';

/// Placeholder channel id used before any membership has loaded
pub const DEFAULT_CHANNEL_ID: &str = "default";

// =============================================================================
// UserId
// =============================================================================

/// Identifier of a user in the directory
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for UserId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

// =============================================================================
// ChannelId
// =============================================================================

/// Identifier of a channel
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelId(String);

impl ChannelId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The placeholder channel shown before memberships load
    pub fn placeholder() -> Self {
        Self::new(DEFAULT_CHANNEL_ID)
    }

    /// Build a direct conversation id between `first` and `second`
    ///
    /// # Examples
    ///
    /// ```
    /// use modchat_common::ids::{ChannelId, UserId};
    ///
    /// let id = ChannelId::direct(&UserId::new("alice"), &UserId::new("bob"));
    /// assert_eq!(id.as_str(), "direct.alice@bob");
    /// ```
    pub fn direct(first: &UserId, second: &UserId) -> Self {
        Self(format!("{DIRECT_PREFIX}{first}{DIRECT_SEPARATOR}{second}"))
    }

    /// Build a group conversation id from an opaque token
    pub fn group(token: impl fmt::Display) -> Self {
        Self(format!("{GROUP_PREFIX}{token}"))
    }

    /// Classify this id relative to the acting user
    pub fn kind(&self, current_user: &UserId) -> ChannelKind {
        ChannelKind::classify(self, current_user)
    }

    /// Whether this id names a direct or group conversation
    pub fn is_conversation(&self) -> bool {
        self.0.starts_with(DIRECT_PREFIX) || self.0.starts_with(GROUP_PREFIX)
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ChannelId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ChannelId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

// =============================================================================
// ChannelKind
// =============================================================================

/// What a channel id means for the acting user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelKind {
    /// One-to-one conversation with `counterpart`
    Direct { counterpart: UserId },
    /// Multi-party conversation, rendered with its own metadata
    Group,
    /// Any other channel
    Default,
}

impl ChannelKind {
    /// Classify a channel id
    ///
    /// For direct ids the counterpart is the participant that is not
    /// `current_user`. When the acting user is not a participant at all, the
    /// whole remainder after the prefix is returned with the separator
    /// removed, which will not match any directory entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use modchat_common::ids::{ChannelId, ChannelKind, UserId};
    ///
    /// let bob = UserId::new("bob");
    /// assert_eq!(
    ///     ChannelKind::classify(&ChannelId::new("direct.alice@bob"), &bob),
    ///     ChannelKind::Direct { counterpart: UserId::new("alice") }
    /// );
    /// assert_eq!(ChannelKind::classify(&ChannelId::new("group.team"), &bob), ChannelKind::Group);
    /// assert_eq!(ChannelKind::classify(&ChannelId::new("lobby"), &bob), ChannelKind::Default);
    /// ```
    pub fn classify(id: &ChannelId, current_user: &UserId) -> Self {
        let raw = id.as_str();

        if let Some(participants) = raw.strip_prefix(DIRECT_PREFIX) {
            return ChannelKind::Direct {
                counterpart: direct_counterpart(participants, current_user),
            };
        }

        if raw.starts_with(GROUP_PREFIX) {
            return ChannelKind::Group;
        }

        ChannelKind::Default
    }

    pub fn is_direct(&self) -> bool {
        matches!(self, ChannelKind::Direct { .. })
    }

    pub fn is_group(&self) -> bool {
        matches!(self, ChannelKind::Group)
    }
}

/// Pick the participant of `first@second` that is not `current_user`
fn direct_counterpart(participants: &str, current_user: &UserId) -> UserId {
    let current = current_user.as_str();

    match participants.split_once(DIRECT_SEPARATOR) {
        Some((first, second)) if first == current => UserId::new(second),
        Some((first, second)) if second == current => UserId::new(first),
        Some((first, second)) => UserId::new(format!("{first}{second}")),
        None if participants == current => UserId::new(""),
        None => UserId::new(participants),
    }
}
