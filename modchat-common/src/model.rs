//! Entities owned by the messaging service
//!
//! The client only ever holds copies of these; every change goes through
//! [`crate::MessagingClient`].

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::ids::{ChannelId, UserId};

/// Custom field holding an avatar URL
pub const PROFILE_URL_FIELD: &str = "profileUrl";

// =============================================================================
// User
// =============================================================================

/// Directory entry for a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub custom: Map<String, Value>,
}

impl User {
    pub fn new(id: impl Into<UserId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
            profile_url: None,
            email: None,
            custom: Map::new(),
        }
    }

    /// Name to render, falling back to the id
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(self.id.as_str())
    }
}

// =============================================================================
// Channel
// =============================================================================

/// Channel metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub id: ChannelId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub custom: Map<String, Value>,
}

impl Channel {
    /// A channel known only by its id
    pub fn bare(id: impl Into<ChannelId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            description: None,
            custom: Map::new(),
        }
    }

    pub fn named(id: impl Into<ChannelId>, name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::bare(id)
        }
    }

    /// Name to render, falling back to the id
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(self.id.as_str())
    }

    pub fn profile_url(&self) -> Option<&str> {
        self.custom.get(PROFILE_URL_FIELD).and_then(Value::as_str)
    }

    pub fn set_profile_url(&mut self, url: impl Into<String>) {
        self.custom
            .insert(PROFILE_URL_FIELD.to_string(), Value::String(url.into()));
    }
}

// =============================================================================
// Membership / roster
// =============================================================================

/// A channel the acting user belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Membership {
    pub channel: Channel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,
}

impl Membership {
    pub fn new(channel: Channel) -> Self {
        Self {
            channel,
            updated: None,
        }
    }

    pub fn id(&self) -> &ChannelId {
        &self.channel.id
    }
}

/// One entry of a channel roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelMember {
    pub user: User,
}

// =============================================================================
// Presence
// =============================================================================

/// Occupants per channel at the time of the query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PresenceSnapshot {
    pub channels: HashMap<ChannelId, BTreeSet<UserId>>,
}

impl PresenceSnapshot {
    /// Occupants of `channel`, empty when the channel was not part of the query
    pub fn occupants(&self, channel: &ChannelId) -> impl Iterator<Item = &UserId> {
        self.channels.get(channel).into_iter().flatten()
    }

    pub fn is_present(&self, channel: &ChannelId, user: &UserId) -> bool {
        self.channels
            .get(channel)
            .is_some_and(|occupants| occupants.contains(user))
    }

    pub fn occupancy(&self, channel: &ChannelId) -> usize {
        self.channels.get(channel).map_or(0, BTreeSet::len)
    }
}

// =============================================================================
// Messages
// =============================================================================

/// A published chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Service-assigned ordering token
    pub timetoken: u64,
    pub channel: ChannelId,
    pub publisher: UserId,
    pub text: String,
    pub sent_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_fallbacks() {
        let channel = Channel::bare("group.team");
        assert_eq!(channel.display_name(), "group.team");

        let named = Channel::named("group.team", "Team");
        assert_eq!(named.display_name(), "Team");

        let mut user = User::new("u1", "Alice");
        assert_eq!(user.display_name(), "Alice");
        user.name = None;
        assert_eq!(user.display_name(), "u1");
    }

    #[test]
    fn test_profile_url_custom_field() {
        let mut channel = Channel::bare("direct.a@b");
        assert_eq!(channel.profile_url(), None);
        channel.set_profile_url("https://example.com/a.jpg");
        assert_eq!(channel.profile_url(), Some("https://example.com/a.jpg"));
    }

    #[test]
    fn test_presence_lookup() {
        let mut snapshot = PresenceSnapshot::default();
        snapshot.channels.insert(
            ChannelId::new("group.team"),
            [UserId::new("alice"), UserId::new("bob")].into_iter().collect(),
        );

        let team = ChannelId::new("group.team");
        assert!(snapshot.is_present(&team, &UserId::new("alice")));
        assert!(!snapshot.is_present(&team, &UserId::new("carol")));
        assert!(!snapshot.is_present(&ChannelId::new("other"), &UserId::new("alice")));
        assert_eq!(snapshot.occupancy(&team), 2);
        assert_eq!(snapshot.occupants(&ChannelId::new("other")).count(), 0);
    }

    #[test]
    fn test_user_deserializes_camel_case() {
        let json = r#"{"id":"u1","name":"Alice","profileUrl":"https://x/y.png"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.profile_url.as_deref(), Some("https://x/y.png"));
        assert!(user.custom.is_empty());
    }
}
