//! Messaging client contract
//!
//! Everything the chat client knows about the hosted service goes through
//! [`MessagingClient`]. A handle is built once at startup and passed to
//! whoever needs it as a [`ClientHandle`].

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::error::Result;
use crate::ids::{ChannelId, UserId};
use crate::model::{Channel, ChannelMember, ChatMessage, Membership, PresenceSnapshot, User};
use crate::status::StatusEvent;

/// Shared, type-erased client handle
pub type ClientHandle = Arc<dyn MessagingClient>;

/// Realtime notification pushed by the service
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceEvent {
    Status(StatusEvent),
    Message(ChatMessage),
    MembershipChanged {
        user: UserId,
        channel: ChannelId,
    },
    ChannelMetadataChanged(Channel),
    UserMetadataChanged(User),
    PresenceChanged {
        channel: ChannelId,
        user: UserId,
        present: bool,
    },
    TypingChanged {
        channel: ChannelId,
        user: UserId,
        typing: bool,
    },
}

/// Operations the chat client needs from the messaging service
///
/// All calls are asynchronous and eventually consistent: a mutation followed
/// by a query may or may not observe the mutation yet.
#[async_trait]
pub trait MessagingClient: Send + Sync {
    /// Identity this handle was constructed with
    fn user_id(&self) -> &UserId;

    async fn fetch_user(&self, id: &UserId) -> Result<Option<User>>;

    /// Full user directory, in service order
    async fn fetch_users(&self) -> Result<Vec<User>>;

    /// Memberships of the acting user, in service order
    async fn fetch_memberships(&self) -> Result<Vec<Membership>>;

    async fn fetch_channel_members(&self, channel: &ChannelId) -> Result<Vec<ChannelMember>>;

    async fn fetch_presence(&self, channels: &[ChannelId]) -> Result<PresenceSnapshot>;

    /// Up to `count` most recent messages, oldest first
    async fn fetch_history(&self, channel: &ChannelId, count: usize) -> Result<Vec<ChatMessage>>;

    /// Create or replace channel metadata
    async fn set_channel_metadata(&self, channel: Channel) -> Result<Channel>;

    /// Add `users` to the roster of `channel`
    async fn set_channel_members(&self, channel: &ChannelId, users: &[UserId]) -> Result<()>;

    /// Add memberships for the acting user
    async fn set_memberships(&self, channels: &[ChannelId]) -> Result<Vec<Membership>>;

    /// Remove memberships of the acting user
    async fn remove_memberships(&self, channels: &[ChannelId]) -> Result<()>;

    /// Publish a message, returning its timetoken
    async fn publish(&self, channel: &ChannelId, text: &str) -> Result<u64>;

    async fn signal_typing(&self, channel: &ChannelId, typing: bool) -> Result<()>;

    /// Replace the set of channels this handle receives on
    async fn subscribe(&self, channels: &[ChannelId]) -> Result<()>;

    /// A fresh receiver of service events
    fn events(&self) -> broadcast::Receiver<ServiceEvent>;
}
