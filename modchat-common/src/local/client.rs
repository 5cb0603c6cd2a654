//! Client handle for the in-process service

use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::broadcast;

use super::LocalService;
use crate::client::{MessagingClient, ServiceEvent};
use crate::error::{Result, ServiceError};
use crate::ids::{ChannelId, UserId};
use crate::model::{Channel, ChannelMember, ChatMessage, Membership, PresenceSnapshot, User};
use crate::status::{Operation, StatusCategory, StatusEvent};

/// A [`MessagingClient`] bound to one identity of a [`LocalService`]
#[derive(Clone)]
pub struct LocalClient {
    user_id: UserId,
    service: LocalService,
}

impl LocalClient {
    pub(super) fn new(user_id: UserId, service: LocalService) -> Self {
        Self { user_id, service }
    }

    /// Reject the request when access management is enabled
    fn authorize(&self, operation: Operation) -> Result<()> {
        if self.service.settings.access_manager {
            tracing::debug!(%operation, user = %self.user_id, "access denied");
            self.service
                .emit(ServiceEvent::Status(StatusEvent::access_denied(operation)));
            return Err(ServiceError::access_denied(operation));
        }
        Ok(())
    }
}

#[async_trait]
impl MessagingClient for LocalClient {
    fn user_id(&self) -> &UserId {
        &self.user_id
    }

    async fn fetch_user(&self, id: &UserId) -> Result<Option<User>> {
        self.authorize(Operation::GetUser)?;
        let state = self.service.state.read().await;
        Ok(state.user(id).cloned())
    }

    async fn fetch_users(&self) -> Result<Vec<User>> {
        self.authorize(Operation::GetAllUsers)?;
        let state = self.service.state.read().await;
        Ok(state.users.clone())
    }

    async fn fetch_memberships(&self) -> Result<Vec<Membership>> {
        self.authorize(Operation::GetMemberships)?;
        let state = self.service.state.read().await;
        let memberships = state
            .memberships
            .get(&self.user_id)
            .map(|joined| {
                joined
                    .iter()
                    .map(|id| Membership::new(state.channel_or_bare(id)))
                    .collect()
            })
            .unwrap_or_default();
        Ok(memberships)
    }

    async fn fetch_channel_members(&self, channel: &ChannelId) -> Result<Vec<ChannelMember>> {
        self.authorize(Operation::GetChannelMembers)?;
        let state = self.service.state.read().await;
        Ok(state
            .users
            .iter()
            .filter(|user| state.is_member(&user.id, channel))
            .map(|user| ChannelMember { user: user.clone() })
            .collect())
    }

    async fn fetch_presence(&self, channels: &[ChannelId]) -> Result<PresenceSnapshot> {
        self.authorize(Operation::HereNow)?;
        let state = self.service.state.read().await;
        let mut snapshot = PresenceSnapshot::default();
        for channel in channels {
            let occupants: BTreeSet<UserId> = state
                .subscriptions
                .iter()
                .filter(|(_, subscribed)| subscribed.contains(channel))
                .map(|(user, _)| user.clone())
                .collect();
            snapshot.channels.insert(channel.clone(), occupants);
        }
        Ok(snapshot)
    }

    async fn fetch_history(&self, channel: &ChannelId, count: usize) -> Result<Vec<ChatMessage>> {
        self.authorize(Operation::History)?;
        let state = self.service.state.read().await;
        let history = state
            .history
            .get(channel)
            .map(|messages| {
                let skip = messages.len().saturating_sub(count);
                messages[skip..].to_vec()
            })
            .unwrap_or_default();
        Ok(history)
    }

    async fn set_channel_metadata(&self, channel: Channel) -> Result<Channel> {
        self.authorize(Operation::SetChannelMetadata)?;
        let mut state = self.service.state.write().await;
        state.channels.insert(channel.id.clone(), channel.clone());
        drop(state);

        self.service
            .emit(ServiceEvent::ChannelMetadataChanged(channel.clone()));
        Ok(channel)
    }

    async fn set_channel_members(&self, channel: &ChannelId, users: &[UserId]) -> Result<()> {
        self.authorize(Operation::SetChannelMembers)?;
        let mut state = self.service.state.write().await;

        if let Some(unknown) = users.iter().find(|id| state.user(id).is_none()) {
            return Err(ServiceError::new(
                Some(Operation::SetChannelMembers),
                StatusCategory::BadRequest,
                format!("Unknown user: {unknown}"),
            )
            .with_status(400));
        }

        let added: Vec<UserId> = users
            .iter()
            .filter(|user| state.add_membership(user, channel))
            .cloned()
            .collect();
        drop(state);

        for user in added {
            self.service.emit(ServiceEvent::MembershipChanged {
                user,
                channel: channel.clone(),
            });
        }
        Ok(())
    }

    async fn set_memberships(&self, channels: &[ChannelId]) -> Result<Vec<Membership>> {
        self.authorize(Operation::SetMemberships)?;
        let mut state = self.service.state.write().await;

        let mut added = Vec::new();
        for channel in channels {
            if state.add_membership(&self.user_id, channel) {
                added.push(channel.clone());
            }
        }

        let memberships = channels
            .iter()
            .map(|id| Membership {
                channel: state.channel_or_bare(id),
                updated: Some(Utc::now()),
            })
            .collect();
        drop(state);

        for channel in added {
            self.service.emit(ServiceEvent::MembershipChanged {
                user: self.user_id.clone(),
                channel,
            });
        }
        Ok(memberships)
    }

    async fn remove_memberships(&self, channels: &[ChannelId]) -> Result<()> {
        self.authorize(Operation::RemoveMemberships)?;
        let mut state = self.service.state.write().await;

        let removed: Vec<ChannelId> = channels
            .iter()
            .filter(|channel| state.remove_membership(&self.user_id, channel))
            .cloned()
            .collect();
        drop(state);

        for channel in removed {
            self.service.emit(ServiceEvent::MembershipChanged {
                user: self.user_id.clone(),
                channel,
            });
        }
        Ok(())
    }

    async fn publish(&self, channel: &ChannelId, text: &str) -> Result<u64> {
        self.authorize(Operation::Publish)?;

        if let Some(word) = self.service.settings.blocked_word(text) {
            tracing::info!(%channel, user = %self.user_id, word, "publish blocked by moderation");
            return Err(ServiceError::publish_rejected("message blocked by moderation"));
        }

        let mut state = self.service.state.write().await;
        let message = ChatMessage {
            timetoken: state.next_timetoken(),
            channel: channel.clone(),
            publisher: self.user_id.clone(),
            text: text.to_string(),
            sent_at: Utc::now(),
        };
        state
            .history
            .entry(channel.clone())
            .or_default()
            .push(message.clone());
        drop(state);

        let timetoken = message.timetoken;
        self.service.emit(ServiceEvent::Message(message));
        Ok(timetoken)
    }

    async fn signal_typing(&self, channel: &ChannelId, typing: bool) -> Result<()> {
        self.authorize(Operation::Signal)?;
        self.service.emit(ServiceEvent::TypingChanged {
            channel: channel.clone(),
            user: self.user_id.clone(),
            typing,
        });
        Ok(())
    }

    async fn subscribe(&self, channels: &[ChannelId]) -> Result<()> {
        self.authorize(Operation::Subscribe)?;
        let mut state = self.service.state.write().await;

        let next: BTreeSet<ChannelId> = channels.iter().cloned().collect();
        let previous = state
            .subscriptions
            .insert(self.user_id.clone(), next.clone())
            .unwrap_or_default();
        drop(state);

        for channel in next.difference(&previous) {
            self.service.emit(ServiceEvent::PresenceChanged {
                channel: channel.clone(),
                user: self.user_id.clone(),
                present: true,
            });
        }
        for channel in previous.difference(&next) {
            self.service.emit(ServiceEvent::PresenceChanged {
                channel: channel.clone(),
                user: self.user_id.clone(),
                present: false,
            });
        }
        Ok(())
    }

    fn events(&self) -> broadcast::Receiver<ServiceEvent> {
        self.service.events.subscribe()
    }
}
