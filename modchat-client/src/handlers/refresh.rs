//! Query refresh commands
//!
//! Every query is re-run through [`Refresh`]. Each request takes a fresh
//! generation from its [`Query`](crate::surface::Query) and the result
//! message carries it back, so a slow response never overwrites a newer one.

use iced::Task;
use modchat_common::{
    ChannelId, ChannelMember, ChatMessage, HISTORY_FETCH_COUNT, Membership, PresenceSnapshot,
    ServiceError, User,
};

use crate::ModchatApp;
use crate::types::{Message, Refresh};

/// Queries re-run by [`Refresh::All`], in issue order
const ALL_QUERIES: [Refresh; 6] = [
    Refresh::CurrentUser,
    Refresh::Users,
    Refresh::Memberships,
    Refresh::ChannelMembers,
    Refresh::Presence,
    Refresh::History,
];

impl ModchatApp {
    // ==================== Issue ====================

    /// Re-run one query (or all of them)
    pub fn handle_refresh(&mut self, refresh: Refresh) -> Task<Message> {
        let Some(client) = self.session.client().cloned() else {
            return Task::none();
        };

        match refresh {
            Refresh::All => {
                let tasks: Vec<Task<Message>> = ALL_QUERIES
                    .into_iter()
                    .map(|query| self.handle_refresh(query))
                    .collect();
                Task::batch(tasks)
            }
            Refresh::CurrentUser => {
                let generation = self.surface.current_user.begin();
                let id = client.user_id().clone();
                Task::perform(
                    async move { client.fetch_user(&id).await },
                    move |result| Message::CurrentUserLoaded(generation, result),
                )
            }
            Refresh::Users => {
                let generation = self.surface.users.begin();
                Task::perform(
                    async move { client.fetch_users().await },
                    move |result| Message::UsersLoaded(generation, result),
                )
            }
            Refresh::Memberships => {
                let generation = self.surface.memberships.begin();
                Task::perform(
                    async move { client.fetch_memberships().await },
                    move |result| Message::MembershipsLoaded(generation, result),
                )
            }
            Refresh::ChannelMembers => {
                let Some(channel) = self.surface.selected_id().cloned() else {
                    return Task::none();
                };
                let generation = self.surface.channel_members.begin();
                let requested = channel.clone();
                Task::perform(
                    async move { client.fetch_channel_members(&requested).await },
                    move |result| Message::ChannelMembersLoaded {
                        generation,
                        channel,
                        result,
                    },
                )
            }
            Refresh::Presence => {
                let channels = self.surface.presence_channels();
                if channels.is_empty() {
                    return Task::none();
                }
                let generation = self.surface.presence.begin();
                Task::perform(
                    async move { client.fetch_presence(&channels).await },
                    move |result| Message::PresenceLoaded(generation, result),
                )
            }
            Refresh::History => {
                let Some(channel) = self.surface.selected_id().cloned() else {
                    return Task::none();
                };
                let generation = self.surface.history.begin();
                let requested = channel.clone();
                Task::perform(
                    async move {
                        client
                            .fetch_history(&requested, HISTORY_FETCH_COUNT)
                            .await
                    },
                    move |result| Message::HistoryLoaded {
                        generation,
                        channel,
                        result,
                    },
                )
            }
        }
    }

    /// Subscribe to the joined channels when the set changed
    pub fn sync_subscription(&mut self) -> Task<Message> {
        let Some(client) = self.session.client().cloned() else {
            return Task::none();
        };
        let channels = self.surface.subscription_channels();
        if !self.surface.needs_subscribe(&channels) {
            return Task::none();
        }

        tracing::debug!(count = channels.len(), "subscribing");
        Task::perform(
            async move {
                let result = client.subscribe(&channels).await;
                (channels, result)
            },
            |(channels, result)| Message::SubscribeResult(channels, result),
        )
    }

    // ==================== Results ====================

    pub fn handle_current_user_loaded(
        &mut self,
        generation: u64,
        result: Result<Option<User>, ServiceError>,
    ) -> Task<Message> {
        match result {
            Ok(user) => {
                if user.is_none() {
                    tracing::debug!(user = %self.surface.user_id(), "acting user not in directory");
                }
                self.surface.current_user.apply(generation, user);
            }
            Err(e) => {
                self.surface.current_user.settle(generation);
                self.handle_service_error(&e);
            }
        }
        Task::none()
    }

    pub fn handle_users_loaded(
        &mut self,
        generation: u64,
        result: Result<Vec<User>, ServiceError>,
    ) -> Task<Message> {
        match result {
            Ok(users) => {
                self.surface.apply_users(generation, users);
            }
            Err(e) => {
                self.surface.users.settle(generation);
                self.handle_service_error(&e);
            }
        }
        Task::none()
    }

    /// Memberships drive the selection, presence and the subscription
    pub fn handle_memberships_loaded(
        &mut self,
        generation: u64,
        result: Result<Vec<Membership>, ServiceError>,
    ) -> Task<Message> {
        let memberships = match result {
            Ok(memberships) => memberships,
            Err(e) => {
                self.surface.memberships.settle(generation);
                self.handle_service_error(&e);
                return Task::none();
            }
        };

        let mut tasks = Vec::new();
        if let Some(selected) = self.surface.apply_memberships(generation, memberships) {
            tracing::debug!(channel = %selected, "selection moved");
            tasks.push(self.on_selection_changed());
        }
        tasks.push(self.handle_refresh(Refresh::Presence));
        tasks.push(self.sync_subscription());
        Task::batch(tasks)
    }

    pub fn handle_channel_members_loaded(
        &mut self,
        generation: u64,
        channel: ChannelId,
        result: Result<Vec<ChannelMember>, ServiceError>,
    ) -> Task<Message> {
        match result {
            Ok(members) => {
                self.surface
                    .apply_channel_members(generation, &channel, members);
            }
            Err(e) => {
                self.surface.channel_members.settle(generation);
                self.handle_service_error(&e);
            }
        }
        Task::none()
    }

    pub fn handle_presence_loaded(
        &mut self,
        generation: u64,
        result: Result<PresenceSnapshot, ServiceError>,
    ) -> Task<Message> {
        match result {
            Ok(snapshot) => {
                self.surface.presence.apply(generation, snapshot);
            }
            Err(e) => {
                self.surface.presence.settle(generation);
                self.handle_service_error(&e);
            }
        }
        Task::none()
    }

    pub fn handle_history_loaded(
        &mut self,
        generation: u64,
        channel: ChannelId,
        result: Result<Vec<ChatMessage>, ServiceError>,
    ) -> Task<Message> {
        match result {
            Ok(messages) => {
                self.surface.apply_history(generation, &channel, messages);
            }
            Err(e) => {
                self.surface.history.settle(generation);
                self.handle_service_error(&e);
            }
        }
        Task::none()
    }

    pub fn handle_subscribe_result(
        &mut self,
        channels: Vec<ChannelId>,
        result: Result<(), ServiceError>,
    ) -> Task<Message> {
        match result {
            Ok(()) => {
                self.surface.mark_subscribed(channels);
                // Presence changes with our own subscription
                self.handle_refresh(Refresh::Presence)
            }
            Err(e) => {
                self.handle_service_error(&e);
                Task::none()
            }
        }
    }
}
