//! Realtime service events
//!
//! Events never patch query results directly (except live messages and
//! typing); they request the refresh of whatever query they invalidate.

use iced::Task;
use modchat_common::{ServiceEvent, StatusCategory, StatusEvent};

use crate::ModchatApp;
use crate::types::{Message, Refresh};

impl ModchatApp {
    pub fn handle_service_event(&mut self, event: ServiceEvent) -> Task<Message> {
        match event {
            ServiceEvent::Status(status) => self.handle_status(status),
            ServiceEvent::Message(message) => {
                self.surface.append_message(message);
                Task::none()
            }
            ServiceEvent::MembershipChanged { user, channel } => {
                let mut tasks = Vec::new();
                if &user == self.surface.user_id() {
                    tasks.push(self.handle_refresh(Refresh::Memberships));
                }
                if self.surface.selected_id() == Some(&channel) {
                    tasks.push(self.handle_refresh(Refresh::ChannelMembers));
                }
                Task::batch(tasks)
            }
            ServiceEvent::ChannelMetadataChanged(channel) => {
                if self.surface.presence_channels().contains(&channel.id) {
                    self.handle_refresh(Refresh::Memberships)
                } else {
                    Task::none()
                }
            }
            ServiceEvent::UserMetadataChanged(user) => {
                let mut tasks = vec![self.handle_refresh(Refresh::Users)];
                if &user.id == self.surface.user_id() {
                    tasks.push(self.handle_refresh(Refresh::CurrentUser));
                }
                if self.surface.selected_id().is_some() {
                    tasks.push(self.handle_refresh(Refresh::ChannelMembers));
                }
                Task::batch(tasks)
            }
            ServiceEvent::PresenceChanged { channel, .. } => {
                if self.surface.presence_channels().contains(&channel) {
                    self.handle_refresh(Refresh::Presence)
                } else {
                    Task::none()
                }
            }
            ServiceEvent::TypingChanged {
                channel,
                user,
                typing,
            } => {
                self.surface.set_typing(channel, user, typing);
                Task::none()
            }
        }
    }

    /// Status observer
    ///
    /// An access-denied status switches to the access manager notice for the
    /// rest of the session. A reconnect re-runs every query.
    fn handle_status(&mut self, status: StatusEvent) -> Task<Message> {
        match status.category {
            StatusCategory::AccessDenied => {
                if self.session.restrict() {
                    tracing::warn!(
                        operation = ?status.operation,
                        "access denied, keyset has access manager enabled"
                    );
                }
                Task::none()
            }
            StatusCategory::Reconnected => {
                tracing::info!("reconnected, refreshing");
                self.handle_refresh(Refresh::All)
            }
            StatusCategory::NetworkIssues => {
                tracing::warn!("network issues reported by the service");
                Task::none()
            }
            category => {
                tracing::debug!(?category, "service status");
                Task::none()
            }
        }
    }
}
