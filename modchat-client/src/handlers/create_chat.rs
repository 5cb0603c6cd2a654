//! Create chat dialog

use iced::Task;
use iced::widget::{Id, operation};
use modchat_common::{Channel, ClientHandle, ServiceError, UserId};

use crate::ModchatApp;
use crate::i18n::t_args;
use crate::types::{ChatPlan, CreateChatForm, InputId, Message, Refresh};

/// Create the channel, its roster and our membership, in that order
///
/// Stops at the first failure; earlier steps are not rolled back.
async fn create_chat(client: ClientHandle, plan: ChatPlan) -> Result<Channel, ServiceError> {
    let channel = client.set_channel_metadata(plan.channel).await?;
    client.set_channel_members(&channel.id, &plan.members).await?;
    client.set_memberships(&[channel.id.clone()]).await?;
    Ok(channel)
}

impl ModchatApp {
    /// "+" pressed in the channel panel
    pub fn handle_show_create_chat(&mut self) -> Task<Message> {
        self.create_chat = CreateChatForm::default();
        self.ui_state.show_create_dialog = true;
        operation::focus(Id::from(InputId::CreateChatSearch))
    }

    pub fn handle_close_create_chat(&mut self) -> Task<Message> {
        self.ui_state.show_create_dialog = false;
        self.create_chat = CreateChatForm::default();
        operation::focus(Id::from(InputId::ChatInput))
    }

    pub fn handle_create_chat_search_changed(&mut self, search: String) -> Task<Message> {
        self.create_chat.search = search;
        Task::none()
    }

    pub fn handle_create_chat_group_name_changed(&mut self, name: String) -> Task<Message> {
        self.create_chat.group_name = name;
        self.create_chat.error = None;
        Task::none()
    }

    pub fn handle_create_chat_user_toggled(&mut self, user: UserId, selected: bool) -> Task<Message> {
        self.create_chat.toggle(user, selected);
        Task::none()
    }

    /// Create pressed
    pub fn handle_create_chat_submit(&mut self) -> Task<Message> {
        if self.create_chat.is_submitting {
            return Task::none();
        }
        let Some(client) = self.session.client().cloned() else {
            return Task::none();
        };

        let users = self.surface.users.get().map(Vec::as_slice).unwrap_or_default();
        let plan = match self.create_chat.plan(self.surface.user_id(), users) {
            Ok(plan) => plan,
            Err(e) => {
                self.create_chat.error = Some(e.message());
                return Task::none();
            }
        };

        tracing::info!(
            channel = %plan.channel.id,
            members = plan.members.len(),
            "creating chat"
        );
        self.create_chat.error = None;
        self.create_chat.is_submitting = true;
        Task::perform(create_chat(client, plan), Message::CreateChatResult)
    }

    /// On success the dialog closes and the new channel is selected
    pub fn handle_create_chat_result(
        &mut self,
        result: Result<Channel, ServiceError>,
    ) -> Task<Message> {
        match result {
            Ok(channel) => {
                self.ui_state.show_create_dialog = false;
                self.create_chat = CreateChatForm::default();
                Task::batch([
                    self.handle_refresh(Refresh::Memberships),
                    self.handle_channel_selected(channel),
                    operation::focus(Id::from(InputId::ChatInput)),
                ])
            }
            Err(e) => {
                self.create_chat.is_submitting = false;
                self.create_chat.error = Some(t_args(
                    "create-chat-error-failed",
                    &[("error", &e.to_string())],
                ));
                self.handle_service_error(&e);
                Task::none()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modchat_common::local::Seed;
    use modchat_common::{ChannelId, LocalService, LocalServiceSettings, User};

    #[tokio::test]
    async fn test_unknown_member_stops_before_membership() {
        let service = LocalService::with_seed(LocalServiceSettings::default(), Seed::default());
        let client = service.handle(UserId::new("bob"));
        let plan = ChatPlan {
            channel: Channel::named(ChannelId::group("team"), "Team"),
            members: vec![UserId::new("nobody"), UserId::new("bob")],
        };

        assert!(create_chat(client.clone(), plan).await.is_err());
        assert!(client.fetch_memberships().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_direct_chat_joins_both_users() {
        let seed = Seed {
            users: vec![User::new("alice", "Alice"), User::new("bob", "Bob")],
            ..Default::default()
        };
        let service = LocalService::with_seed(LocalServiceSettings::default(), seed);
        let client = service.handle(UserId::new("bob"));
        let plan = ChatPlan {
            channel: Channel::named(
                ChannelId::direct(&UserId::new("bob"), &UserId::new("alice")),
                "Alice",
            ),
            members: vec![UserId::new("alice"), UserId::new("bob")],
        };

        let channel = create_chat(client.clone(), plan).await.unwrap();
        assert_eq!(channel.id.as_str(), "direct.bob@alice");

        let memberships = client.fetch_memberships().await.unwrap();
        assert!(memberships.iter().any(|m| m.id() == &channel.id));

        let roster = client.fetch_channel_members(&channel.id).await.unwrap();
        assert_eq!(roster.len(), 2);
    }
}
