//! Create chat form state

use modchat_common::validators::{self, GroupNameError};
use modchat_common::{Channel, ChannelId, User, UserId};
use uuid::Uuid;

use crate::i18n::t;

/// Reasons the form cannot be submitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateChatError {
    NoUsersSelected,
    GroupName(GroupNameError),
}

impl CreateChatError {
    /// Translated message for display in the dialog
    pub fn message(self) -> String {
        match self {
            CreateChatError::NoUsersSelected => t("create-chat-error-no-users"),
            CreateChatError::GroupName(GroupNameError::Empty) => {
                t("create-chat-error-group-name-empty")
            }
            CreateChatError::GroupName(GroupNameError::TooLong) => {
                t("create-chat-error-group-name-too-long")
            }
            CreateChatError::GroupName(GroupNameError::InvalidCharacters) => {
                t("create-chat-error-group-name-invalid")
            }
        }
    }
}

/// What to create: channel metadata and the full member list
#[derive(Debug, Clone, PartialEq)]
pub struct ChatPlan {
    pub channel: Channel,
    /// Selected users plus the acting user
    pub members: Vec<UserId>,
}

/// Create chat dialog state
#[derive(Debug, Clone, Default)]
pub struct CreateChatForm {
    /// User search text
    pub search: String,
    /// Selected users in selection order
    pub selected: Vec<UserId>,
    /// Group name (only used with two or more users)
    pub group_name: String,
    /// Error shown inside the dialog
    pub error: Option<String>,
    /// A create request is in flight
    pub is_submitting: bool,
}

impl CreateChatForm {
    pub fn is_selected(&self, user: &UserId) -> bool {
        self.selected.contains(user)
    }

    pub fn toggle(&mut self, user: UserId, selected: bool) {
        if selected {
            if !self.is_selected(&user) {
                self.selected.push(user);
            }
        } else {
            self.selected.retain(|id| id != &user);
        }
        self.error = None;
    }

    /// Two or more users make a group
    pub fn is_group(&self) -> bool {
        self.selected.len() > 1
    }

    /// Directory entries offered for selection: everyone but `current`,
    /// filtered by the search text
    pub fn candidates<'a>(&self, users: &'a [User], current: &UserId) -> Vec<&'a User> {
        let needle = self.search.trim().to_lowercase();
        users
            .iter()
            .filter(|user| &user.id != current)
            .filter(|user| {
                needle.is_empty() || user.display_name().to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Build the channel to create
    ///
    /// One selected user makes a direct conversation named after that user;
    /// two or more make a group with a fresh id and the entered name.
    pub fn plan(&self, current: &UserId, users: &[User]) -> Result<ChatPlan, CreateChatError> {
        let channel = match self.selected.as_slice() {
            [] => return Err(CreateChatError::NoUsersSelected),
            [other] => {
                let mut channel = Channel::bare(ChannelId::direct(current, other));
                if let Some(user) = users.iter().find(|user| &user.id == other) {
                    channel.name = user.name.clone();
                    channel.set_profile_url(user.profile_url.clone().unwrap_or_default());
                }
                channel
            }
            _ => {
                validators::validate_group_name(&self.group_name)
                    .map_err(CreateChatError::GroupName)?;
                Channel::named(
                    ChannelId::group(Uuid::new_v4()),
                    self.group_name.trim(),
                )
            }
        };

        let mut members = self.selected.clone();
        if !members.contains(current) {
            members.push(current.clone());
        }

        Ok(ChatPlan { channel, members })
    }
}
