//! UI panel state

/// Panel visibility and filter inputs
#[derive(Debug, Clone)]
pub struct UiState {
    /// Channel list (left) visible
    pub show_channels: bool,
    /// Member list (right) visible
    pub show_members: bool,
    /// Create chat dialog open
    pub show_create_dialog: bool,
    /// Channel list search text
    pub channels_filter: String,
    /// Member list search text
    pub members_filter: String,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            show_channels: true,
            show_members: false,
            show_create_dialog: false,
            channels_filter: String::new(),
            members_filter: String::new(),
        }
    }
}

/// Text input identifiers for focus operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputId {
    ChatInput,
    CreateChatSearch,
}

impl From<InputId> for iced::widget::Id {
    fn from(id: InputId) -> Self {
        match id {
            InputId::ChatInput => iced::widget::Id::new("chat-input"),
            InputId::CreateChatSearch => iced::widget::Id::new("create-chat-search"),
        }
    }
}
