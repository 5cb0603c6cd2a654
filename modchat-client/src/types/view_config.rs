//! View configuration struct for passing state to view rendering

use iced::Theme;

use crate::bootstrap::Screen;
use crate::surface::{Alert, ChatSurface};
use crate::types::{CreateChatForm, UiState};

/// Configuration struct for view rendering
///
/// Holds everything the layout needs, borrowed from the application state.
pub struct ViewConfig<'a> {
    /// Current theme for styling
    pub theme: Theme,

    /// Top-level screen to render
    pub screen: Screen,

    /// Query results and selection behind the chat panels
    pub surface: &'a ChatSurface,

    /// Panel visibility and filters
    pub ui_state: &'a UiState,

    /// Current message input text
    pub message_input: &'a str,

    /// Validation error for the message input, if any
    pub message_error: Option<&'a str>,

    /// Create chat dialog state
    pub create_chat: &'a CreateChatForm,

    /// Alert shown over everything, if any
    pub alert: Option<Alert>,

    /// Font size for chat messages
    pub chat_font_size: u8,

    /// Show timestamps in chat messages
    pub show_timestamps: bool,

    /// Use 24-hour time format (false = 12-hour with AM/PM)
    pub use_24_hour_time: bool,

    /// Show seconds in timestamps
    pub show_seconds: bool,

    /// Where the config file lives, for the keys notice
    pub config_path: Option<String>,
}
