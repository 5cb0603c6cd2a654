//! Main application layout

use iced::widget::{Column, Space, container, opaque, row, scrollable, stack};
use iced::{Center, Element, Fill};

use super::alert::alert_view;
use super::channel_list::channel_list_panel;
use super::chat::{TimestampSettings, chat_view};
use super::create_chat::create_chat_dialog;
use super::member_list::member_list_panel;
use super::notices::{access_manager_view, keys_required_view};
use crate::bootstrap::Screen;
use crate::style::{
    AVATAR_SIZE, BORDER_WIDTH, SMALL_TEXT_SIZE, avatar_style, content_background_style,
    modal_overlay_style, separator_style, shaped_text,
};
use crate::types::{Message, ViewConfig};

// ============================================================================
// Helper Functions
// ============================================================================

/// Create a horizontal separator line
pub(super) fn separator<'a>() -> Element<'a, Message> {
    container(Space::new().width(Fill).height(BORDER_WIDTH))
        .width(Fill)
        .height(BORDER_WIDTH)
        .style(separator_style)
        .into()
}

/// Wrap a form column in a scrollable, centered container with background styling.
///
/// Used by the notices. Scrolls vertically when the content exceeds the
/// window height and centers the form when it fits.
pub(super) fn scrollable_panel(form: Column<'_, Message>) -> Element<'_, Message> {
    let scrollable_form = scrollable(container(form).width(Fill).center_x(Fill))
        .width(Fill)
        .height(iced::Length::Shrink);

    container(scrollable_form)
        .width(Fill)
        .height(Fill)
        .center(Fill)
        .style(content_background_style)
        .into()
}

/// Center a dialog over a semi-transparent overlay that swallows input
pub(super) fn modal<'a>(dialog: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    opaque(
        container(dialog)
            .width(Fill)
            .height(Fill)
            .center(Fill)
            .style(modal_overlay_style),
    )
}

/// Round placeholder avatar showing the first letter of a name
pub(super) fn avatar<'a>(name: &str) -> Element<'a, Message> {
    let initial: String = name
        .chars()
        .find(|c| c.is_alphanumeric())
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default();

    container(shaped_text(initial).size(SMALL_TEXT_SIZE))
        .width(AVATAR_SIZE)
        .height(AVATAR_SIZE)
        .align_x(Center)
        .align_y(Center)
        .style(avatar_style)
        .into()
}

/// Helper function to create an invisible/hidden panel
fn hidden_panel<'a>() -> Element<'a, Message> {
    container(shaped_text("")).width(0).into()
}

// ============================================================================
// Main Layout
// ============================================================================

/// Main application layout
///
/// Missing keys and an access-managed keyset each replace the whole window
/// with a notice. Otherwise the chat surface renders as three panels: the
/// channel list (left), the thread (center) and the member list (right).
/// The side panels are toggled from the thread header. The create chat
/// dialog and the moderation alert render on top.
pub fn main_layout<'a>(config: ViewConfig<'a>) -> Element<'a, Message> {
    match config.screen {
        Screen::KeysRequired => return keys_required_view(config.config_path),
        Screen::AccessManagerEnabled => return access_manager_view(),
        Screen::Chat => {}
    }

    let surface = config.surface;
    let ui_state = config.ui_state;

    // Use hidden_panel when not visible to preserve layout stability
    let channel_list = if ui_state.show_channels {
        channel_list_panel(surface, &ui_state.channels_filter)
    } else {
        hidden_panel()
    };

    let member_list = if ui_state.show_members {
        member_list_panel(surface, &ui_state.members_filter)
    } else {
        hidden_panel()
    };

    let thread = chat_view(
        surface,
        config.message_input,
        config.message_error,
        ui_state.show_channels,
        config.theme.clone(),
        config.chat_font_size,
        TimestampSettings {
            show_timestamps: config.show_timestamps,
            use_24_hour_time: config.use_24_hour_time,
            show_seconds: config.show_seconds,
        },
    );

    let mut content: Element<'a, Message> = row![channel_list, thread, member_list]
        .width(Fill)
        .height(Fill)
        .into();

    if ui_state.show_create_dialog {
        content = stack![content, modal(create_chat_dialog(config.create_chat, surface))]
            .width(Fill)
            .height(Fill)
            .into();
    }

    if let Some(alert) = config.alert {
        content = stack![content, modal(alert_view(alert))]
            .width(Fill)
            .height(Fill)
            .into();
    }

    content
}
