//! Channel list panel (left sidebar)
//!
//! Shows the acting user's card, a search box and the direct and group
//! conversations the user has joined. Default channels are not listed.

use iced::widget::{Column, Space, button, column, container, row, scrollable, text_input, tooltip};
use iced::{Center, Element, Fill};

use super::layout::{avatar, separator};
use crate::i18n::t;
use crate::style::{
    CHANNEL_LIST_PANEL_WIDTH, ICON_BUTTON_PADDING, ICON_SIZE, INPUT_PADDING, LIST_ITEM_SPACING,
    NO_SPACING, ROW_PADDING, SCROLLBAR_PADDING, SMALL_PADDING, SMALL_SPACING, TEXT_SIZE,
    TITLE_SIZE, TOOLTIP_BACKGROUND_PADDING, TOOLTIP_GAP, TOOLTIP_PADDING, TOOLTIP_TEXT_SIZE,
    alternating_row_style, danger_icon_button_style, list_item_button_style, muted_text_style,
    shaped_text, sidebar_panel_style, tooltip_container_style, transparent_icon_button_style,
};
use crate::surface::ChatSurface;
use crate::types::Message;

// ============================================================================
// Helper Functions
// ============================================================================

/// Icon button with a tooltip below it
fn icon_button<'a>(
    glyph: &'static str,
    tooltip_text: String,
    message: Message,
    danger: bool,
) -> Element<'a, Message> {
    let style = if danger {
        danger_icon_button_style
    } else {
        transparent_icon_button_style
    };

    tooltip(
        button(shaped_text(glyph).size(ICON_SIZE))
            .on_press(message)
            .padding(ICON_BUTTON_PADDING)
            .style(style),
        container(shaped_text(tooltip_text).size(TOOLTIP_TEXT_SIZE))
            .padding(TOOLTIP_BACKGROUND_PADDING)
            .style(tooltip_container_style),
        tooltip::Position::Bottom,
    )
    .gap(TOOLTIP_GAP)
    .padding(TOOLTIP_PADDING)
    .into()
}

/// Card with the acting user's avatar and name
fn user_card<'a>(surface: &'a ChatSurface) -> Element<'a, Message> {
    let name = surface
        .current_user()
        .map(|user| user.display_name())
        .unwrap_or(surface.user_id().as_str());

    row![
        avatar(name),
        shaped_text(name).size(TITLE_SIZE).width(Fill),
        icon_button("«", t("tooltip-hide-channels"), Message::ToggleChannels, false),
    ]
    .spacing(SMALL_SPACING)
    .align_y(Center)
    .padding(SMALL_PADDING)
    .into()
}

// ============================================================================
// Channel List Panel
// ============================================================================

/// Channel list panel
pub fn channel_list_panel<'a>(surface: &'a ChatSurface, filter: &'a str) -> Element<'a, Message> {
    let header = row![
        shaped_text(t("conversations-title"))
            .size(TEXT_SIZE)
            .style(muted_text_style)
            .width(Fill),
        icon_button("+", t("tooltip-new-chat"), Message::ShowCreateChat, false),
    ]
    .align_y(Center)
    .padding([0.0, SMALL_PADDING]);

    let search = text_input(&t("channels-filter-placeholder"), filter)
        .on_input(Message::ChannelsFilterChanged)
        .padding(INPUT_PADDING)
        .size(TEXT_SIZE);

    let selected = surface.selected_id();
    let conversations = surface.conversations(filter);

    let mut list = Column::new().spacing(LIST_ITEM_SPACING);

    if conversations.is_empty() {
        let placeholder = if surface.memberships.is_loading() {
            t("loading")
        } else {
            t("no-conversations")
        };
        list = list.push(
            container(
                shaped_text(placeholder)
                    .size(TEXT_SIZE)
                    .style(muted_text_style),
            )
            .padding(ROW_PADDING),
        );
    }

    for (index, channel) in conversations.into_iter().enumerate() {
        let is_selected = selected == Some(&channel.id);
        let name = channel.display_name().to_string();
        let leave = icon_button(
            "×",
            t("tooltip-leave-channel"),
            Message::LeaveChannel(channel.id.clone()),
            true,
        );

        let entry = button(
            row![avatar(&name), shaped_text(name).size(TEXT_SIZE)]
                .spacing(SMALL_SPACING)
                .align_y(Center),
        )
        .on_press(Message::ChannelSelected(channel))
        .padding(ROW_PADDING)
        .width(Fill)
        .style(list_item_button_style(is_selected));

        list = list.push(
            container(row![entry, leave].align_y(Center).spacing(NO_SPACING))
                .width(Fill)
                .style(alternating_row_style(index % 2 == 0)),
        );
    }

    let panel = column![
        user_card(surface),
        separator(),
        Space::new().height(SMALL_SPACING),
        header,
        container(search).padding([0.0, SMALL_PADDING]),
        scrollable(container(list).padding(iced::Padding {
            right: SCROLLBAR_PADDING,
            ..iced::Padding::ZERO
        }))
        .height(Fill),
    ]
    .spacing(SMALL_SPACING);

    container(panel)
        .height(Fill)
        .width(CHANNEL_LIST_PANEL_WIDTH)
        .style(sidebar_panel_style)
        .into()
}
