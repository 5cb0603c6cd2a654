//! Member list panel (right sidebar)
//!
//! Roster of the selected channel with a presence dot per member. Names
//! with a profile link open it in the browser.

use iced::widget::{Column, Space, button, column, container, row, scrollable, text_input, tooltip};
use iced::{Center, Element, Fill};

use crate::i18n::t;
use crate::style::{
    ICON_BUTTON_PADDING, ICON_SIZE, INPUT_PADDING, LIST_ITEM_SPACING, MEMBER_LIST_PANEL_WIDTH,
    PRESENCE_DOT_SIZE, ROW_PADDING, SCROLLBAR_PADDING, SMALL_PADDING, SMALL_SPACING,
    SMALL_TEXT_SIZE, TEXT_SIZE, TOOLTIP_BACKGROUND_PADDING, TOOLTIP_GAP, TOOLTIP_PADDING,
    TOOLTIP_TEXT_SIZE, alternating_row_style, list_item_button_style, muted_text_style,
    panel_title, presence_dot_style, shaped_text, sidebar_panel_style, tooltip_container_style,
    transparent_icon_button_style,
};
use crate::surface::{ChatSurface, MemberEntry};
use crate::types::Message;

/// Presence dot with an online/offline tooltip
fn presence_dot<'a>(present: bool) -> Element<'a, Message> {
    let label = if present {
        t("tooltip-member-present")
    } else {
        t("tooltip-member-away")
    };

    tooltip(
        container(Space::new())
            .width(PRESENCE_DOT_SIZE)
            .height(PRESENCE_DOT_SIZE)
            .style(presence_dot_style(present)),
        container(shaped_text(label).size(TOOLTIP_TEXT_SIZE))
            .padding(TOOLTIP_BACKGROUND_PADDING)
            .style(tooltip_container_style),
        tooltip::Position::Left,
    )
    .gap(TOOLTIP_GAP)
    .padding(TOOLTIP_PADDING)
    .into()
}

/// One roster row
fn member_row<'a>(entry: MemberEntry) -> Element<'a, Message> {
    let mut name_row = row![shaped_text(entry.user.display_name().to_string()).size(TEXT_SIZE)]
        .spacing(SMALL_SPACING)
        .align_y(Center);
    if entry.is_self {
        name_row = name_row.push(
            shaped_text(t("member-you"))
                .size(SMALL_TEXT_SIZE)
                .style(muted_text_style),
        );
    }

    let name = button(name_row)
        .on_press_maybe(entry.user.profile_url.map(Message::OpenUrl))
        .padding(0)
        .width(Fill)
        .style(list_item_button_style(false));

    row![presence_dot(entry.present), name]
        .spacing(SMALL_SPACING)
        .align_y(Center)
        .padding(ROW_PADDING)
        .into()
}

/// Member list panel
pub fn member_list_panel<'a>(surface: &'a ChatSurface, filter: &'a str) -> Element<'a, Message> {
    let close = tooltip(
        button(shaped_text("×").size(ICON_SIZE))
            .on_press(Message::ToggleMembers)
            .padding(ICON_BUTTON_PADDING)
            .style(transparent_icon_button_style),
        container(shaped_text(t("tooltip-close-members")).size(TOOLTIP_TEXT_SIZE))
            .padding(TOOLTIP_BACKGROUND_PADDING)
            .style(tooltip_container_style),
        tooltip::Position::Bottom,
    )
    .gap(TOOLTIP_GAP)
    .padding(TOOLTIP_PADDING);

    let title = row![panel_title(t("members-title")), close].align_y(Center);

    let search = text_input(&t("members-filter-placeholder"), filter)
        .on_input(Message::MembersFilterChanged)
        .padding(INPUT_PADDING)
        .size(TEXT_SIZE);

    let mut list = Column::new().spacing(LIST_ITEM_SPACING);
    if surface.channel_members.is_loading() {
        list = list.push(
            container(shaped_text(t("loading")).size(TEXT_SIZE).style(muted_text_style))
                .padding(ROW_PADDING),
        );
    }
    for (index, entry) in surface.member_entries(filter).into_iter().enumerate() {
        list = list.push(
            container(member_row(entry))
                .width(Fill)
                .style(alternating_row_style(index % 2 == 0)),
        );
    }

    let panel = column![
        title,
        container(search).padding([0.0, SMALL_PADDING]),
        scrollable(container(list).padding(iced::Padding {
            right: SCROLLBAR_PADDING,
            ..iced::Padding::ZERO
        }))
        .height(Fill),
    ]
    .spacing(SMALL_SPACING)
    .padding(SMALL_PADDING);

    container(panel)
        .height(Fill)
        .width(MEMBER_LIST_PANEL_WIDTH)
        .style(sidebar_panel_style)
        .into()
}
