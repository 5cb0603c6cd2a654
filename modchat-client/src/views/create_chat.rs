//! Create chat dialog
//!
//! Pick one user for a direct conversation, or several plus a name for a
//! group.

use iced::widget::{
    Column, Id, Space, button, checkbox, container, row, scrollable, text, text_input,
};
use iced::{Center, Element, Fill};

use crate::i18n::{t, t_count};
use crate::style::{
    BUTTON_PADDING, CREATE_CHAT_LIST_HEIGHT, ELEMENT_SPACING, FORM_MAX_WIDTH, FORM_PADDING,
    INPUT_PADDING, LIST_ITEM_SPACING, ROW_PADDING, SMALL_TEXT_SIZE, TEXT_SIZE,
    alternating_row_style, dialog_style, error_text_style, muted_text_style, panel_title,
    shaped_text, shaped_text_wrapped,
};
use crate::surface::ChatSurface;
use crate::types::{CreateChatForm, InputId, Message};

/// Create chat dialog box
pub fn create_chat_dialog<'a>(
    form: &'a CreateChatForm,
    surface: &'a ChatSurface,
) -> Element<'a, Message> {
    let users = surface.users.get().map(Vec::as_slice).unwrap_or_default();

    let search = text_input(&t("create-chat-search-placeholder"), &form.search)
        .on_input(Message::CreateChatSearchChanged)
        .id(Id::from(InputId::CreateChatSearch))
        .padding(INPUT_PADDING)
        .size(TEXT_SIZE);

    let mut user_list = Column::new().spacing(LIST_ITEM_SPACING);
    for (index, user) in form.candidates(users, surface.user_id()).into_iter().enumerate() {
        let id = user.id.clone();
        let entry = checkbox(form.is_selected(&user.id))
            .label(user.display_name())
            .on_toggle(move |checked| Message::CreateChatUserToggled(id.clone(), checked))
            .size(TEXT_SIZE)
            .text_shaping(text::Shaping::Advanced);
        user_list = user_list.push(
            container(entry)
                .padding(ROW_PADDING)
                .width(Fill)
                .style(alternating_row_style(index % 2 == 0)),
        );
    }

    let mut items: Vec<Element<'a, Message>> = vec![
        panel_title(t("create-chat-title")).into(),
        search.into(),
        scrollable(user_list)
            .height(CREATE_CHAT_LIST_HEIGHT)
            .width(Fill)
            .into(),
        shaped_text(t_count("create-chat-selected", form.selected.len()))
            .size(SMALL_TEXT_SIZE)
            .style(muted_text_style)
            .into(),
    ];

    if form.is_group() {
        items.push(
            text_input(&t("create-chat-group-name-placeholder"), &form.group_name)
                .on_input(Message::CreateChatGroupNameChanged)
                .on_submit(Message::CreateChatSubmit)
                .padding(INPUT_PADDING)
                .size(TEXT_SIZE)
                .into(),
        );
    }

    if let Some(error) = &form.error {
        items.push(
            shaped_text_wrapped(error)
                .size(TEXT_SIZE)
                .width(Fill)
                .align_x(Center)
                .style(error_text_style)
                .into(),
        );
    }

    let cancel_button = button(shaped_text(t("button-cancel")).size(TEXT_SIZE))
        .on_press(Message::CloseCreateChat)
        .padding(BUTTON_PADDING)
        .style(button::secondary);

    let submit_label = if form.is_group() {
        t("button-create-group")
    } else {
        t("button-create-direct")
    };
    let can_submit = !form.is_submitting && !form.selected.is_empty();
    let submit_button = button(shaped_text(submit_label).size(TEXT_SIZE))
        .on_press_maybe(can_submit.then_some(Message::CreateChatSubmit))
        .padding(BUTTON_PADDING);

    items.push(
        row![Space::new().width(Fill), cancel_button, submit_button]
            .spacing(ELEMENT_SPACING)
            .into(),
    );

    container(
        Column::with_children(items)
            .spacing(ELEMENT_SPACING)
            .padding(FORM_PADDING),
    )
    .max_width(FORM_MAX_WIDTH)
    .style(dialog_style)
    .into()
}
