//! Blocking alert dialog

use iced::widget::{Space, button, column, container, row};
use iced::{Element, Fill};

use crate::i18n::t;
use crate::style::{
    BUTTON_PADDING, ELEMENT_SPACING, FORM_MAX_WIDTH, FORM_PADDING, TEXT_SIZE, dialog_style,
    shaped_text, shaped_text_wrapped,
};
use crate::surface::Alert;
use crate::types::Message;

fn alert_text(alert: Alert) -> String {
    match alert {
        Alert::MessageBlocked => t("alert-message-blocked"),
    }
}

/// Alert box with a single OK button
pub fn alert_view<'a>(alert: Alert) -> Element<'a, Message> {
    let ok_button = button(shaped_text(t("button-ok")).size(TEXT_SIZE))
        .on_press(Message::DismissAlert)
        .padding(BUTTON_PADDING);

    container(
        column![
            shaped_text_wrapped(alert_text(alert))
                .size(TEXT_SIZE)
                .width(Fill),
            row![Space::new().width(Fill), ok_button],
        ]
        .spacing(ELEMENT_SPACING)
        .padding(FORM_PADDING),
    )
    .max_width(FORM_MAX_WIDTH)
    .style(dialog_style)
    .into()
}
