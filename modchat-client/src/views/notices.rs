//! Full-window notices shown instead of the chat surface

use iced::widget::{Column, button, row};
use iced::{Center, Element, Fill};

use super::layout::scrollable_panel;
use crate::constants::{
    ACCESS_MANAGER_DOCS_URL, ENV_PUBLISH_KEY, ENV_SUBSCRIBE_KEY, KEYS_DASHBOARD_URL,
};
use crate::i18n::{t, t_args};
use crate::style::{
    BUTTON_PADDING, ELEMENT_SPACING, FORM_PADDING, NOTICE_MAX_WIDTH, TEXT_SIZE, TITLE_SIZE,
    error_text_style, muted_text_style, shaped_text, shaped_text_wrapped,
};
use crate::types::Message;

/// Title, paragraphs and one link button
fn notice<'a>(
    title: String,
    paragraphs: Vec<String>,
    link_label: String,
    link: &'static str,
) -> Element<'a, Message> {
    let mut form = Column::new()
        .spacing(ELEMENT_SPACING)
        .padding(FORM_PADDING)
        .max_width(NOTICE_MAX_WIDTH)
        .align_x(Center)
        .push(
            shaped_text_wrapped(title)
                .size(TITLE_SIZE)
                .width(Fill)
                .align_x(Center)
                .style(error_text_style),
        );

    for paragraph in paragraphs {
        form = form.push(
            shaped_text_wrapped(paragraph)
                .size(TEXT_SIZE)
                .width(Fill)
                .align_x(Center),
        );
    }

    form = form.push(row![
        button(shaped_text(link_label).size(TEXT_SIZE))
            .on_press(Message::OpenUrl(link.to_string()))
            .padding(BUTTON_PADDING)
    ]);

    form = form.push(
        shaped_text(link)
            .size(TEXT_SIZE)
            .style(muted_text_style),
    );

    scrollable_panel(form)
}

/// Messaging keys are missing
///
/// Names both places the keys can come from: the environment and the
/// config file.
pub fn keys_required_view<'a>(config_path: Option<String>) -> Element<'a, Message> {
    let mut paragraphs = vec![
        t("keys-required-body"),
        t_args(
            "keys-required-env",
            &[("publish", ENV_PUBLISH_KEY), ("subscribe", ENV_SUBSCRIBE_KEY)],
        ),
    ];
    if let Some(path) = config_path {
        paragraphs.push(t_args("keys-required-config", &[("path", &path)]));
    }

    notice(
        t("keys-required-title"),
        paragraphs,
        t("button-open-dashboard"),
        KEYS_DASHBOARD_URL,
    )
}

/// The keyset enforces access grants this client does not request
pub fn access_manager_view<'a>() -> Element<'a, Message> {
    notice(
        t("access-manager-title"),
        vec![t("access-manager-body"), t("access-manager-hint")],
        t("button-open-docs"),
        ACCESS_MANAGER_DOCS_URL,
    )
}
