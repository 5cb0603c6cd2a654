//! Message thread for the selected channel

use chrono::{DateTime, Local};
use iced::widget::text::{Rich, Span, Wrapping};
use iced::widget::{
    Column, Id, Space, button, column, container, rich_text, row, scrollable, span, text_input,
    tooltip,
};
use iced::{Center, Color, Element, Fill, Font, Theme};
use linkify::{LinkFinder, LinkKind};
use modchat_common::{ChannelId, ChatMessage};
use once_cell::sync::Lazy;

use super::layout::separator;
use crate::i18n::{t, t_args, t_count};
use crate::style::{
    CHAT_LINE_HEIGHT, CHAT_SPACING, EMPTY_VIEW_SIZE, ICON_BUTTON_PADDING, ICON_SIZE, INPUT_PADDING,
    SMALL_PADDING, SMALL_SPACING, TEXT_SIZE, TITLE_SIZE, TOOLTIP_BACKGROUND_PADDING, TOOLTIP_GAP,
    TOOLTIP_PADDING, TOOLTIP_TEXT_SIZE, chat, content_background_style, error_text_style,
    muted_text_style, shaped_text, tooltip_container_style, transparent_icon_button_style,
};
use crate::surface::ChatSurface;
use crate::types::{InputId, Message};

// ============================================================================
// Timestamp Settings
// ============================================================================

/// Settings for timestamp display in chat messages
#[derive(Debug, Clone, Copy)]
pub struct TimestampSettings {
    /// Whether to show timestamps at all
    pub show_timestamps: bool,
    /// Use 24-hour format (false = 12-hour with AM/PM)
    pub use_24_hour_time: bool,
    /// Show seconds in the timestamp
    pub show_seconds: bool,
}

impl TimestampSettings {
    /// Format a timestamp according to the current settings
    pub fn format(&self, timestamp: &DateTime<Local>) -> Option<String> {
        if !self.show_timestamps {
            return None;
        }

        let format = match (self.use_24_hour_time, self.show_seconds) {
            (true, true) => "%H:%M:%S",
            (true, false) => "%H:%M",
            (false, true) => "%I:%M:%S %p",
            (false, false) => "%I:%M %p",
        };

        Some(timestamp.format(format).to_string())
    }
}

// ============================================================================
// Link Detection
// ============================================================================

/// Global link finder configured for URL detection (including schemeless URLs)
static LINK_FINDER: Lazy<LinkFinder> = Lazy::new(|| {
    let mut finder = LinkFinder::new();
    finder.kinds(&[LinkKind::Url]);
    finder.url_must_have_scheme(false);
    finder
});

/// A segment of text that may or may not be a link
#[derive(Debug, PartialEq)]
enum TextSegment<'a> {
    Text(&'a str),
    Link(&'a str),
}

/// Split text into segments of plain text and URLs
fn split_into_segments(text: &str) -> Vec<TextSegment<'_>> {
    LINK_FINDER
        .spans(text)
        .map(|s| {
            if s.kind().is_some() {
                TextSegment::Link(s.as_str())
            } else {
                TextSegment::Text(s.as_str())
            }
        })
        .collect()
}

/// Build the URL to open when a link is clicked
///
/// If the URL doesn't have a scheme, prepend "https://"
fn make_openable_url(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}

// ============================================================================
// Message Rendering
// ============================================================================

/// Colors for one message line
struct MessageStyle {
    timestamp_color: Color,
    publisher_color: Color,
    content_color: Color,
    link_color: Color,
    font_size: f32,
}

/// Build a rich text line: optional timestamp, publisher name, content with links
fn render_message<'a>(
    time_str: Option<String>,
    publisher: &str,
    content: &str,
    style: &MessageStyle,
) -> Element<'a, Message> {
    let mut spans: Vec<Span<'a, String, Font>> = Vec::new();

    if let Some(ts) = time_str {
        spans.push(span(format!("[{}] ", ts)).color(style.timestamp_color));
    }

    spans.push(
        span(format!("{}: ", publisher))
            .color(style.publisher_color)
            .font(Font {
                weight: iced::font::Weight::Bold,
                ..Font::DEFAULT
            }),
    );

    for segment in split_into_segments(content) {
        match segment {
            TextSegment::Text(text) => {
                spans.push(span(text.to_string()).color(style.content_color));
            }
            TextSegment::Link(url) => {
                spans.push(
                    span(url.to_string())
                        .color(style.link_color)
                        .underline(true)
                        .link(make_openable_url(url)),
                );
            }
        }
    }

    let line: Rich<'a, String, Message> = rich_text(spans)
        .on_link_click(Message::OpenUrl)
        .size(style.font_size)
        .line_height(CHAT_LINE_HEIGHT)
        .wrapping(Wrapping::WordOrGlyph)
        .width(Fill);

    line.into()
}

/// History of the selected channel, oldest first
fn build_message_list<'a>(
    surface: &'a ChatSurface,
    theme: &Theme,
    font_size: f32,
    timestamp_settings: TimestampSettings,
) -> Element<'a, Message> {
    let messages: &[ChatMessage] = match surface.history.get() {
        Some(messages) => messages,
        None => {
            let placeholder = if surface.selected_id().is_some() {
                t("loading")
            } else {
                String::new()
            };
            return empty_thread(placeholder);
        }
    };

    if messages.is_empty() {
        return empty_thread(t("history-empty"));
    }

    let own_color = chat::own_publisher(theme);
    let other_color = chat::publisher(theme);

    let mut chat_column = Column::new().spacing(CHAT_SPACING).padding(SMALL_PADDING);
    for message in messages {
        let local: DateTime<Local> = message.sent_at.with_timezone(&Local);
        let style = MessageStyle {
            timestamp_color: chat::timestamp(theme),
            publisher_color: if &message.publisher == surface.user_id() {
                own_color
            } else {
                other_color
            },
            content_color: chat::text(theme),
            link_color: chat::link(theme),
            font_size,
        };
        chat_column = chat_column.push(render_message(
            timestamp_settings.format(&local),
            surface.publisher_name(&message.publisher),
            &message.text,
            &style,
        ));
    }

    scrollable(chat_column)
        .anchor_bottom()
        .width(Fill)
        .height(Fill)
        .into()
}

/// Centered placeholder filling the thread
fn empty_thread<'a>(placeholder: String) -> Element<'a, Message> {
    container(
        shaped_text(placeholder)
            .size(EMPTY_VIEW_SIZE)
            .style(muted_text_style),
    )
    .width(Fill)
    .height(Fill)
    .center(Fill)
    .into()
}

// ============================================================================
// Header
// ============================================================================

/// Channel name and member count
///
/// The member count toggles the member panel. While nothing is selected the
/// placeholder id is shown.
fn build_header<'a>(surface: &'a ChatSurface, show_channels: bool) -> Element<'a, Message> {
    let name = match surface.selection().channel() {
        Some(channel) => channel.display_name().to_string(),
        None => ChannelId::placeholder().to_string(),
    };

    let mut header = row![].spacing(SMALL_SPACING).align_y(Center);

    if !show_channels {
        header = header.push(
            tooltip(
                button(shaped_text("☰").size(ICON_SIZE))
                    .on_press(Message::ToggleChannels)
                    .padding(ICON_BUTTON_PADDING)
                    .style(transparent_icon_button_style),
                container(shaped_text(t("tooltip-show-channels")).size(TOOLTIP_TEXT_SIZE))
                    .padding(TOOLTIP_BACKGROUND_PADDING)
                    .style(tooltip_container_style),
                tooltip::Position::Bottom,
            )
            .gap(TOOLTIP_GAP)
            .padding(TOOLTIP_PADDING),
        );
    }

    let member_count = button(
        shaped_text(t_count("member-count", surface.total_members()))
            .size(TEXT_SIZE)
            .style(muted_text_style),
    )
    .on_press(Message::ToggleMembers)
    .padding(ICON_BUTTON_PADDING)
    .style(transparent_icon_button_style);

    header
        .push(shaped_text(name).size(TITLE_SIZE).width(Fill))
        .push(member_count)
        .padding(SMALL_PADDING)
        .into()
}

// ============================================================================
// Typing Indicator
// ============================================================================

/// Sentence naming the other users typing, or None
fn typing_sentence(names: &[String]) -> Option<String> {
    match names {
        [] => None,
        [name] => Some(t_args("typing-one", &[("name", name)])),
        _ => Some(t_args("typing-many", &[("names", &names.join(", "))])),
    }
}

/// Typing indicator line; keeps its height when nobody is typing
fn build_typing_indicator<'a>(surface: &ChatSurface, theme: &Theme) -> Element<'a, Message> {
    match typing_sentence(&surface.typing_names()) {
        Some(sentence) => shaped_text(sentence)
            .size(TOOLTIP_TEXT_SIZE)
            .color(chat::typing(theme))
            .into(),
        None => Space::new().height(TOOLTIP_TEXT_SIZE * CHAT_LINE_HEIGHT).into(),
    }
}

// ============================================================================
// Input Row
// ============================================================================

/// Build the message input row with text field and send button
fn build_input_row<'a>(
    message_input: &'a str,
    can_send: bool,
    font_size: f32,
) -> iced::widget::Row<'a, Message> {
    let text_field = text_input(&t("message-placeholder"), message_input)
        .on_input(Message::MessageInputChanged)
        .on_submit(Message::SendMessagePressed)
        .id(Id::from(InputId::ChatInput))
        .padding(INPUT_PADDING)
        .size(font_size)
        .width(Fill);

    let send_button = button(shaped_text(t("button-send")).size(font_size))
        .on_press_maybe(can_send.then_some(Message::SendMessagePressed))
        .padding(INPUT_PADDING);

    row![text_field, send_button]
        .spacing(SMALL_SPACING)
        .width(Fill)
}

// ============================================================================
// Chat View
// ============================================================================

/// Thread panel: header, history, typing indicator and input
pub fn chat_view<'a>(
    surface: &'a ChatSurface,
    message_input: &'a str,
    message_error: Option<&'a str>,
    show_channels: bool,
    theme: Theme,
    chat_font_size: u8,
    timestamp_settings: TimestampSettings,
) -> Element<'a, Message> {
    let font_size = chat_font_size as f32;
    let can_send = surface.selected_id().is_some() && !message_input.trim().is_empty();

    let mut input_area = column![
        build_typing_indicator(surface, &theme),
        build_input_row(message_input, can_send, font_size),
    ]
    .spacing(SMALL_SPACING);

    if let Some(error) = message_error {
        input_area = input_area.push(
            shaped_text(error)
                .size(TEXT_SIZE)
                .style(error_text_style),
        );
    }

    container(
        column![
            build_header(surface, show_channels),
            separator(),
            build_message_list(surface, &theme, font_size, timestamp_settings),
            input_area,
        ]
        .spacing(SMALL_SPACING)
        .padding(SMALL_PADDING),
    )
    .width(Fill)
    .height(Fill)
    .style(content_background_style)
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_timestamp_formats() {
        let time = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        let mut settings = TimestampSettings {
            show_timestamps: true,
            use_24_hour_time: true,
            show_seconds: false,
        };
        assert_eq!(settings.format(&time).as_deref(), Some("14:05"));

        settings.show_seconds = true;
        assert_eq!(settings.format(&time).as_deref(), Some("14:05:07"));

        settings.use_24_hour_time = false;
        assert_eq!(settings.format(&time).as_deref(), Some("02:05:07 PM"));

        settings.show_timestamps = false;
        assert_eq!(settings.format(&time), None);
    }

    #[test]
    fn test_links_are_split_out() {
        let segments = split_into_segments("see example.com/docs now");
        assert_eq!(
            segments,
            vec![
                TextSegment::Text("see "),
                TextSegment::Link("example.com/docs"),
                TextSegment::Text(" now"),
            ]
        );
        assert_eq!(
            make_openable_url("example.com/docs"),
            "https://example.com/docs"
        );
        assert_eq!(make_openable_url("http://a.b"), "http://a.b");
    }

    #[test]
    fn test_typing_sentence() {
        assert_eq!(typing_sentence(&[]), None);
        assert_eq!(
            typing_sentence(&["Alice".to_string()]).as_deref(),
            Some("Alice is typing...")
        );
        assert_eq!(
            typing_sentence(&["Alice".to_string(), "Carol".to_string()]).as_deref(),
            Some("Alice, Carol are typing...")
        );
    }
}
