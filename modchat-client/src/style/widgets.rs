//! Widget style functions
//!
//! Provides consistent styling for Iced widgets across the application.
//! All styles derive from the theme palette, so light and dark both work.

use iced::widget::{Container, button, container, text};
use iced::{Background, Border, Center, Color, Fill, Theme};

use super::shaping::shaped_text;
use super::ui;
use super::{STANDARD_BORDER_RADIUS, TITLE_ROW_HEIGHT_WITH_ACTION, TITLE_SIZE};
use crate::types::Message;

// ============================================================================
// Button Styles
// ============================================================================

/// Danger icon button style - transparent with danger color on hover
pub fn danger_icon_button_style(theme: &Theme, status: button::Status) -> button::Style {
    let base = transparent_icon_button_style(theme, status);
    button::Style {
        text_color: match status {
            button::Status::Hovered => theme.palette().danger,
            _ => base.text_color,
        },
        ..base
    }
}

/// List item button style - transparent with highlight for the selected entry
pub fn list_item_button_style(is_selected: bool) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |theme, status| {
        let ext = theme.extended_palette();
        button::Style {
            background: is_selected.then_some(Background::Color(ext.primary.weak.color)),
            text_color: match status {
                _ if is_selected => ext.primary.weak.text,
                button::Status::Hovered => ext.primary.base.color,
                _ => ui::text_color(theme),
            },
            border: Border {
                radius: STANDARD_BORDER_RADIUS.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

/// Transparent icon button style - no background, icon color with hover
pub fn transparent_icon_button_style(theme: &Theme, status: button::Status) -> button::Style {
    button::Style {
        background: None,
        text_color: match status {
            button::Status::Hovered => theme.palette().primary,
            _ => ui::icon_color(theme),
        },
        ..Default::default()
    }
}

// ============================================================================
// Container Styles
// ============================================================================

/// Alternating row background style (for even rows in lists)
fn alt_row_style(theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(ui::alt_row_color(theme))),
        ..Default::default()
    }
}

/// Alternating row style - returns alt_row_style for even rows, default for odd
pub fn alternating_row_style(is_even: bool) -> impl Fn(&Theme) -> container::Style {
    move |theme| {
        if is_even {
            alt_row_style(theme)
        } else {
            container::Style::default()
        }
    }
}

/// Content area background style (for the thread and notices)
pub fn content_background_style(theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(theme.palette().background)),
        ..Default::default()
    }
}

/// Dialog box style - opaque background with border
pub fn dialog_style(theme: &Theme) -> container::Style {
    let ext = theme.extended_palette();
    container::Style {
        background: Some(Background::Color(ext.background.base.color)),
        border: Border {
            color: ext.background.strong.color,
            width: 1.0,
            radius: STANDARD_BORDER_RADIUS.into(),
        },
        ..Default::default()
    }
}

/// Modal overlay style (semi-transparent, theme-aware background)
pub fn modal_overlay_style(theme: &Theme) -> container::Style {
    let bg = theme.palette().background;
    container::Style {
        background: Some(Background::Color(Color::from_rgba(bg.r, bg.g, bg.b, 0.9))),
        ..Default::default()
    }
}

/// Separator line style
pub fn separator_style(theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(ui::sidebar_border(theme))),
        ..Default::default()
    }
}

/// Sidebar panel background style with border
pub fn sidebar_panel_style(theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(ui::sidebar_background(theme))),
        border: Border {
            color: ui::sidebar_border(theme),
            width: 1.0,
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Round avatar placeholder holding an initial
pub fn avatar_style(theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(ui::avatar_background(theme))),
        text_color: Some(ui::avatar_text(theme)),
        border: Border {
            radius: f32::MAX.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Presence dot, filled when the user is present
pub fn presence_dot_style(present: bool) -> impl Fn(&Theme) -> container::Style {
    move |theme| {
        let color = if present {
            ui::presence_online_color(theme)
        } else {
            ui::presence_offline_color(theme)
        };
        container::Style {
            background: Some(Background::Color(color)),
            border: Border {
                radius: f32::MAX.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

/// Tooltip container style - uses Iced's built-in bordered box style
pub fn tooltip_container_style(theme: &Theme) -> container::Style {
    container::bordered_box(theme)
}

// ============================================================================
// Text Styles
// ============================================================================

/// Error text style - uses danger color
pub fn error_text_style(theme: &Theme) -> text::Style {
    text::Style {
        color: Some(ui::danger_color(theme)),
    }
}

/// Muted text style - for section titles and secondary info
pub fn muted_text_style(theme: &Theme) -> text::Style {
    text::Style {
        color: Some(ui::muted_text_color(theme)),
    }
}

// ============================================================================
// Panel Helpers
// ============================================================================

/// Build a centered panel title row
pub fn panel_title(title: impl Into<String>) -> Container<'static, Message> {
    container(
        shaped_text(title.into())
            .size(TITLE_SIZE)
            .width(Fill)
            .align_x(Center),
    )
    .height(TITLE_ROW_HEIGHT_WITH_ACTION)
    .align_y(Center)
}
