//! UI colors derived from the theme palette

use iced::{Color, Theme};

/// Regular text color
pub fn text_color(theme: &Theme) -> Color {
    theme.palette().text
}

/// Icon color (slightly muted text)
pub fn icon_color(theme: &Theme) -> Color {
    theme.extended_palette().background.base.text
}

/// Muted color for secondary text
pub fn muted_text_color(theme: &Theme) -> Color {
    let text = theme.palette().text;
    Color { a: 0.6, ..text }
}

/// Danger color for errors
pub fn danger_color(theme: &Theme) -> Color {
    theme.palette().danger
}

/// Present users
pub fn presence_online_color(theme: &Theme) -> Color {
    theme.palette().success
}

/// Absent users
pub fn presence_offline_color(theme: &Theme) -> Color {
    theme.extended_palette().background.strong.color
}

/// Side panel background
pub fn sidebar_background(theme: &Theme) -> Color {
    theme.extended_palette().background.weak.color
}

/// Side panel border and separators
pub fn sidebar_border(theme: &Theme) -> Color {
    theme.extended_palette().background.strong.color
}

/// Even row background in lists
pub fn alt_row_color(theme: &Theme) -> Color {
    let ext = theme.extended_palette();
    let base = ext.background.base.color;
    if ext.is_dark {
        Color::from_rgb(
            (base.r + 0.04).min(1.0),
            (base.g + 0.04).min(1.0),
            (base.b + 0.04).min(1.0),
        )
    } else {
        Color::from_rgb(base.r - 0.03, base.g - 0.03, base.b - 0.03)
    }
}

/// Avatar circle background
pub fn avatar_background(theme: &Theme) -> Color {
    theme.extended_palette().primary.weak.color
}

/// Avatar initial color
pub fn avatar_text(theme: &Theme) -> Color {
    theme.extended_palette().primary.weak.text
}
