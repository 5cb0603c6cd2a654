//! Chat message colors
//!
//! Custom color palette for the message thread. Uses `is_dark` from the
//! extended palette to select the light or dark variant.

use iced::{Color, Theme};

// ============================================================================
// Color Constants
// ============================================================================

// Timestamps - subtle gray, de-emphasized
const TIMESTAMP_LIGHT: Color = Color::from_rgb(0.5, 0.5, 0.5);
const TIMESTAMP_DARK: Color = Color::from_rgb(0.6, 0.6, 0.6);

// Own messages - the acting user's name
const OWN_NAME_LIGHT: Color = Color::from_rgb(0.0, 0.4, 0.7);
const OWN_NAME_DARK: Color = Color::from_rgb(0.4, 0.7, 1.0);

// Typing indicator - de-emphasized gray
const TYPING_LIGHT: Color = Color::from_rgb(0.35, 0.35, 0.35);
const TYPING_DARK: Color = Color::from_rgb(0.7, 0.7, 0.7);

// ============================================================================
// Helper
// ============================================================================

/// Select color based on theme darkness
#[inline]
fn for_theme(theme: &Theme, light: Color, dark: Color) -> Color {
    if theme.extended_palette().is_dark {
        dark
    } else {
        light
    }
}

// ============================================================================
// Chat Color Functions
// ============================================================================

/// Regular chat message text color
pub fn text(theme: &Theme) -> Color {
    theme.palette().text
}

/// Chat timestamp color
pub fn timestamp(theme: &Theme) -> Color {
    for_theme(theme, TIMESTAMP_LIGHT, TIMESTAMP_DARK)
}

/// Publisher name color for other users
pub fn publisher(theme: &Theme) -> Color {
    theme.palette().primary
}

/// Publisher name color for the acting user
pub fn own_publisher(theme: &Theme) -> Color {
    for_theme(theme, OWN_NAME_LIGHT, OWN_NAME_DARK)
}

/// Link color
pub fn link(theme: &Theme) -> Color {
    theme.palette().primary
}

/// Typing indicator color
pub fn typing(theme: &Theme) -> Color {
    for_theme(theme, TYPING_LIGHT, TYPING_DARK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variants_follow_theme_darkness() {
        assert_eq!(timestamp(&Theme::Light), TIMESTAMP_LIGHT);
        assert_eq!(timestamp(&Theme::Dark), TIMESTAMP_DARK);
        assert_eq!(own_publisher(&Theme::Dark), OWN_NAME_DARK);
    }
}
