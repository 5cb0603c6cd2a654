//! Layout constants for consistent UI appearance
//!
//! All numeric constants for dimensions, sizes, spacing, and padding are defined here.
//! Window constants are in the `window` module. Color functions are in the `ui`
//! and `chat` modules. Widget styles are in the `widgets` module.

// ============================================================================
// Padding
// ============================================================================

/// Text input field padding
pub const INPUT_PADDING: f32 = 8.0;

/// Button padding
pub const BUTTON_PADDING: f32 = 10.0;

/// Form container padding
pub const FORM_PADDING: f32 = 20.0;

/// Small padding for compact elements
pub const SMALL_PADDING: f32 = 5.0;

/// Icon button padding (vertical)
pub const ICON_BUTTON_PADDING_VERTICAL: f32 = 8.0;

/// Icon button padding (horizontal)
pub const ICON_BUTTON_PADDING_HORIZONTAL: f32 = 4.0;

/// Icon button padding (combined for symmetric buttons)
pub const ICON_BUTTON_PADDING: iced::Padding = iced::Padding {
    top: ICON_BUTTON_PADDING_VERTICAL,
    right: ICON_BUTTON_PADDING_HORIZONTAL,
    bottom: ICON_BUTTON_PADDING_VERTICAL,
    left: ICON_BUTTON_PADDING_HORIZONTAL,
};

/// Panel row padding (list entries in the side panels)
pub const ROW_PADDING: [f32; 2] = [4.0, 8.0];

/// Tooltip gap (distance between element and tooltip)
pub const TOOLTIP_GAP: f32 = 5.0;

/// Tooltip padding (internal padding)
pub const TOOLTIP_PADDING: f32 = 4.0;

/// Tooltip background padding (inside the tooltip box)
pub const TOOLTIP_BACKGROUND_PADDING: f32 = 6.0;

/// Right padding for scrollable content so rows clear the scrollbar
pub const SCROLLBAR_PADDING: f32 = 12.0;

// ============================================================================
// Spacing
// ============================================================================

/// Standard spacing between form elements
pub const ELEMENT_SPACING: f32 = 10.0;

/// Spacing between chat messages
pub const CHAT_SPACING: f32 = 3.0;

/// Small spacing
pub const SMALL_SPACING: f32 = 5.0;

/// Spacing between rows in the side panels
pub const LIST_ITEM_SPACING: f32 = 3.0;

/// No spacing
pub const NO_SPACING: f32 = 0.0;

// ============================================================================
// Text Sizes
// ============================================================================

/// Standard text size for forms and panels
pub const TEXT_SIZE: f32 = 14.0;

/// Panel and dialog titles
pub const TITLE_SIZE: f32 = 16.0;

/// Tooltip text
pub const TOOLTIP_TEXT_SIZE: f32 = 12.0;

/// Secondary text under names (presence, "you")
pub const SMALL_TEXT_SIZE: f32 = 11.0;

/// Placeholder text for empty views
pub const EMPTY_VIEW_SIZE: f32 = 16.0;

/// Icon glyphs in panel headers
pub const ICON_SIZE: f32 = 16.0;

/// Line height multiplier for chat messages
pub const CHAT_LINE_HEIGHT: f32 = 1.3;

// ============================================================================
// Dimensions
// ============================================================================

/// Maximum width for forms, notices and dialogs
pub const FORM_MAX_WIDTH: f32 = 400.0;

/// Maximum width for the keys and access manager notices
pub const NOTICE_MAX_WIDTH: f32 = FORM_MAX_WIDTH * 1.5;

/// Channel list panel width (left)
pub const CHANNEL_LIST_PANEL_WIDTH: f32 = 220.0;

/// Member list panel width (right)
pub const MEMBER_LIST_PANEL_WIDTH: f32 = 180.0;

/// Height of the user checklist inside the create chat dialog
pub const CREATE_CHAT_LIST_HEIGHT: f32 = 240.0;

/// Avatar circle in the channel list and user card
pub const AVATAR_SIZE: f32 = 28.0;

/// Presence dot next to member names
pub const PRESENCE_DOT_SIZE: f32 = 8.0;

/// Border width
pub const BORDER_WIDTH: f32 = 1.0;

/// Standard corner radius
pub const STANDARD_BORDER_RADIUS: f32 = 4.0;

/// Title row height (fits an icon button)
pub const TITLE_ROW_HEIGHT_WITH_ACTION: f32 = 18.0 + ICON_BUTTON_PADDING_VERTICAL * 2.0;
