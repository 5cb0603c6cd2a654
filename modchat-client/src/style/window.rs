//! Window constants for application dimensions

// ============================================================================
// Window Dimensions
// ============================================================================

/// Default window width
pub const WINDOW_WIDTH: f32 = 1200.0;

/// Default window height
pub const WINDOW_HEIGHT: f32 = 700.0;

/// Minimum window width
pub const WINDOW_WIDTH_MIN: f32 = 800.0;

/// Minimum window height
pub const WINDOW_HEIGHT_MIN: f32 = 500.0;

/// Window title (Iced requires &'static str or closure)
pub const WINDOW_TITLE: &str = "Modchat";
