//! User preference settings

use modchat_common::LocalServiceSettings;

use super::theme::ThemePreference;
use crate::style::{WINDOW_HEIGHT, WINDOW_WIDTH};

// =============================================================================
// Keyset
// =============================================================================

/// Messaging service keys
///
/// Environment variables take precedence over these values at startup.
#[derive(Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct KeysetSettings {
    #[serde(default)]
    pub publish_key: String,

    #[serde(default)]
    pub subscribe_key: String,
}

impl std::fmt::Debug for KeysetSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |key: &String| if key.is_empty() { "" } else { "[REDACTED]" };
        f.debug_struct("KeysetSettings")
            .field("publish_key", &redact(&self.publish_key))
            .field("subscribe_key", &redact(&self.subscribe_key))
            .finish()
    }
}

// =============================================================================
// Service
// =============================================================================

/// Words rejected by the moderation filter when none are configured
const DEFAULT_BLOCKED_WORDS: &[&str] = &["darn", "heck", "dang"];

/// Switches for the in-process messaging service
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ServiceSettings {
    /// Behave as a keyset with access management enabled
    #[serde(default)]
    pub access_manager: bool,

    /// Words that get a published message rejected
    #[serde(default = "default_blocked_words")]
    pub blocked_words: Vec<String>,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            access_manager: false,
            blocked_words: default_blocked_words(),
        }
    }
}

impl From<&ServiceSettings> for LocalServiceSettings {
    fn from(settings: &ServiceSettings) -> Self {
        LocalServiceSettings {
            access_manager: settings.access_manager,
            blocked_words: settings.blocked_words.clone(),
        }
    }
}

// =============================================================================
// Constants
// =============================================================================

/// Minimum allowed chat font size
pub const CHAT_FONT_SIZE_MIN: u8 = 9;

/// Maximum allowed chat font size
pub const CHAT_FONT_SIZE_MAX: u8 = 16;

/// Default chat font size
pub const CHAT_FONT_SIZE_DEFAULT: u8 = 13;

// =============================================================================
// Settings
// =============================================================================

/// User preferences for the application
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Settings {
    /// UI theme preference
    #[serde(default)]
    pub theme: ThemePreference,

    /// Font size for chat messages (9-16)
    #[serde(default = "default_chat_font_size")]
    pub chat_font_size: u8,

    /// Show timestamps in chat messages
    #[serde(default = "default_true")]
    pub show_timestamps: bool,

    /// Use 24-hour time format (false = 12-hour with AM/PM)
    #[serde(default)]
    pub use_24_hour_time: bool,

    /// Show seconds in timestamps
    #[serde(default)]
    pub show_seconds: bool,

    /// Window width in pixels
    #[serde(default = "default_window_width")]
    pub window_width: f32,

    /// Window height in pixels
    #[serde(default = "default_window_height")]
    pub window_height: f32,

    /// Identity used when the launch URL names none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_user_id: Option<String>,

    /// Messaging service keys
    #[serde(default)]
    pub keyset: KeysetSettings,

    /// In-process service switches
    #[serde(default)]
    pub service: ServiceSettings,
}

impl Settings {
    /// Chat font size clamped to the supported range
    pub fn chat_font_size(&self) -> u8 {
        self.chat_font_size
            .clamp(CHAT_FONT_SIZE_MIN, CHAT_FONT_SIZE_MAX)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: ThemePreference::default(),
            chat_font_size: default_chat_font_size(),
            show_timestamps: default_true(),
            use_24_hour_time: false,
            show_seconds: false,
            window_width: default_window_width(),
            window_height: default_window_height(),
            default_user_id: None,
            keyset: KeysetSettings::default(),
            service: ServiceSettings::default(),
        }
    }
}

// =============================================================================
// Default Functions (for serde)
// =============================================================================

fn default_chat_font_size() -> u8 {
    CHAT_FONT_SIZE_DEFAULT
}

fn default_true() -> bool {
    true
}

fn default_window_width() -> f32 {
    WINDOW_WIDTH
}

fn default_window_height() -> f32 {
    WINDOW_HEIGHT
}

fn default_blocked_words() -> Vec<String> {
    DEFAULT_BLOCKED_WORDS.iter().map(|w| w.to_string()).collect()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.theme, ThemePreference::Light);
        assert_eq!(settings.chat_font_size, CHAT_FONT_SIZE_DEFAULT);
        assert!(settings.show_timestamps);
        assert!(!settings.use_24_hour_time);
        assert!(!settings.show_seconds);
        assert_eq!(settings.window_width, WINDOW_WIDTH);
        assert_eq!(settings.window_height, WINDOW_HEIGHT);
        assert!(settings.default_user_id.is_none());
        assert!(!settings.service.access_manager);
        assert!(!settings.service.blocked_words.is_empty());
    }

    #[test]
    fn test_empty_object_deserializes_to_defaults() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings.chat_font_size, CHAT_FONT_SIZE_DEFAULT);
        assert_eq!(settings.service.blocked_words, default_blocked_words());
    }

    #[test]
    fn test_font_size_is_clamped() {
        let settings = Settings {
            chat_font_size: 40,
            ..Default::default()
        };
        assert_eq!(settings.chat_font_size(), CHAT_FONT_SIZE_MAX);

        let settings = Settings {
            chat_font_size: 2,
            ..Default::default()
        };
        assert_eq!(settings.chat_font_size(), CHAT_FONT_SIZE_MIN);
    }

    #[test]
    fn test_keyset_debug_is_redacted() {
        let keyset = KeysetSettings {
            publish_key: "pub-c-secret".to_string(),
            subscribe_key: String::new(),
        };
        let debug = format!("{keyset:?}");
        assert!(!debug.contains("pub-c-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_service_settings_convert() {
        let service = ServiceSettings {
            access_manager: true,
            blocked_words: vec!["x".to_string()],
        };
        let local = LocalServiceSettings::from(&service);
        assert!(local.access_manager);
        assert_eq!(local.blocked_words, vec!["x"]);
    }
}
