//! Type definitions for the Modchat client

mod form;
mod message;
mod ui;
mod view_config;

// Re-export types for convenience
pub use form::{ChatPlan, CreateChatForm};
pub use message::{Message, Refresh};
pub use ui::{InputId, UiState};
pub use view_config::ViewConfig;
