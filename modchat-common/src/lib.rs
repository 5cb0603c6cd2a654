//! Modchat Common Library
//!
//! Shared model, channel id conventions, the messaging client contract and
//! an in-process service used by the desktop client and its tests.

pub mod client;
pub mod error;
pub mod ids;
pub mod local;
pub mod model;
pub mod status;
pub mod validators;

pub use client::{ClientHandle, MessagingClient, ServiceEvent};
pub use error::{Result, ServiceError};
pub use ids::{ChannelId, ChannelKind, UserId};
pub use local::{LocalClient, LocalService, LocalServiceSettings};
pub use model::{Channel, ChannelMember, ChatMessage, Membership, PresenceSnapshot, User};
pub use status::{Operation, StatusCategory, StatusEvent};

/// Number of messages fetched when a channel is opened
pub const HISTORY_FETCH_COUNT: usize = 25;

/// Identity used when the launch URL does not name one
pub const DEFAULT_USER_ID: &str = "63e24a7a85a67d86c88cd59f";
