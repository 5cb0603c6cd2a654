//! Input validation functions
//!
//! The client pre-validates with these before calling the service; the
//! in-process service does not re-check them.

mod group_name;
mod message;

pub use group_name::{GroupNameError, MAX_GROUP_NAME_LENGTH, validate_group_name};
pub use message::{MAX_MESSAGE_LENGTH, MessageError, validate_message};
