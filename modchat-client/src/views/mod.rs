//! View rendering

mod alert;
mod channel_list;
mod chat;
mod create_chat;
mod layout;
mod member_list;
mod notices;

pub use layout::main_layout;
