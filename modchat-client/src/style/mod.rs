//! Styling, layout constants and colors

pub mod chat;
mod layout;
mod shaping;
pub mod ui;
mod widgets;
mod window;

pub use layout::*;
pub use shaping::{shaped_text, shaped_text_wrapped};
pub use widgets::*;
pub use window::*;
