//! Text helpers with advanced shaping
//!
//! Names, messages and translations may contain scripts and emoji that the
//! basic shaper renders wrong.

use iced::widget::text::{Shaping, Wrapping};
use iced::widget::{Text, text};

/// Text widget with advanced shaping
pub fn shaped_text<'a>(content: impl text::IntoFragment<'a>) -> Text<'a> {
    text(content).shaping(Shaping::Advanced)
}

/// Shaped text that wraps at word boundaries, falling back to glyphs
pub fn shaped_text_wrapped<'a>(content: impl text::IntoFragment<'a>) -> Text<'a> {
    shaped_text(content).wrapping(Wrapping::WordOrGlyph)
}
