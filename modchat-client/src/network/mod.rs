//! Realtime event delivery from the messaging service

mod constants;
mod stream;

pub use stream::{ServiceLink, service_events};
