//! Network constants

/// Buffer size of the channel between the event stream and the UI
pub const STREAM_CHANNEL_SIZE: usize = 100;
