//! Service event streaming

use std::hash::{Hash, Hasher};
use std::pin::Pin;

use iced::futures::{SinkExt, Stream};
use iced::stream;
use tokio::sync::broadcast::error::RecvError;

use modchat_common::{ClientHandle, ServiceEvent};

use crate::types::{Message, Refresh};

use super::constants::STREAM_CHANNEL_SIZE;

/// Subscription key carrying the client handle
///
/// Hashes by identity, so the stream is started once per session and
/// restarted only when the handle changes.
#[derive(Clone)]
pub struct ServiceLink {
    client: ClientHandle,
}

impl ServiceLink {
    pub fn new(client: ClientHandle) -> Self {
        Self { client }
    }
}

impl Hash for ServiceLink {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.client.user_id().hash(state);
    }
}

/// Stream forwarding service events to the UI
pub fn service_events(link: &ServiceLink) -> Pin<Box<dyn Stream<Item = Message> + Send>> {
    let client = link.client.clone();
    Box::pin(stream::channel(
        STREAM_CHANNEL_SIZE,
        move |mut output: iced::futures::channel::mpsc::Sender<Message>| async move {
            let mut receiver = client.events();
            loop {
                let received = receiver.recv().await;
                let closed = matches!(received, Err(RecvError::Closed));
                if let Some(message) = forward(received) {
                    let _ = output.send(message).await;
                }
                if closed {
                    break;
                }
            }
            tracing::debug!(user = %client.user_id(), "service event stream closed");
        },
    ))
}

/// Turn one receive outcome into a UI message
///
/// A lagged receiver missed events, so every query is re-run instead.
fn forward(received: Result<ServiceEvent, RecvError>) -> Option<Message> {
    match received {
        Ok(event) => Some(Message::ServiceEvent(event)),
        Err(RecvError::Lagged(skipped)) => {
            tracing::warn!(skipped, "service events dropped, refreshing");
            Some(Message::Refresh(Refresh::All))
        }
        Err(RecvError::Closed) => None,
    }
}
