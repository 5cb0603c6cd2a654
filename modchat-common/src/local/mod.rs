//! In-process messaging service
//!
//! `LocalService` keeps users, channels, memberships, presence and history in
//! memory and hands out [`LocalClient`] handles bound to one identity each.
//! It honours the same contract as a hosted service, including the two
//! behaviours the chat client reacts to:
//! - **Moderation**: publishes containing a blocked word fail with a
//!   forbidden publish error.
//! - **Access management**: when enabled, every request is denied and an
//!   access-denied status is broadcast.

mod client;
mod seed;

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{RwLock, broadcast};

use crate::client::{ClientHandle, ServiceEvent};
use crate::ids::{ChannelId, UserId};
use crate::model::{Channel, ChatMessage, User};

pub use client::LocalClient;
pub use seed::{Seed, SeedMessage};

/// Capacity of the event broadcast channel
///
/// Slow receivers that fall further behind than this see a lag error and
/// skip ahead.
pub const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Behaviour switches for the in-process service
#[derive(Debug, Clone, Default)]
pub struct LocalServiceSettings {
    /// Deny every request as if the keyset required access grants
    pub access_manager: bool,
    /// Words (case-insensitive, whole words) that cause a publish to be rejected
    pub blocked_words: Vec<String>,
}

impl LocalServiceSettings {
    /// The first blocked word contained in `text`, if any
    pub fn blocked_word(&self, text: &str) -> Option<&str> {
        let lower = text.to_lowercase();
        let words: Vec<&str> = lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();

        self.blocked_words
            .iter()
            .find(|blocked| {
                let blocked = blocked.to_lowercase();
                words.iter().any(|w| *w == blocked)
            })
            .map(String::as_str)
    }
}

/// Mutable service state behind the lock
#[derive(Debug, Default)]
struct ServiceState {
    /// Directory in insertion order
    users: Vec<User>,
    channels: HashMap<ChannelId, Channel>,
    /// Memberships per user, in the order they were added
    memberships: HashMap<UserId, Vec<ChannelId>>,
    /// Channels each user currently receives on (drives presence)
    subscriptions: HashMap<UserId, BTreeSet<ChannelId>>,
    history: HashMap<ChannelId, Vec<ChatMessage>>,
    last_timetoken: u64,
}

impl ServiceState {
    fn user(&self, id: &UserId) -> Option<&User> {
        self.users.iter().find(|u| &u.id == id)
    }

    fn channel_or_bare(&self, id: &ChannelId) -> Channel {
        self.channels
            .get(id)
            .cloned()
            .unwrap_or_else(|| Channel::bare(id.clone()))
    }

    /// Add a membership, returning true if it was new
    fn add_membership(&mut self, user: &UserId, channel: &ChannelId) -> bool {
        let joined = self.memberships.entry(user.clone()).or_default();
        if joined.contains(channel) {
            return false;
        }
        joined.push(channel.clone());
        true
    }

    fn remove_membership(&mut self, user: &UserId, channel: &ChannelId) -> bool {
        let Some(joined) = self.memberships.get_mut(user) else {
            return false;
        };
        let before = joined.len();
        joined.retain(|c| c != channel);
        joined.len() != before
    }

    fn is_member(&self, user: &UserId, channel: &ChannelId) -> bool {
        self.memberships
            .get(user)
            .is_some_and(|joined| joined.contains(channel))
    }

    /// Next strictly increasing timetoken (100ns resolution)
    fn next_timetoken(&mut self) -> u64 {
        let now = Utc::now()
            .timestamp_nanos_opt()
            .map_or(0, |nanos| (nanos / 100).max(0) as u64);
        self.last_timetoken = now.max(self.last_timetoken + 1);
        self.last_timetoken
    }
}

/// In-memory stand-in for the hosted messaging service
#[derive(Clone)]
pub struct LocalService {
    state: Arc<RwLock<ServiceState>>,
    events: broadcast::Sender<ServiceEvent>,
    settings: Arc<LocalServiceSettings>,
}

impl LocalService {
    /// Create an empty service
    pub fn new(settings: LocalServiceSettings) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            state: Arc::new(RwLock::new(ServiceState::default())),
            events,
            settings: Arc::new(settings),
        }
    }

    /// Create a service pre-populated from `seed`
    pub fn with_seed(settings: LocalServiceSettings, seed: Seed) -> Self {
        let service = Self::new(settings);
        let mut state = ServiceState {
            users: seed.users,
            ..Default::default()
        };

        for channel in seed.channels {
            state.channels.insert(channel.id.clone(), channel);
        }

        for (user, channels) in seed.memberships {
            for channel in channels {
                state.add_membership(&user, &channel);
            }
        }

        let seeded_at = Utc::now();
        for message in seed.messages {
            let timetoken = state.next_timetoken();
            state
                .history
                .entry(message.channel.clone())
                .or_default()
                .push(ChatMessage {
                    timetoken,
                    channel: message.channel,
                    publisher: message.publisher,
                    text: message.text,
                    sent_at: seeded_at,
                });
        }

        tracing::debug!(
            users = state.users.len(),
            channels = state.channels.len(),
            "seeded local service"
        );

        Self {
            state: Arc::new(RwLock::new(state)),
            ..service
        }
    }

    pub fn settings(&self) -> &LocalServiceSettings {
        &self.settings
    }

    /// A client bound to `user`
    pub fn client(&self, user: UserId) -> LocalClient {
        LocalClient::new(user, self.clone())
    }

    /// A type-erased handle bound to `user`
    pub fn handle(&self, user: UserId) -> ClientHandle {
        Arc::new(self.client(user))
    }

    /// Add or replace a directory entry
    pub async fn upsert_user(&self, user: User) {
        let mut state = self.state.write().await;
        match state.users.iter_mut().find(|u| u.id == user.id) {
            Some(existing) => *existing = user.clone(),
            None => state.users.push(user.clone()),
        }
        drop(state);
        self.emit(ServiceEvent::UserMetadataChanged(user));
    }

    /// Broadcast an event, ignoring the case where nobody is listening
    fn emit(&self, event: ServiceEvent) {
        let _ = self.events.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocked_word_matches_whole_words_case_insensitively() {
        let settings = LocalServiceSettings {
            access_manager: false,
            blocked_words: vec!["Darn".to_string()],
        };
        assert_eq!(settings.blocked_word("well DARN it"), Some("Darn"));
        assert_eq!(settings.blocked_word("darn!"), Some("Darn"));
        assert_eq!(settings.blocked_word("darned socks"), None);
        assert_eq!(settings.blocked_word(""), None);
    }

    #[test]
    fn test_timetokens_strictly_increase() {
        let mut state = ServiceState::default();
        let first = state.next_timetoken();
        let second = state.next_timetoken();
        assert!(second > first);
    }

    #[test]
    fn test_membership_bookkeeping() {
        let mut state = ServiceState::default();
        let user = UserId::new("u");
        let a = ChannelId::new("group.a");
        let b = ChannelId::new("group.b");

        assert!(state.add_membership(&user, &a));
        assert!(!state.add_membership(&user, &a));
        assert!(state.add_membership(&user, &b));
        assert_eq!(state.memberships[&user], vec![a.clone(), b.clone()]);

        assert!(state.remove_membership(&user, &a));
        assert!(!state.remove_membership(&user, &a));
        assert!(!state.is_member(&user, &a));
        assert!(state.is_member(&user, &b));
    }

    #[test]
    fn test_demo_seed_loads() {
        let seed = Seed::demo().expect("embedded seed parses");
        let service = LocalService::with_seed(LocalServiceSettings::default(), seed);
        let state = service.state.try_read().expect("uncontended");
        assert!(!state.users.is_empty());
        assert!(!state.memberships.is_empty());
    }
}
