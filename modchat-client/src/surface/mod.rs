//! Chat surface state
//!
//! The surface holds the latest result of every query the panels render:
//! memberships of the acting user, the user directory, presence per joined
//! channel, the roster and the history of the selected channel. Each query
//! carries a generation so a late result never overwrites a newer one.
//!
//! All methods are synchronous; the handlers issue remote calls and feed the
//! results back in.

pub mod derive;
pub mod errors;

use std::collections::{BTreeMap, BTreeSet};

use modchat_common::{
    Channel, ChannelId, ChannelMember, ChatMessage, Membership, PresenceSnapshot, User, UserId,
};

pub use derive::MemberEntry;
pub use errors::{Alert, classify_error};

// =============================================================================
// Query
// =============================================================================

/// Latest result of a repeatable query, last write wins
#[derive(Debug, Clone)]
pub struct Query<T> {
    data: Option<T>,
    /// Generation of the most recent request
    requested: u64,
    /// Generation of the result currently held (or of the last failure)
    applied: u64,
}

impl<T> Default for Query<T> {
    fn default() -> Self {
        Self {
            data: None,
            requested: 0,
            applied: 0,
        }
    }
}

impl<T> Query<T> {
    /// Start a request, returning its generation
    pub fn begin(&mut self) -> u64 {
        self.requested += 1;
        self.requested
    }

    /// Store a result unless a newer one is already held
    ///
    /// Returns true if the result was stored.
    pub fn apply(&mut self, generation: u64, data: T) -> bool {
        if generation <= self.applied {
            return false;
        }
        self.applied = generation;
        self.data = Some(data);
        true
    }

    /// Record a failed request, keeping the previous result
    pub fn settle(&mut self, generation: u64) {
        self.applied = self.applied.max(generation);
    }

    pub fn get(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// A request is outstanding and nothing has loaded yet
    pub fn is_loading(&self) -> bool {
        self.data.is_none() && self.requested > self.applied
    }

    /// Drop the held result; requests already in flight still apply
    pub fn clear(&mut self) {
        self.data = None;
    }
}

// =============================================================================
// Selection
// =============================================================================

/// The channel shown in the thread panel
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Selection {
    /// Nothing chosen yet; rendered as the `default` placeholder
    #[default]
    Pending,
    Channel(Channel),
}

impl Selection {
    pub fn id(&self) -> ChannelId {
        match self {
            Selection::Pending => ChannelId::placeholder(),
            Selection::Channel(channel) => channel.id.clone(),
        }
    }

    pub fn channel(&self) -> Option<&Channel> {
        match self {
            Selection::Pending => None,
            Selection::Channel(channel) => Some(channel),
        }
    }
}

// =============================================================================
// Chat Surface
// =============================================================================

/// State behind the channel list, thread and member panels
#[derive(Debug)]
pub struct ChatSurface {
    user_id: UserId,

    pub current_user: Query<Option<User>>,
    pub memberships: Query<Vec<Membership>>,
    pub users: Query<Vec<User>>,
    pub channel_members: Query<Vec<ChannelMember>>,
    pub presence: Query<PresenceSnapshot>,
    pub history: Query<Vec<ChatMessage>>,

    selection: Selection,
    /// Membership generation requested when a channel was last chosen
    selected_at: u64,
    /// Users currently typing, per channel
    typing: BTreeMap<ChannelId, BTreeSet<UserId>>,
    /// Channel we last signalled `typing = true` on
    typing_sent: Option<ChannelId>,
    /// Channels of the last successful subscribe
    subscribed: Vec<ChannelId>,
}

impl ChatSurface {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            current_user: Query::default(),
            memberships: Query::default(),
            users: Query::default(),
            channel_members: Query::default(),
            presence: Query::default(),
            history: Query::default(),
            selection: Selection::Pending,
            selected_at: 0,
            typing: BTreeMap::new(),
            typing_sent: None,
            subscribed: Vec::new(),
        }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// The acting user, once looked up
    pub fn current_user(&self) -> Option<&User> {
        self.current_user.get().and_then(Option::as_ref)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Id of the selected channel, None while pending
    pub fn selected_id(&self) -> Option<&ChannelId> {
        self.selection.channel().map(|channel| &channel.id)
    }

    // ==================== Channel list ====================

    /// All joined channels, resolved, in service order
    pub fn joined_channels(&self) -> Vec<Channel> {
        match self.memberships.get() {
            Some(memberships) => derive::resolve_channels(
                memberships,
                self.users.get().map(Vec::as_slice).unwrap_or_default(),
                &self.user_id,
            ),
            None => Vec::new(),
        }
    }

    /// Conversations for the channel panel, filtered by name
    pub fn conversations(&self, filter: &str) -> Vec<Channel> {
        let Some(memberships) = self.memberships.get() else {
            return Vec::new();
        };
        let conversations = derive::derive_conversations(
            memberships,
            self.users.get().map(Vec::as_slice).unwrap_or_default(),
            &self.user_id,
        );
        derive::filter_by_name(conversations, filter)
    }

    // ==================== Selection ====================

    /// Select a channel chosen by the user, dropping the roster and history
    /// of the previous one
    ///
    /// Membership lists requested before this call may not contain the
    /// channel yet, so they never replace it.
    ///
    /// Returns true if the selected id changed.
    pub fn select(&mut self, channel: Channel) -> bool {
        self.selected_at = self.memberships.requested;
        self.set_selection(channel)
    }

    fn set_selection(&mut self, channel: Channel) -> bool {
        let changed = self.selected_id() != Some(&channel.id);
        self.selection = Selection::Channel(channel);
        if changed {
            self.channel_members.clear();
            self.history.clear();
        }
        changed
    }

    /// Select the first joined channel while nothing is selected
    ///
    /// Returns the newly selected id.
    pub fn auto_select(&mut self) -> Option<ChannelId> {
        if self.selection != Selection::Pending {
            return None;
        }
        let first = self.joined_channels().into_iter().next()?;
        let id = first.id.clone();
        self.set_selection(first);
        Some(id)
    }

    /// Apply a membership result, then re-validate and auto-select
    ///
    /// Returns the newly selected id when the selection changed.
    pub fn apply_memberships(&mut self, generation: u64, memberships: Vec<Membership>) -> Option<ChannelId> {
        if !self.memberships.apply(generation, memberships) {
            return None;
        }
        self.reconcile_selection()
    }

    /// Apply a directory result and refresh the selected channel's name
    pub fn apply_users(&mut self, generation: u64, users: Vec<User>) -> bool {
        if !self.users.apply(generation, users) {
            return false;
        }
        self.reconcile_selection();
        true
    }

    /// Keep the selection pointing at a joined channel
    fn reconcile_selection(&mut self) -> Option<ChannelId> {
        let channels = self.joined_channels();

        if let Some(selected) = self.selected_id().cloned() {
            if self.memberships.applied > self.selected_at
                && let Some(replacement) = derive::revalidate(&channels, &selected)
            {
                let id = replacement.id.clone();
                self.set_selection(replacement.clone());
                return Some(id);
            }
            // Still joined: pick up metadata and resolved names
            if let Some(current) = channels.into_iter().find(|channel| channel.id == selected) {
                self.selection = Selection::Channel(current);
            }
            return None;
        }

        self.auto_select()
    }

    /// Move the selection off a channel that was just left
    ///
    /// Uses the latest membership list, which may still contain the left
    /// channel. When no other channel exists the selection stays put until a
    /// refreshed list re-validates it.
    pub fn reassign_after_leave(&mut self, left: &ChannelId) -> Option<ChannelId> {
        if self.selected_id() != Some(left) {
            return None;
        }
        let channels = self.joined_channels();
        let next = derive::next_after_leave(&channels, left)?.clone();
        let id = next.id.clone();
        self.set_selection(next);
        Some(id)
    }

    // ==================== Roster and presence ====================

    /// Member panel rows for the selected channel
    pub fn member_entries(&self, filter: &str) -> Vec<MemberEntry> {
        match (self.selected_id(), self.channel_members.get()) {
            (Some(channel), Some(members)) => derive::member_entries(
                members,
                self.presence.get(),
                channel,
                &self.user_id,
                filter,
            ),
            _ => Vec::new(),
        }
    }

    /// Roster size of the selected channel
    pub fn total_members(&self) -> usize {
        self.channel_members.get().map_or(0, Vec::len)
    }

    /// Store a roster if it belongs to the selected channel
    pub fn apply_channel_members(
        &mut self,
        generation: u64,
        channel: &ChannelId,
        members: Vec<ChannelMember>,
    ) -> bool {
        if self.selected_id() != Some(channel) {
            return false;
        }
        self.channel_members.apply(generation, members)
    }

    /// Channels to query presence for
    pub fn presence_channels(&self) -> Vec<ChannelId> {
        let mut channels: Vec<ChannelId> = self
            .memberships
            .get()
            .map(|memberships| memberships.iter().map(|m| m.id().clone()).collect())
            .unwrap_or_default();

        if let Some(selected) = self.selected_id()
            && !channels.contains(selected)
        {
            channels.push(selected.clone());
        }
        channels
    }

    /// Channels to receive on: every joined channel plus the user's own id
    pub fn subscription_channels(&self) -> Vec<ChannelId> {
        let mut channels = self.presence_channels();
        let own = ChannelId::new(self.user_id.as_str());
        if !channels.contains(&own) {
            channels.push(own);
        }
        channels
    }

    /// Whether `channels` differ from the last subscribe
    pub fn needs_subscribe(&self, channels: &[ChannelId]) -> bool {
        self.subscribed != channels
    }

    pub fn mark_subscribed(&mut self, channels: Vec<ChannelId>) {
        self.subscribed = channels;
    }

    // ==================== History ====================

    /// Store history if it belongs to the selected channel
    pub fn apply_history(
        &mut self,
        generation: u64,
        channel: &ChannelId,
        messages: Vec<ChatMessage>,
    ) -> bool {
        if self.selected_id() != Some(channel) {
            return false;
        }
        self.history.apply(generation, messages)
    }

    /// Add a live message to the selected channel's history
    ///
    /// Ignored for other channels and while history is still loading.
    /// Duplicates (same timetoken) are dropped.
    pub fn append_message(&mut self, message: ChatMessage) -> bool {
        if self.selected_id() != Some(&message.channel) {
            return false;
        }
        let Some(history) = self.history.data.as_mut() else {
            return false;
        };
        match history.binary_search_by_key(&message.timetoken, |m| m.timetoken) {
            Ok(_) => false,
            Err(index) => {
                history.insert(index, message);
                true
            }
        }
    }

    /// Display name of a publisher, falling back to the id
    pub fn publisher_name<'a>(&'a self, id: &'a UserId) -> &'a str {
        self.users
            .get()
            .and_then(|users| users.iter().find(|user| &user.id == id))
            .map(User::display_name)
            .unwrap_or(id.as_str())
    }

    // ==================== Typing ====================

    /// Record a typing signal from another user
    pub fn set_typing(&mut self, channel: ChannelId, user: UserId, typing: bool) {
        if user == self.user_id {
            return;
        }
        if typing {
            self.typing.entry(channel).or_default().insert(user);
        } else if let Some(users) = self.typing.get_mut(&channel) {
            users.remove(&user);
            if users.is_empty() {
                self.typing.remove(&channel);
            }
        }
    }

    /// Names of other users typing in the selected channel
    pub fn typing_names(&self) -> Vec<String> {
        let Some(selected) = self.selected_id() else {
            return Vec::new();
        };
        self.typing
            .get(selected)
            .map(|users| {
                users
                    .iter()
                    .map(|id| self.publisher_name(id).to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Typing signals to send after the input changed
    ///
    /// Only transitions produce signals: starting to type in the selected
    /// channel, clearing the input, or moving to another channel with a
    /// draft still in the input.
    pub fn typing_transitions(&mut self, input_empty: bool) -> Vec<(ChannelId, bool)> {
        let target = if input_empty {
            None
        } else {
            self.selected_id().cloned()
        };
        if target == self.typing_sent {
            return Vec::new();
        }

        let mut signals = Vec::new();
        if let Some(previous) = self.typing_sent.take() {
            signals.push((previous, false));
        }
        if let Some(channel) = target {
            signals.push((channel.clone(), true));
            self.typing_sent = Some(channel);
        }
        signals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn surface_for(user: &str) -> ChatSurface {
        ChatSurface::new(UserId::new(user))
    }

    fn memberships(ids: &[&str]) -> Vec<Membership> {
        ids.iter()
            .map(|id| Membership::new(Channel::bare(*id)))
            .collect()
    }

    fn load_memberships(surface: &mut ChatSurface, ids: &[&str]) -> Option<ChannelId> {
        let generation = surface.memberships.begin();
        surface.apply_memberships(generation, memberships(ids))
    }

    fn message(channel: &str, timetoken: u64, text: &str) -> ChatMessage {
        ChatMessage {
            timetoken,
            channel: ChannelId::new(channel),
            publisher: UserId::new("alice"),
            text: text.to_string(),
            sent_at: Utc::now(),
        }
    }

    #[test]
    fn test_query_last_write_wins() {
        let mut query: Query<u32> = Query::default();
        let first = query.begin();
        let second = query.begin();
        assert!(query.is_loading());

        assert!(query.apply(second, 2));
        assert!(!query.apply(first, 1));
        assert_eq!(query.get(), Some(&2));
        assert!(!query.is_loading());
    }

    #[test]
    fn test_query_failure_keeps_data() {
        let mut query: Query<u32> = Query::default();
        let first = query.begin();
        query.apply(first, 7);
        let failed = query.begin();
        query.settle(failed);
        assert_eq!(query.get(), Some(&7));
        assert!(!query.apply(failed, 9));
    }

    #[test]
    fn test_pending_selection_renders_placeholder() {
        let surface = surface_for("bob");
        assert_eq!(surface.selection().id(), ChannelId::placeholder());
        assert!(surface.selected_id().is_none());
    }

    #[test]
    fn test_auto_select_first_membership() {
        let mut surface = surface_for("bob");
        // Empty list: stays pending
        assert_eq!(load_memberships(&mut surface, &[]), None);
        assert_eq!(surface.selection(), &Selection::Pending);

        let selected = load_memberships(&mut surface, &["direct.alice@bob", "group.team"]);
        assert_eq!(selected, Some(ChannelId::new("direct.alice@bob")));

        // A later refresh does not move an existing valid selection
        assert_eq!(
            load_memberships(&mut surface, &["group.team", "direct.alice@bob"]),
            None
        );
        assert_eq!(surface.selected_id(), Some(&ChannelId::new("direct.alice@bob")));
    }

    #[test]
    fn test_worked_example_conversations() {
        let mut surface = surface_for("bob");
        let generation = surface.users.begin();
        surface.apply_users(
            generation,
            vec![User::new("alice", "Alice"), User::new("bob", "Bob")],
        );
        load_memberships(&mut surface, &["direct.alice@bob", "group.team"]);

        let conversations = surface.conversations("");
        let listed: Vec<_> = conversations
            .iter()
            .map(|c| (c.id.as_str(), c.display_name()))
            .collect();
        assert_eq!(
            listed,
            [("direct.alice@bob", "Alice"), ("group.team", "group.team")]
        );

        let filtered = surface.conversations("ali");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].display_name(), "Alice");

        // The selection picked up the resolved name
        assert_eq!(
            surface.selection().channel().map(Channel::display_name),
            Some("Alice")
        );
    }

    #[test]
    fn test_leave_selected_channel_selects_remaining() {
        let mut surface = surface_for("bob");
        load_memberships(&mut surface, &["direct.alice@bob", "group.team"]);
        surface.select(Channel::bare("group.team"));

        let next = surface.reassign_after_leave(&ChannelId::new("group.team"));
        assert_eq!(next, Some(ChannelId::new("direct.alice@bob")));

        // Refreshed list no longer has group.team; selection is unaffected
        assert_eq!(load_memberships(&mut surface, &["direct.alice@bob"]), None);
        assert_eq!(surface.selected_id(), Some(&ChannelId::new("direct.alice@bob")));
    }

    #[test]
    fn test_leave_unselected_channel_keeps_selection() {
        let mut surface = surface_for("bob");
        load_memberships(&mut surface, &["direct.alice@bob", "group.team"]);
        assert_eq!(surface.reassign_after_leave(&ChannelId::new("group.team")), None);
        assert_eq!(surface.selected_id(), Some(&ChannelId::new("direct.alice@bob")));
    }

    #[test]
    fn test_leave_only_channel_then_refresh_revalidates() {
        let mut surface = surface_for("bob");
        load_memberships(&mut surface, &["group.team"]);

        // Nothing else to select: the selection dangles for now
        assert_eq!(surface.reassign_after_leave(&ChannelId::new("group.team")), None);
        assert_eq!(surface.selected_id(), Some(&ChannelId::new("group.team")));

        // Empty refresh leaves it alone
        assert_eq!(load_memberships(&mut surface, &[]), None);

        // A non-empty refresh without it replaces it
        assert_eq!(
            load_memberships(&mut surface, &["group.other"]),
            Some(ChannelId::new("group.other"))
        );
    }

    #[test]
    fn test_selection_never_dangles_after_nonempty_refresh() {
        let lists: [&[&str]; 4] = [
            &["group.a", "group.b"],
            &["group.b"],
            &["group.c", "group.a"],
            &["group.a"],
        ];
        let mut surface = surface_for("bob");
        for list in lists {
            load_memberships(&mut surface, list);
            let selected = surface.selected_id().cloned().unwrap();
            assert!(list.contains(&selected.as_str()), "{selected} not in {list:?}");
        }
    }

    #[test]
    fn test_stale_membership_result_is_dropped() {
        let mut surface = surface_for("bob");
        let old = surface.memberships.begin();
        let new = surface.memberships.begin();
        surface.apply_memberships(new, memberships(&["group.new"]));
        assert_eq!(surface.apply_memberships(old, memberships(&["group.old"])), None);
        assert_eq!(surface.selected_id(), Some(&ChannelId::new("group.new")));
    }

    #[test]
    fn test_chosen_channel_survives_older_membership_lists() {
        let mut surface = surface_for("bob");
        load_memberships(&mut surface, &["group.a"]);

        // A refresh is in flight when the user picks a channel it cannot know
        let in_flight = surface.memberships.begin();
        surface.select(Channel::bare("group.new"));
        let after = surface.memberships.begin();

        assert_eq!(
            surface.apply_memberships(in_flight, memberships(&["group.a"])),
            None
        );
        assert_eq!(surface.selected_id(), Some(&ChannelId::new("group.new")));

        assert_eq!(
            surface.apply_memberships(after, memberships(&["group.a", "group.new"])),
            None
        );
        assert_eq!(surface.selected_id(), Some(&ChannelId::new("group.new")));
    }

    #[test]
    fn test_newer_membership_list_replaces_chosen_channel() {
        let mut surface = surface_for("bob");
        load_memberships(&mut surface, &["group.a", "group.b"]);
        surface.select(Channel::bare("group.b"));

        // Requested after the choice and still without it
        assert_eq!(
            load_memberships(&mut surface, &["group.a"]),
            Some(ChannelId::new("group.a"))
        );
    }

    #[test]
    fn test_select_clears_roster_and_history() {
        let mut surface = surface_for("bob");
        load_memberships(&mut surface, &["group.a", "group.b"]);
        let a = ChannelId::new("group.a");

        let generation = surface.history.begin();
        assert!(surface.apply_history(generation, &a, vec![message("group.a", 1, "hi")]));
        let generation = surface.channel_members.begin();
        assert!(surface.apply_channel_members(
            generation,
            &a,
            vec![ChannelMember { user: User::new("bob", "Bob") }],
        ));
        assert_eq!(surface.total_members(), 1);

        assert!(surface.select(Channel::bare("group.b")));
        assert!(surface.history.get().is_none());
        assert_eq!(surface.total_members(), 0);

        // Late results for the old channel are ignored
        let generation = surface.history.begin();
        assert!(!surface.apply_history(generation, &a, vec![message("group.a", 2, "late")]));
    }

    #[test]
    fn test_append_message_dedupes_and_orders() {
        let mut surface = surface_for("bob");
        load_memberships(&mut surface, &["group.a"]);
        let a = ChannelId::new("group.a");

        // History not loaded yet
        assert!(!surface.append_message(message("group.a", 5, "early")));

        let generation = surface.history.begin();
        surface.apply_history(generation, &a, vec![message("group.a", 10, "ten")]);

        assert!(surface.append_message(message("group.a", 20, "twenty")));
        assert!(!surface.append_message(message("group.a", 20, "twenty again")));
        assert!(surface.append_message(message("group.a", 15, "fifteen")));
        assert!(!surface.append_message(message("group.b", 30, "elsewhere")));

        let texts: Vec<_> = surface
            .history
            .get()
            .unwrap()
            .iter()
            .map(|m| m.text.as_str())
            .collect();
        assert_eq!(texts, ["ten", "fifteen", "twenty"]);
    }

    #[test]
    fn test_member_entries_for_selected_channel() {
        let mut surface = surface_for("bob");
        load_memberships(&mut surface, &["group.a"]);
        let a = ChannelId::new("group.a");

        let generation = surface.channel_members.begin();
        surface.apply_channel_members(
            generation,
            &a,
            vec![
                ChannelMember { user: User::new("alice", "Alice") },
                ChannelMember { user: User::new("bob", "Bob") },
            ],
        );
        let mut snapshot = PresenceSnapshot::default();
        snapshot
            .channels
            .insert(a.clone(), [UserId::new("alice")].into_iter().collect());
        let generation = surface.presence.begin();
        surface.presence.apply(generation, snapshot);

        let entries = surface.member_entries("");
        assert_eq!(entries.len(), 2);
        assert!(entries[0].present);
        assert!(entries[1].is_self);
        assert_eq!(surface.member_entries("ALI").len(), 1);
    }

    #[test]
    fn test_subscription_channels_include_own_id() {
        let mut surface = surface_for("bob");
        load_memberships(&mut surface, &["group.a", "direct.alice@bob"]);
        assert_eq!(
            surface.subscription_channels(),
            vec![
                ChannelId::new("group.a"),
                ChannelId::new("direct.alice@bob"),
                ChannelId::new("bob"),
            ]
        );

        let channels = surface.subscription_channels();
        assert!(surface.needs_subscribe(&channels));
        surface.mark_subscribed(channels.clone());
        assert!(!surface.needs_subscribe(&channels));
    }

    #[test]
    fn test_presence_channels_include_unjoined_selection() {
        let mut surface = surface_for("bob");
        surface.select(Channel::bare("group.new"));
        assert_eq!(surface.presence_channels(), vec![ChannelId::new("group.new")]);
    }

    #[test]
    fn test_typing_indicator_names_others_in_selected_channel() {
        let mut surface = surface_for("bob");
        let generation = surface.users.begin();
        surface.apply_users(generation, vec![User::new("alice", "Alice")]);
        load_memberships(&mut surface, &["group.a", "group.b"]);

        let a = ChannelId::new("group.a");
        surface.set_typing(a.clone(), UserId::new("alice"), true);
        surface.set_typing(a.clone(), UserId::new("bob"), true);
        surface.set_typing(ChannelId::new("group.b"), UserId::new("zed"), true);
        assert_eq!(surface.typing_names(), vec!["Alice".to_string()]);

        surface.set_typing(a, UserId::new("alice"), false);
        assert!(surface.typing_names().is_empty());
    }

    #[test]
    fn test_typing_signals_only_on_transitions() {
        let mut surface = surface_for("bob");
        load_memberships(&mut surface, &["group.a", "group.b"]);
        let a = ChannelId::new("group.a");
        let b = ChannelId::new("group.b");

        assert_eq!(surface.typing_transitions(false), vec![(a.clone(), true)]);
        assert!(surface.typing_transitions(false).is_empty());

        surface.select(Channel::bare("group.b"));
        assert_eq!(
            surface.typing_transitions(false),
            vec![(a, false), (b.clone(), true)]
        );

        assert_eq!(surface.typing_transitions(true), vec![(b, false)]);
        assert!(surface.typing_transitions(true).is_empty());
    }
}
