//! Pure derivations over query results
//!
//! Nothing here touches the client handle; the chat surface feeds in the
//! latest query results and renders what comes out.

use modchat_common::{
    Channel, ChannelId, ChannelKind, ChannelMember, Membership, PresenceSnapshot, User, UserId,
};

/// Channels of the acting user in service order, with direct conversations
/// named after the counterpart found in the directory
///
/// A direct channel whose counterpart is not in the directory is left as
/// returned by the service.
pub fn resolve_channels(memberships: &[Membership], users: &[User], current: &UserId) -> Vec<Channel> {
    memberships
        .iter()
        .map(|membership| {
            let channel = &membership.channel;
            match channel.id.kind(current) {
                ChannelKind::Direct { counterpart } => {
                    match users.iter().find(|user| user.id == counterpart) {
                        Some(user) => {
                            let mut resolved = channel.clone();
                            resolved.name = Some(user.display_name().to_string());
                            resolved.set_profile_url(user.profile_url.clone().unwrap_or_default());
                            resolved
                        }
                        None => channel.clone(),
                    }
                }
                ChannelKind::Group | ChannelKind::Default => channel.clone(),
            }
        })
        .collect()
}

/// Direct and group conversations, resolved
pub fn derive_conversations(
    memberships: &[Membership],
    users: &[User],
    current: &UserId,
) -> Vec<Channel> {
    resolve_channels(memberships, users, current)
        .into_iter()
        .filter(|channel| channel.id.is_conversation())
        .collect()
}

/// Keep channels whose display name contains `filter`, ignoring case
pub fn filter_by_name(channels: Vec<Channel>, filter: &str) -> Vec<Channel> {
    if filter.is_empty() {
        return channels;
    }

    let needle = filter.to_lowercase();
    channels
        .into_iter()
        .filter(|channel| channel.display_name().to_lowercase().contains(&needle))
        .collect()
}

// =============================================================================
// Roster
// =============================================================================

/// One row of the member panel
#[derive(Debug, Clone, PartialEq)]
pub struct MemberEntry {
    pub user: User,
    /// Present in the channel according to the latest presence snapshot
    pub present: bool,
    /// The acting user
    pub is_self: bool,
}

/// Roster rows for `channel`, filtered by display name
pub fn member_entries(
    members: &[ChannelMember],
    presence: Option<&PresenceSnapshot>,
    channel: &ChannelId,
    current: &UserId,
    filter: &str,
) -> Vec<MemberEntry> {
    let needle = filter.to_lowercase();
    members
        .iter()
        .filter(|member| {
            needle.is_empty() || member.user.display_name().to_lowercase().contains(&needle)
        })
        .map(|member| MemberEntry {
            present: presence.is_some_and(|snapshot| snapshot.is_present(channel, &member.user.id)),
            is_self: &member.user.id == current,
            user: member.user.clone(),
        })
        .collect()
}

// =============================================================================
// Selection
// =============================================================================

/// First channel other than `left`, in list order
pub fn next_after_leave<'a>(channels: &'a [Channel], left: &ChannelId) -> Option<&'a Channel> {
    channels.iter().find(|channel| &channel.id != left)
}

/// Replacement for a selection that no longer appears in a non-empty list
///
/// Returns None when the selection is still valid or the list is empty.
pub fn revalidate<'a>(channels: &'a [Channel], selected: &ChannelId) -> Option<&'a Channel> {
    if channels.iter().any(|channel| &channel.id == selected) {
        return None;
    }
    channels.first()
}
