//! Message types for the Elm-style architecture

use modchat_common::{
    Channel, ChannelId, ChannelMember, ChatMessage, Membership, PresenceSnapshot, ServiceError,
    ServiceEvent, User, UserId,
};

/// Queries that can be re-run on demand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    /// Every query below
    All,
    CurrentUser,
    Users,
    Memberships,
    /// Roster of the selected channel
    ChannelMembers,
    Presence,
    /// History of the selected channel
    History,
}

/// Messages that drive the application state machine
#[derive(Debug, Clone)]
pub enum Message {
    /// Channel list: Filter text changed
    ChannelsFilterChanged(String),
    /// Channel list: Conversation clicked
    ChannelSelected(Channel),
    /// Query: Roster of a channel loaded
    ChannelMembersLoaded {
        generation: u64,
        channel: ChannelId,
        result: Result<Vec<ChannelMember>, ServiceError>,
    },
    /// Create chat: Cancel pressed or overlay dismissed
    CloseCreateChat,
    /// Create chat: Group name changed
    CreateChatGroupNameChanged(String),
    /// Create chat: Remote create sequence finished
    CreateChatResult(Result<Channel, ServiceError>),
    /// Create chat: Search text changed
    CreateChatSearchChanged(String),
    /// Create chat: Create button pressed
    CreateChatSubmit,
    /// Create chat: User checkbox toggled
    CreateChatUserToggled(UserId, bool),
    /// Query: Acting user looked up
    CurrentUserLoaded(u64, Result<Option<User>, ServiceError>),
    /// Alert: OK pressed
    DismissAlert,
    /// Query: Message history of a channel loaded
    HistoryLoaded {
        generation: u64,
        channel: ChannelId,
        result: Result<Vec<ChatMessage>, ServiceError>,
    },
    /// Channel list: Leave button pressed
    LeaveChannel(ChannelId),
    /// Channel list: Remote leave finished
    LeaveChannelResult(ChannelId, Result<(), ServiceError>),
    /// Member list: Filter text changed
    MembersFilterChanged(String),
    /// Query: Memberships of the acting user loaded
    MembershipsLoaded(u64, Result<Vec<Membership>, ServiceError>),
    /// Chat: Input text changed
    MessageInputChanged(String),
    /// Chat: Publish finished, with the timetoken
    MessageSent(Result<u64, ServiceError>),
    /// Open a URL in the default browser
    OpenUrl(String),
    /// Query: Presence of joined channels loaded
    PresenceLoaded(u64, Result<PresenceSnapshot, ServiceError>),
    /// Timer: Periodic presence refresh
    PresenceTick,
    /// Re-run a query
    Refresh(Refresh),
    /// Chat: Send button pressed or Enter in the input
    SendMessagePressed,
    /// Service: Realtime event received
    ServiceEvent(ServiceEvent),
    /// Channel list: "+" pressed
    ShowCreateChat,
    /// Service: Subscribe finished for the given channel set
    SubscribeResult(Vec<ChannelId>, Result<(), ServiceError>),
    /// Chat: Channel panel toggle (hamburger) pressed
    ToggleChannels,
    /// Chat: Member count in the header pressed
    ToggleMembers,
    /// Chat: Typing signal sent
    TypingSignalResult(Result<(), ServiceError>),
    /// Query: User directory loaded
    UsersLoaded(u64, Result<Vec<User>, ServiceError>),
    /// Window: Close requested (save window size first)
    WindowCloseRequested(iced::window::Id),
    /// Window: Size queried, save and close
    WindowSaveAndClose {
        id: iced::window::Id,
        width: f32,
        height: f32,
    },
}
