//! Modchat - moderated chat desktop client
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod bootstrap;
mod config;
mod constants;
mod handlers;
mod i18n;
mod launch;
mod network;
mod style;
mod surface;
mod types;
mod views;

use std::collections::VecDeque;
use std::time::Duration;

use iced::{Element, Subscription, Task, Theme};
use modchat_common::UserId;
use tracing_subscriber::EnvFilter;

use bootstrap::{Keyset, Screen, Session};
use constants::{DEFAULT_LOG_FILTER, ENV_LOG_FILTER, PRESENCE_REFRESH_INTERVAL_SECS};
use network::ServiceLink;
use style::{WINDOW_HEIGHT_MIN, WINDOW_TITLE, WINDOW_WIDTH_MIN};
use surface::{Alert, ChatSurface};
use types::{CreateChatForm, Message, Refresh, UiState, ViewConfig};

/// Application entry point
///
/// Sets up logging, loads the config for the saved window size, then starts
/// the event loop.
pub fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(ENV_LOG_FILTER)
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = config::Config::load();
    let window_size = iced::Size::new(config.settings.window_width, config.settings.window_height);

    iced::application(ModchatApp::new, ModchatApp::update, ModchatApp::view)
        .title(WINDOW_TITLE)
        .theme(ModchatApp::theme)
        .subscription(ModchatApp::subscription)
        .window(iced::window::Settings {
            size: window_size,
            min_size: Some(iced::Size::new(WINDOW_WIDTH_MIN, WINDOW_HEIGHT_MIN)),
            exit_on_close_request: false,
            #[cfg(target_os = "linux")]
            platform_specific: iced::window::settings::PlatformSpecific {
                application_id: "modchat".to_string(),
                ..Default::default()
            },
            ..Default::default()
        })
        .run()
}

/// Main application state
struct ModchatApp {
    // -------------------------------------------------------------------------
    // Persistence
    // -------------------------------------------------------------------------
    /// Settings, keyset and stand-in service switches
    config: config::Config,

    // -------------------------------------------------------------------------
    // Session
    // -------------------------------------------------------------------------
    /// Client handle and access restriction
    session: Session,
    /// Query results and selection behind the chat panels
    surface: ChatSurface,

    // -------------------------------------------------------------------------
    // Forms
    // -------------------------------------------------------------------------
    /// Chat input text
    message_input: String,
    /// Validation error for the chat input
    message_error: Option<String>,
    /// Create chat dialog state
    create_chat: CreateChatForm,

    // -------------------------------------------------------------------------
    // UI State
    // -------------------------------------------------------------------------
    /// UI panel visibility toggles and filters
    ui_state: UiState,
    /// Blocking alerts, front one shown
    alerts: VecDeque<Alert>,
}

impl ModchatApp {
    /// Initialize the application
    ///
    /// Resolves the keyset and identity, builds the one client handle the
    /// session uses, and issues the first refresh of every query.
    fn new() -> (Self, Task<Message>) {
        let config = config::Config::load();

        let launch = launch::find_launch_url(std::env::args().skip(1)).and_then(|url| {
            launch::parse(&url)
                .inspect_err(|e| tracing::warn!(url = %url, error = %e, "ignoring launch URL"))
                .ok()
        });
        let identity = bootstrap::resolve_identity(
            launch.as_ref(),
            config.settings.default_user_id.as_deref(),
        );
        let keyset = Keyset::from_env(&config.settings.keyset);
        let session = Session::start(&keyset, identity.clone(), &config.settings.service);

        let mut app = Self::with_session(config, session, identity);
        let task = app.handle_refresh(Refresh::All);
        (app, task)
    }

    /// Fresh surface and forms around an existing session
    fn with_session(config: config::Config, session: Session, identity: UserId) -> Self {
        Self {
            config,
            session,
            surface: ChatSurface::new(identity),
            message_input: String::new(),
            message_error: None,
            create_chat: CreateChatForm::default(),
            ui_state: UiState::default(),
            alerts: VecDeque::new(),
        }
    }

    /// Process a message and update application state
    ///
    /// Central message dispatcher that routes messages to their handlers.
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            // Channel list
            Message::ChannelSelected(channel) => self.handle_channel_selected(channel),
            Message::ChannelsFilterChanged(filter) => self.handle_channels_filter_changed(filter),
            Message::LeaveChannel(channel) => self.handle_leave_channel(channel),
            Message::LeaveChannelResult(channel, result) => {
                self.handle_leave_channel_result(channel, result)
            }
            Message::ShowCreateChat => self.handle_show_create_chat(),

            // Create chat dialog
            Message::CloseCreateChat => self.handle_close_create_chat(),
            Message::CreateChatGroupNameChanged(name) => {
                self.handle_create_chat_group_name_changed(name)
            }
            Message::CreateChatResult(result) => self.handle_create_chat_result(result),
            Message::CreateChatSearchChanged(search) => {
                self.handle_create_chat_search_changed(search)
            }
            Message::CreateChatSubmit => self.handle_create_chat_submit(),
            Message::CreateChatUserToggled(user, selected) => {
                self.handle_create_chat_user_toggled(user, selected)
            }

            // Thread
            Message::MessageInputChanged(input) => self.handle_message_input_changed(input),
            Message::MessageSent(result) => self.handle_message_sent(result),
            Message::SendMessagePressed => self.handle_send_message_pressed(),
            Message::TypingSignalResult(result) => self.handle_typing_signal_result(result),

            // Panels
            Message::MembersFilterChanged(filter) => self.handle_members_filter_changed(filter),
            Message::ToggleChannels => self.handle_toggle_channels(),
            Message::ToggleMembers => self.handle_toggle_members(),
            Message::DismissAlert => self.handle_dismiss_alert(),
            Message::OpenUrl(url) => self.handle_open_url(url),

            // Queries
            Message::Refresh(refresh) => self.handle_refresh(refresh),
            Message::PresenceTick => self.handle_refresh(Refresh::Presence),
            Message::CurrentUserLoaded(generation, result) => {
                self.handle_current_user_loaded(generation, result)
            }
            Message::UsersLoaded(generation, result) => self.handle_users_loaded(generation, result),
            Message::MembershipsLoaded(generation, result) => {
                self.handle_memberships_loaded(generation, result)
            }
            Message::ChannelMembersLoaded {
                generation,
                channel,
                result,
            } => self.handle_channel_members_loaded(generation, channel, result),
            Message::PresenceLoaded(generation, result) => {
                self.handle_presence_loaded(generation, result)
            }
            Message::HistoryLoaded {
                generation,
                channel,
                result,
            } => self.handle_history_loaded(generation, channel, result),

            // Service
            Message::ServiceEvent(event) => self.handle_service_event(event),
            Message::SubscribeResult(channels, result) => {
                self.handle_subscribe_result(channels, result)
            }

            // Window
            Message::WindowCloseRequested(id) => {
                // Query window size, then save and close
                iced::window::size(id).map(move |size| Message::WindowSaveAndClose {
                    id,
                    width: size.width,
                    height: size.height,
                })
            }
            Message::WindowSaveAndClose { id, width, height } => {
                self.handle_window_save_and_close(id, width, height)
            }
        }
    }

    /// Set up subscriptions for window close requests, service events and
    /// the presence poll
    ///
    /// Service events and the poll only run while the chat surface shows.
    fn subscription(&self) -> Subscription<Message> {
        let mut subscriptions =
            vec![iced::window::close_requests().map(Message::WindowCloseRequested)];

        if self.session.screen() == Screen::Chat
            && let Some(client) = self.session.client()
        {
            subscriptions.push(Subscription::run_with(
                ServiceLink::new(client.clone()),
                network::service_events,
            ));
            subscriptions.push(
                iced::time::every(Duration::from_secs(PRESENCE_REFRESH_INTERVAL_SECS))
                    .map(|_| Message::PresenceTick),
            );
        }

        Subscription::batch(subscriptions)
    }

    /// Render the current application state to the UI
    ///
    /// Delegates to `views::main_layout()` for all rendering logic.
    fn view(&self) -> Element<'_, Message> {
        let settings = &self.config.settings;
        let config = ViewConfig {
            theme: self.theme(),
            screen: self.session.screen(),
            surface: &self.surface,
            ui_state: &self.ui_state,
            message_input: &self.message_input,
            message_error: self.message_error.as_deref(),
            create_chat: &self.create_chat,
            alert: self.alerts.front().copied(),
            chat_font_size: settings.chat_font_size(),
            show_timestamps: settings.show_timestamps,
            use_24_hour_time: settings.use_24_hour_time,
            show_seconds: settings.show_seconds,
            config_path: config::Config::config_path().map(|path| path.display().to_string()),
        };

        views::main_layout(config)
    }

    fn theme(&self) -> Theme {
        self.config.settings.theme.to_iced_theme()
    }
}
