//! UI panel management and toggles

use iced::Task;

use crate::ModchatApp;
use crate::types::{Message, Refresh};

impl ModchatApp {
    // ==================== Panels ====================

    /// Hamburger button in the thread header or the channel panel
    pub fn handle_toggle_channels(&mut self) -> Task<Message> {
        self.ui_state.show_channels = !self.ui_state.show_channels;
        Task::none()
    }

    /// Member count in the thread header, or the member panel close button
    pub fn handle_toggle_members(&mut self) -> Task<Message> {
        self.ui_state.show_members = !self.ui_state.show_members;
        if self.ui_state.show_members {
            // Presence may be up to one poll interval old
            return self.handle_refresh(Refresh::Presence);
        }
        Task::none()
    }

    pub fn handle_channels_filter_changed(&mut self, filter: String) -> Task<Message> {
        self.ui_state.channels_filter = filter;
        Task::none()
    }

    pub fn handle_members_filter_changed(&mut self, filter: String) -> Task<Message> {
        self.ui_state.members_filter = filter;
        Task::none()
    }

    // ==================== Alerts ====================

    /// OK pressed on the front alert
    pub fn handle_dismiss_alert(&mut self) -> Task<Message> {
        self.alerts.pop_front();
        Task::none()
    }

    // ==================== Links ====================

    /// Open a URL in the default browser
    pub fn handle_open_url(&mut self, url: String) -> Task<Message> {
        if let Err(e) = open::that(&url) {
            tracing::warn!(url = %url, error = %e, "failed to open link");
        }
        Task::none()
    }

    // ==================== Window ====================

    /// Persist the window size, then close
    pub fn handle_window_save_and_close(
        &mut self,
        id: iced::window::Id,
        width: f32,
        height: f32,
    ) -> Task<Message> {
        self.config.settings.window_width = width;
        self.config.settings.window_height = height;
        if let Err(e) = self.config.save() {
            tracing::warn!(error = %e, "failed to save config");
        }
        iced::window::close(id)
    }
}
