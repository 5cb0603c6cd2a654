//! Channel selection and leaving

use iced::Task;
use modchat_common::{Channel, ChannelId, ServiceError};

use crate::ModchatApp;
use crate::types::{Message, Refresh};

impl ModchatApp {
    // ==================== Selection ====================

    /// Conversation clicked in the channel panel
    pub fn handle_channel_selected(&mut self, channel: Channel) -> Task<Message> {
        if !self.surface.select(channel) {
            return Task::none();
        }
        self.on_selection_changed()
    }

    /// Reload everything scoped to the selected channel
    ///
    /// Also moves a pending typing signal along with the draft.
    pub fn on_selection_changed(&mut self) -> Task<Message> {
        Task::batch([
            self.handle_refresh(Refresh::ChannelMembers),
            self.handle_refresh(Refresh::History),
            self.handle_refresh(Refresh::Presence),
            self.typing_signals(),
            self.sync_subscription(),
        ])
    }

    // ==================== Leave ====================

    /// Leave button pressed on a conversation
    pub fn handle_leave_channel(&mut self, channel: ChannelId) -> Task<Message> {
        let Some(client) = self.session.client().cloned() else {
            return Task::none();
        };

        tracing::info!(channel = %channel, "leaving channel");
        let requested = channel.clone();
        Task::perform(
            async move { client.remove_memberships(&[requested]).await },
            move |result| Message::LeaveChannelResult(channel, result),
        )
    }

    /// Refresh memberships, then move the selection off the left channel
    ///
    /// The reassignment reads the membership list held right now, which may
    /// still contain the left channel; the refreshed list re-validates it.
    pub fn handle_leave_channel_result(
        &mut self,
        channel: ChannelId,
        result: Result<(), ServiceError>,
    ) -> Task<Message> {
        if let Err(e) = result {
            self.handle_service_error(&e);
            return Task::none();
        }

        let refresh = self.handle_refresh(Refresh::Memberships);
        match self.surface.reassign_after_leave(&channel) {
            Some(next) => {
                tracing::debug!(left = %channel, selected = %next, "selection reassigned");
                Task::batch([refresh, self.on_selection_changed()])
            }
            None => refresh,
        }
    }
}

#[cfg(test)]
mod tests {
    use modchat_common::{Membership, Operation, StatusCategory};

    use super::*;

    fn load_memberships(app: &mut ModchatApp, generation: u64, ids: &[&str]) {
        let memberships = ids
            .iter()
            .map(|id| Membership::new(Channel::bare(*id)))
            .collect();
        let _ = app.handle_memberships_loaded(generation, Ok(memberships));
    }

    #[test]
    fn test_leaving_selected_channel_moves_selection() {
        let mut app = super::super::app_for("bob");
        let first = app.surface.memberships.begin();
        load_memberships(&mut app, first, &["direct.alice@bob", "group.team"]);
        let _ = app.handle_channel_selected(Channel::bare("group.team"));

        // Reassigned from the list held before the refetch
        let _ = app.handle_leave_channel_result(ChannelId::new("group.team"), Ok(()));
        assert_eq!(
            app.surface.selected_id(),
            Some(&ChannelId::new("direct.alice@bob"))
        );

        // The refetch issued by the leave no longer lists the channel
        let refetch = first + 1;
        load_memberships(&mut app, refetch, &["direct.alice@bob"]);
        assert_eq!(
            app.surface.selected_id(),
            Some(&ChannelId::new("direct.alice@bob"))
        );
    }

    #[test]
    fn test_leaving_only_channel_revalidates_on_refetch() {
        let mut app = super::super::app_for("bob");
        let first = app.surface.memberships.begin();
        load_memberships(&mut app, first, &["group.team"]);

        let _ = app.handle_leave_channel_result(ChannelId::new("group.team"), Ok(()));
        assert_eq!(app.surface.selected_id(), Some(&ChannelId::new("group.team")));

        load_memberships(&mut app, first + 1, &["group.other"]);
        assert_eq!(app.surface.selected_id(), Some(&ChannelId::new("group.other")));
    }

    #[test]
    fn test_failed_leave_keeps_selection() {
        let mut app = super::super::app_for("bob");
        let first = app.surface.memberships.begin();
        load_memberships(&mut app, first, &["direct.alice@bob", "group.team"]);
        let _ = app.handle_channel_selected(Channel::bare("group.team"));

        let error = ServiceError::new(
            Some(Operation::RemoveMemberships),
            StatusCategory::NetworkIssues,
            "timeout",
        );
        let _ = app.handle_leave_channel_result(ChannelId::new("group.team"), Err(error));
        assert_eq!(app.surface.selected_id(), Some(&ChannelId::new("group.team")));
        assert!(app.alerts.is_empty());
    }
}
