//! Message input, sending and typing signals

use iced::Task;
use modchat_common::ServiceError;
use modchat_common::validators::{self, MessageError};

use crate::ModchatApp;
use crate::i18n::t;
use crate::types::Message;

impl ModchatApp {
    /// Chat input text changed
    pub fn handle_message_input_changed(&mut self, input: String) -> Task<Message> {
        self.message_input = input;
        self.message_error = None;
        self.typing_signals()
    }

    /// Send button pressed or Enter in the input
    pub fn handle_send_message_pressed(&mut self) -> Task<Message> {
        let Some(client) = self.session.client().cloned() else {
            return Task::none();
        };
        let Some(channel) = self.surface.selected_id().cloned() else {
            return Task::none();
        };

        let text = self.message_input.trim().to_string();
        if let Err(e) = validators::validate_message(&text) {
            self.message_error = match e {
                MessageError::Empty => None,
                MessageError::TooLong => Some(t("message-error-too-long")),
                MessageError::InvalidCharacters => Some(t("message-error-invalid")),
            };
            return Task::none();
        }

        self.message_input.clear();
        self.message_error = None;

        let publish = Task::perform(
            async move { client.publish(&channel, &text).await },
            Message::MessageSent,
        );
        Task::batch([publish, self.typing_signals()])
    }

    pub fn handle_message_sent(&mut self, result: Result<u64, ServiceError>) -> Task<Message> {
        match result {
            Ok(timetoken) => tracing::debug!(timetoken, "message published"),
            Err(e) => self.handle_service_error(&e),
        }
        Task::none()
    }

    /// Typing signals for the current input and selection
    ///
    /// Only transitions are sent, so repeated keystrokes stay silent.
    pub fn typing_signals(&mut self) -> Task<Message> {
        let Some(client) = self.session.client() else {
            return Task::none();
        };
        let input_empty = self.message_input.trim().is_empty();

        let tasks: Vec<Task<Message>> = self
            .surface
            .typing_transitions(input_empty)
            .into_iter()
            .map(|(channel, typing)| {
                let client = client.clone();
                Task::perform(
                    async move { client.signal_typing(&channel, typing).await },
                    Message::TypingSignalResult,
                )
            })
            .collect();
        Task::batch(tasks)
    }

    pub fn handle_typing_signal_result(&mut self, result: Result<(), ServiceError>) -> Task<Message> {
        if let Err(e) = result {
            self.handle_service_error(&e);
        }
        Task::none()
    }
}
