//! Message handlers organized by category

mod channels;
mod chat;
mod create_chat;
mod errors;
mod events;
mod refresh;
mod ui;

/// App with a chat session for `user` against an empty in-process service
#[cfg(test)]
fn app_for(user: &str) -> crate::ModchatApp {
    use modchat_common::{LocalService, LocalServiceSettings, UserId};

    let service = LocalService::new(LocalServiceSettings::default());
    let session = crate::bootstrap::Session::with_client(service.handle(UserId::new(user)));
    crate::ModchatApp::with_session(crate::config::Config::default(), session, UserId::new(user))
}
