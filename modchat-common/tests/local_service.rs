//! Integration tests for the in-process messaging service
//!
//! These exercise the service only through the `MessagingClient` contract,
//! the same way the desktop client uses it.

use modchat_common::{
    Channel, ChannelId, ClientHandle, LocalService, LocalServiceSettings, MessagingClient,
    Operation, ServiceEvent, StatusCategory, User, UserId,
};

// ============================================================================
// Helper Functions
// ============================================================================

/// A service with alice, bob and carol in the directory
async fn three_user_service(settings: LocalServiceSettings) -> LocalService {
    let service = LocalService::new(settings);
    service.upsert_user(User::new("alice", "Alice")).await;
    service.upsert_user(User::new("bob", "Bob")).await;
    service.upsert_user(User::new("carol", "Carol")).await;
    service
}

fn handle(service: &LocalService, user: &str) -> ClientHandle {
    service.handle(UserId::new(user))
}

fn moderated() -> LocalServiceSettings {
    LocalServiceSettings {
        access_manager: false,
        blocked_words: vec!["darn".to_string()],
    }
}

// ============================================================================
// Directory and memberships
// ============================================================================

#[tokio::test]
async fn test_directory_and_user_lookup() {
    let service = three_user_service(LocalServiceSettings::default()).await;
    let bob = handle(&service, "bob");

    let users = bob.fetch_users().await.unwrap();
    let names: Vec<_> = users.iter().map(|u| u.display_name()).collect();
    assert_eq!(names, ["Alice", "Bob", "Carol"]);

    let alice = bob.fetch_user(&UserId::new("alice")).await.unwrap();
    assert_eq!(alice.map(|u| u.display_name().to_string()), Some("Alice".into()));
    assert!(bob.fetch_user(&UserId::new("nobody")).await.unwrap().is_none());
}

#[tokio::test]
async fn test_memberships_keep_service_order() {
    let service = three_user_service(LocalServiceSettings::default()).await;
    let bob = handle(&service, "bob");

    let direct = ChannelId::direct(&UserId::new("alice"), &UserId::new("bob"));
    let team = ChannelId::group("team");
    bob.set_channel_metadata(Channel::named(team.clone(), "Team"))
        .await
        .unwrap();
    bob.set_memberships(&[direct.clone(), team.clone()])
        .await
        .unwrap();

    let joined = bob.fetch_memberships().await.unwrap();
    let ids: Vec<_> = joined.iter().map(|m| m.id().clone()).collect();
    assert_eq!(ids, vec![direct.clone(), team.clone()]);

    // Metadata is attached where it exists, bare otherwise
    assert_eq!(joined[0].channel.name, None);
    assert_eq!(joined[1].channel.name.as_deref(), Some("Team"));

    // Joining again does not duplicate
    bob.set_memberships(&[team.clone()]).await.unwrap();
    assert_eq!(bob.fetch_memberships().await.unwrap().len(), 2);

    bob.remove_memberships(&[direct]).await.unwrap();
    let ids: Vec<_> = bob
        .fetch_memberships()
        .await
        .unwrap()
        .iter()
        .map(|m| m.id().clone())
        .collect();
    assert_eq!(ids, vec![team]);
}

#[tokio::test]
async fn test_channel_members_roster() {
    let service = three_user_service(LocalServiceSettings::default()).await;
    let alice = handle(&service, "alice");
    let team = ChannelId::group("team");

    alice
        .set_channel_members(&team, &[UserId::new("carol"), UserId::new("alice")])
        .await
        .unwrap();

    let roster: Vec<_> = alice
        .fetch_channel_members(&team)
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.user.id)
        .collect();
    // Directory order, not insertion order
    assert_eq!(roster, vec![UserId::new("alice"), UserId::new("carol")]);

    // Carol sees the channel among her memberships
    let carol = handle(&service, "carol");
    assert_eq!(carol.fetch_memberships().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_channel_members_rejects_unknown_user() {
    let service = three_user_service(LocalServiceSettings::default()).await;
    let alice = handle(&service, "alice");

    let err = alice
        .set_channel_members(&ChannelId::group("x"), &[UserId::new("mallory")])
        .await
        .unwrap_err();
    assert_eq!(err.operation, Some(Operation::SetChannelMembers));
    assert_eq!(err.status_code, Some(400));
}

// ============================================================================
// Presence
// ============================================================================

#[tokio::test]
async fn test_presence_follows_subscriptions() {
    let service = three_user_service(LocalServiceSettings::default()).await;
    let alice = handle(&service, "alice");
    let bob = handle(&service, "bob");
    let team = ChannelId::group("team");
    let other = ChannelId::group("other");

    alice.subscribe(&[team.clone()]).await.unwrap();
    bob.subscribe(&[team.clone(), other.clone()]).await.unwrap();

    let snapshot = alice
        .fetch_presence(&[team.clone(), other.clone()])
        .await
        .unwrap();
    assert_eq!(snapshot.occupancy(&team), 2);
    assert!(snapshot.is_present(&other, &UserId::new("bob")));
    assert!(!snapshot.is_present(&other, &UserId::new("alice")));

    bob.subscribe(&[]).await.unwrap();
    let snapshot = alice.fetch_presence(&[team.clone()]).await.unwrap();
    assert!(!snapshot.is_present(&team, &UserId::new("bob")));
}

#[tokio::test]
async fn test_subscribe_broadcasts_presence_changes() {
    let service = three_user_service(LocalServiceSettings::default()).await;
    let alice = handle(&service, "alice");
    let mut events = alice.events();
    let team = ChannelId::group("team");

    alice.subscribe(&[team.clone()]).await.unwrap();
    assert_eq!(
        events.recv().await.unwrap(),
        ServiceEvent::PresenceChanged {
            channel: team.clone(),
            user: UserId::new("alice"),
            present: true,
        }
    );

    alice.subscribe(&[]).await.unwrap();
    assert_eq!(
        events.recv().await.unwrap(),
        ServiceEvent::PresenceChanged {
            channel: team,
            user: UserId::new("alice"),
            present: false,
        }
    );
}

// ============================================================================
// Messages and moderation
// ============================================================================

#[tokio::test]
async fn test_publish_and_history() {
    let service = three_user_service(moderated()).await;
    let alice = handle(&service, "alice");
    let team = ChannelId::group("team");
    let mut events = alice.events();

    let mut tokens = Vec::new();
    for i in 0..30 {
        tokens.push(alice.publish(&team, &format!("message {i}")).await.unwrap());
    }
    assert!(tokens.windows(2).all(|w| w[0] < w[1]));

    match events.recv().await.unwrap() {
        ServiceEvent::Message(message) => assert_eq!(message.text, "message 0"),
        other => panic!("unexpected event: {other:?}"),
    }

    let history = alice
        .fetch_history(&team, modchat_common::HISTORY_FETCH_COUNT)
        .await
        .unwrap();
    assert_eq!(history.len(), 25);
    assert_eq!(history.first().map(|m| m.text.as_str()), Some("message 5"));
    assert_eq!(history.last().map(|m| m.text.as_str()), Some("message 29"));
}

#[tokio::test]
async fn test_blocked_publish_is_moderation_rejection() {
    let service = three_user_service(moderated()).await;
    let alice = handle(&service, "alice");
    let team = ChannelId::group("team");

    let err = alice.publish(&team, "oh DARN").await.unwrap_err();
    assert!(err.is_moderation_rejection());
    assert_eq!(err.operation, Some(Operation::Publish));
    assert_eq!(err.status_code, Some(403));

    // Nothing was stored
    assert!(alice.fetch_history(&team, 25).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_typing_signal_is_broadcast() {
    let service = three_user_service(LocalServiceSettings::default()).await;
    let alice = handle(&service, "alice");
    let bob = handle(&service, "bob");
    let mut events = bob.events();
    let team = ChannelId::group("team");

    alice.signal_typing(&team, true).await.unwrap();
    assert_eq!(
        events.recv().await.unwrap(),
        ServiceEvent::TypingChanged {
            channel: team,
            user: UserId::new("alice"),
            typing: true,
        }
    );
}

// ============================================================================
// Access management
// ============================================================================

#[tokio::test]
async fn test_access_manager_denies_and_reports_status() {
    let settings = LocalServiceSettings {
        access_manager: true,
        blocked_words: Vec::new(),
    };
    let service = three_user_service(settings).await;
    let alice = handle(&service, "alice");
    let mut events = alice.events();

    let err = alice.fetch_memberships().await.unwrap_err();
    assert_eq!(err.category, StatusCategory::AccessDenied);
    assert_eq!(err.status_code, Some(403));

    match events.recv().await.unwrap() {
        ServiceEvent::Status(status) => {
            assert!(status.is_access_denied());
            assert_eq!(status.operation, Some(Operation::GetMemberships));
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn test_demo_seed_memberships_for_default_user() {
    let seed = modchat_common::local::Seed::demo().unwrap();
    let service = LocalService::with_seed(LocalServiceSettings::default(), seed);
    let client = handle(&service, modchat_common::DEFAULT_USER_ID);

    let joined = client.fetch_memberships().await.unwrap();
    assert!(joined.iter().all(|m| m.id().is_conversation()));
    assert!(!joined.is_empty());

    let first = joined[0].id().clone();
    assert!(!client.fetch_history(&first, 25).await.unwrap().is_empty());
}
