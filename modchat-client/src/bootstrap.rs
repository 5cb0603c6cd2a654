//! Credential and session bootstrap
//!
//! Startup reads the keyset and the identity, builds the one client handle
//! the application uses, and decides which top-level screen renders. The
//! handle is owned by [`Session`] and passed explicitly to whoever needs it.

use modchat_common::local::Seed;
use modchat_common::{ClientHandle, DEFAULT_USER_ID, LocalService, LocalServiceSettings, UserId};

use crate::config::settings::{KeysetSettings, ServiceSettings};
use crate::constants::{ENV_PUBLISH_KEY, ENV_SUBSCRIBE_KEY};
use crate::launch::LaunchUrl;

// =============================================================================
// Keyset
// =============================================================================

/// Publish and subscribe keys for the messaging service
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Keyset {
    pub publish_key: String,
    pub subscribe_key: String,
}

impl std::fmt::Debug for Keyset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Keyset")
            .field("publish_key", &!self.publish_key.is_empty())
            .field("subscribe_key", &!self.subscribe_key.is_empty())
            .finish()
    }
}

impl Keyset {
    /// Combine environment values with configured ones
    ///
    /// A non-empty environment value wins over the config file.
    pub fn resolve(
        env_publish: Option<String>,
        env_subscribe: Option<String>,
        configured: &KeysetSettings,
    ) -> Self {
        fn pick(env: Option<String>, configured: &str) -> String {
            env.map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| configured.trim().to_string())
        }

        Self {
            publish_key: pick(env_publish, &configured.publish_key),
            subscribe_key: pick(env_subscribe, &configured.subscribe_key),
        }
    }

    /// Read the keyset from the process environment and the config file
    pub fn from_env(configured: &KeysetSettings) -> Self {
        Self::resolve(
            std::env::var(ENV_PUBLISH_KEY).ok(),
            std::env::var(ENV_SUBSCRIBE_KEY).ok(),
            configured,
        )
    }

    /// Both keys are present
    pub fn is_complete(&self) -> bool {
        !self.publish_key.is_empty() && !self.subscribe_key.is_empty()
    }
}

// =============================================================================
// Identity
// =============================================================================

/// Pick the identity: launch URL first, then config, then the demo default
pub fn resolve_identity(launch: Option<&LaunchUrl>, configured: Option<&str>) -> UserId {
    launch
        .and_then(LaunchUrl::identity)
        .or_else(|| {
            configured
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(UserId::new)
        })
        .unwrap_or_else(|| UserId::new(DEFAULT_USER_ID))
}

// =============================================================================
// Session
// =============================================================================

/// Top-level screen, decided in order of precedence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Keys are missing
    KeysRequired,
    /// The service denied access; this client does not manage grants
    AccessManagerEnabled,
    /// Chat surface
    Chat,
}

/// Process-wide session state
pub struct Session {
    client: Option<ClientHandle>,
    /// Set by the first access-denied status; never reset
    access_manager_enabled: bool,
}

impl Session {
    /// Build the client handle when the keyset is complete
    pub fn start(keyset: &Keyset, identity: UserId, service: &ServiceSettings) -> Self {
        if !keyset.is_complete() {
            tracing::info!("messaging keys missing, showing configuration notice");
            return Self {
                client: None,
                access_manager_enabled: false,
            };
        }

        let settings = LocalServiceSettings::from(service);
        let service = match Seed::demo() {
            Ok(seed) => LocalService::with_seed(settings, seed),
            Err(e) => {
                tracing::warn!(error = %e, "demo directory unavailable, starting empty");
                LocalService::new(settings)
            }
        };

        tracing::info!(user = %identity, "session started");
        Self::with_client(service.handle(identity))
    }

    /// A session around an existing handle
    pub fn with_client(client: ClientHandle) -> Self {
        Self {
            client: Some(client),
            access_manager_enabled: false,
        }
    }

    pub fn client(&self) -> Option<&ClientHandle> {
        self.client.as_ref()
    }

    pub fn access_manager_enabled(&self) -> bool {
        self.access_manager_enabled
    }

    /// Record an access-control restriction
    ///
    /// Returns true the first time it is recorded.
    pub fn restrict(&mut self) -> bool {
        let first = !self.access_manager_enabled;
        self.access_manager_enabled = true;
        first
    }

    pub fn screen(&self) -> Screen {
        if self.client.is_none() {
            Screen::KeysRequired
        } else if self.access_manager_enabled {
            Screen::AccessManagerEnabled
        } else {
            Screen::Chat
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::launch;

    fn keys(publish: &str, subscribe: &str) -> KeysetSettings {
        KeysetSettings {
            publish_key: publish.to_string(),
            subscribe_key: subscribe.to_string(),
        }
    }

    #[test]
    fn test_keyset_env_wins_over_config() {
        let keyset = Keyset::resolve(
            Some("pub-env".to_string()),
            None,
            &keys("pub-cfg", "sub-cfg"),
        );
        assert_eq!(keyset.publish_key, "pub-env");
        assert_eq!(keyset.subscribe_key, "sub-cfg");
        assert!(keyset.is_complete());
    }

    #[test]
    fn test_empty_env_value_counts_as_missing() {
        let keyset = Keyset::resolve(Some("  ".to_string()), Some(String::new()), &keys("", ""));
        assert!(!keyset.is_complete());

        let keyset = Keyset::resolve(Some("  ".to_string()), None, &keys("pub-cfg", ""));
        assert_eq!(keyset.publish_key, "pub-cfg");
        assert!(!keyset.is_complete());
    }

    #[test]
    fn test_keyset_debug_hides_values() {
        let keyset = Keyset::resolve(None, None, &keys("pub-secret", "sub-secret"));
        let debug = format!("{keyset:?}");
        assert!(!debug.contains("secret"));
    }

    #[test]
    fn test_identity_precedence() {
        let url = launch::parse("modchat://open#?uuid=alice").unwrap();
        assert_eq!(
            resolve_identity(Some(&url), Some("bob")),
            UserId::new("alice")
        );

        let bare = launch::parse("modchat://open").unwrap();
        assert_eq!(resolve_identity(Some(&bare), Some("bob")), UserId::new("bob"));
        assert_eq!(
            resolve_identity(None, Some("  ")),
            UserId::new(DEFAULT_USER_ID)
        );
        assert_eq!(resolve_identity(None, None), UserId::new(DEFAULT_USER_ID));
    }

    #[test]
    fn test_missing_keys_route_to_notice() {
        let session = Session::start(
            &Keyset::default(),
            UserId::new("alice"),
            &ServiceSettings::default(),
        );
        assert!(session.client().is_none());
        assert_eq!(session.screen(), Screen::KeysRequired);
    }

    #[test]
    fn test_screen_precedence() {
        let keyset = Keyset::resolve(None, None, &keys("pub", "sub"));
        let mut session = Session::start(&keyset, UserId::new("alice"), &ServiceSettings::default());
        assert_eq!(session.screen(), Screen::Chat);
        assert_eq!(
            session.client().map(|c| c.user_id().clone()),
            Some(UserId::new("alice"))
        );

        assert!(session.restrict());
        assert!(!session.restrict());
        assert!(session.access_manager_enabled());
        assert_eq!(session.screen(), Screen::AccessManagerEnabled);
    }

    #[test]
    fn test_keys_notice_wins_over_access_manager() {
        let mut session = Session::start(
            &Keyset::default(),
            UserId::new("alice"),
            &ServiceSettings::default(),
        );
        session.restrict();
        assert_eq!(session.screen(), Screen::KeysRequired);
    }
}
