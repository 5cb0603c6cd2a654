//! Application-wide constants

/// Directory name under the platform config dir
pub const APP_DIR_NAME: &str = "modchat";

/// Settings file name
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Environment variable overriding the publish key
pub const ENV_PUBLISH_KEY: &str = "MODCHAT_PUBLISH_KEY";

/// Environment variable overriding the subscribe key
pub const ENV_SUBSCRIBE_KEY: &str = "MODCHAT_SUBSCRIBE_KEY";

/// Environment variable carrying the launch URL when none is passed as argument
pub const ENV_LAUNCH_URL: &str = "MODCHAT_URL";

/// Environment variable holding the log filter
pub const ENV_LOG_FILTER: &str = "MODCHAT_LOG";

/// Log filter used when `MODCHAT_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "modchat=info,modchat_common=info";

/// Dashboard where keysets are created
pub const KEYS_DASHBOARD_URL: &str = "https://dashboard.pubnub.com/";

/// Documentation for running chat clients with access management
pub const ACCESS_MANAGER_DOCS_URL: &str =
    "https://www.pubnub.com/docs/chat/components/react/access-manager";

/// Interval between presence refreshes, in seconds
pub const PRESENCE_REFRESH_INTERVAL_SECS: u64 = 10;
