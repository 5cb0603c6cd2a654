//! Initial data for the in-process service

use std::collections::HashMap;

use serde::Deserialize;

use crate::ids::{ChannelId, UserId};
use crate::model::{Channel, User};

/// Demo directory, channels and memberships bundled with the crate
const DEMO_SEED: &str = include_str!("../../data/seed.json");

/// A message present in history before the service starts
#[derive(Debug, Clone, Deserialize)]
pub struct SeedMessage {
    pub channel: ChannelId,
    pub publisher: UserId,
    pub text: String,
}

/// Initial service contents
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Seed {
    pub users: Vec<User>,
    #[serde(default)]
    pub channels: Vec<Channel>,
    /// Channel ids joined by each user, in join order
    #[serde(default)]
    pub memberships: HashMap<UserId, Vec<ChannelId>>,
    #[serde(default)]
    pub messages: Vec<SeedMessage>,
}

impl Seed {
    /// The bundled demo data
    pub fn demo() -> Result<Self, serde_json::Error> {
        serde_json::from_str(DEMO_SEED)
    }
}
