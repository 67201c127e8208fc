use super::{Channel, Guild, User};
use chrono::{DateTime, Utc};

/// Represents an inbound chat message
#[derive(Debug, Clone)]
pub struct Message {
    pub id: String,
    pub author: User,
    pub channel: Channel,
    pub guild: Option<Guild>,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub platform: String,
    pub raw: Option<serde_json::Value>,
}

impl Message {
    pub fn new(author: User, channel: Channel, content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            author,
            channel,
            guild: None,
            content: content.into(),
            timestamp: Utc::now(),
            platform: "unknown".to_string(),
            raw: None,
        }
    }

    pub fn with_guild(mut self, guild: Guild) -> Self {
        self.guild = Some(guild);
        self
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = platform.into();
        self
    }

    pub fn with_raw(mut self, raw: serde_json::Value) -> Self {
        self.raw = Some(raw);
        self
    }

    /// True for direct (one-to-one) channels, which belong to no guild
    pub fn is_direct(&self) -> bool {
        self.guild.is_none()
    }
}
