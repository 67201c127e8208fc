use crate::application::errors::BotError;
use async_trait::async_trait;

/// Bot trait - abstraction for messaging platform adapters
#[async_trait]
pub trait Bot: Send + Sync {
    /// Start the bot and begin listening for messages
    async fn start(&self) -> Result<(), BotError>;

    /// Send a message to a channel, returning the platform message id
    async fn send_message(&self, channel_id: &str, text: &str) -> Result<String, BotError>;

    /// Maximum length of a single outbound message; longer replies are chunked
    fn max_message_len(&self) -> usize {
        2000
    }

    /// Get bot info
    fn bot_info(&self) -> BotInfo;
}

/// Bot information
#[derive(Debug, Clone)]
pub struct BotInfo {
    pub id: String,
    pub name: String,
    pub username: String,
}
