//! Per-message context handed to handlers

use crate::application::errors::BotError;
use crate::domain::entities::{Channel, Guild, Message, User};
use crate::domain::traits::Bot;
use crate::infrastructure::llm::LLM;
use std::sync::Arc;

/// Read-only aggregate built fresh for every inbound message
///
/// Handlers act through the referenced platform handles (`bot`, `llm`);
/// the context itself is never mutated and not retained after dispatch.
#[derive(Clone)]
pub struct MessageContext {
    pub message: Message,
    pub bot: Arc<dyn Bot>,
    pub llm: Option<Arc<dyn LLM>>,
    /// Trimmed text content of the message
    pub content: String,
}

impl MessageContext {
    pub fn new(message: Message, bot: Arc<dyn Bot>, llm: Option<Arc<dyn LLM>>) -> Self {
        let content = message.content.trim().to_string();
        Self {
            message,
            bot,
            llm,
            content,
        }
    }

    pub fn author(&self) -> &User {
        &self.message.author
    }

    pub fn channel(&self) -> &Channel {
        &self.message.channel
    }

    pub fn guild(&self) -> Option<&Guild> {
        self.message.guild.as_ref()
    }

    /// Send a reply into the message's channel
    pub async fn reply(&self, text: &str) -> Result<String, BotError> {
        self.bot.send_message(&self.message.channel.id, text).await
    }
}
