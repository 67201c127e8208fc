//! Message service - The event-handling layer around dispatch

use super::fallback::FallbackResponder;
use crate::application::errors::BotError;
use crate::application::messaging::{Dispatcher, MessageContext};
use crate::domain::entities::Message;
use crate::domain::traits::Bot;
use crate::infrastructure::llm::LLM;
use std::sync::Arc;

/// Processes inbound messages: dispatch first, then the LLM fallback
pub struct MessageService {
    bot: Arc<dyn Bot>,
    llm: Option<Arc<dyn LLM>>,
    dispatcher: Dispatcher,
    fallback: FallbackResponder,
}

impl MessageService {
    pub fn new(
        bot: Arc<dyn Bot>,
        llm: Option<Arc<dyn LLM>>,
        dispatcher: Dispatcher,
        fallback: FallbackResponder,
    ) -> Self {
        Self {
            bot,
            llm,
            dispatcher,
            fallback,
        }
    }

    /// Process one inbound message; returns whether anything responded
    pub async fn process(&self, message: Message) -> Result<bool, BotError> {
        // Never react to the bot's own messages
        if message.author.is_bot {
            tracing::debug!("Ignoring self-authored message {}", message.id);
            return Ok(false);
        }

        let ctx = MessageContext::new(message, self.bot.clone(), self.llm.clone());

        if self.dispatcher.dispatch(&ctx).await {
            return Ok(true);
        }

        match self.fallback.respond(&ctx).await {
            Ok(replied) => Ok(replied),
            Err(e) => {
                tracing::error!("Fallback responder failed: {}", e);
                let _ = ctx.reply("Sorry, I ran into an error handling that.").await;
                Ok(false)
            }
        }
    }
}
