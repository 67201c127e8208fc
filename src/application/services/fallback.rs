//! LLM fallback responder
//!
//! Messages no handler consumed fall through here. Direct messages always
//! engage the LLM; guild messages only when the bot is @mentioned, with the
//! mention stripped from the prompt. Conversation history is kept per
//! channel and bounded.

use crate::application::errors::BotError;
use crate::application::messaging::{parser, MessageContext};
use crate::infrastructure::llm::LLMMessage;
use std::collections::HashMap;
use std::sync::Mutex;

/// Oldest history entries are dropped in user/assistant pairs past this size
const MAX_HISTORY: usize = 20;

/// Conversational responder backed by the context's LLM handle
pub struct FallbackResponder {
    system_prompt: String,
    temperature: f32,
    max_tokens: Option<u32>,
    history: Mutex<HashMap<String, Vec<LLMMessage>>>,
}

impl FallbackResponder {
    pub fn new(system_prompt: impl Into<String>, temperature: f32, max_tokens: Option<u32>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            temperature,
            max_tokens,
            history: Mutex::new(HashMap::new()),
        }
    }

    /// Respond to an unhandled message; returns whether a reply was sent
    pub async fn respond(&self, ctx: &MessageContext) -> Result<bool, BotError> {
        let Some(llm) = ctx.llm.as_ref() else {
            return Ok(false);
        };

        let info = ctx.bot.bot_info();
        let prompt = if ctx.message.is_direct() {
            ctx.content.clone()
        } else if parser::mentions(&ctx.content, &info.username) {
            parser::strip_mention(&ctx.content, &info.username)
        } else {
            return Ok(false);
        };

        // Mentioned without any actual text
        if prompt.is_empty() {
            return Ok(false);
        }

        let channel_id = ctx.message.channel.id.clone();

        let mut messages = vec![LLMMessage::system(&self.system_prompt)];
        {
            let mut history = self
                .history
                .lock()
                .map_err(|_| BotError::Internal("history lock poisoned".to_string()))?;
            let entries = history.entry(channel_id.clone()).or_default();
            while entries.len() > MAX_HISTORY {
                entries.drain(..2);
            }
            messages.extend(entries.iter().cloned());
        }
        messages.push(LLMMessage::user(&prompt));

        let response = llm
            .chat(messages, None, Some(self.temperature), self.max_tokens)
            .await
            .map_err(|e| BotError::Llm(e.to_string()))?;

        {
            let mut history = self
                .history
                .lock()
                .map_err(|_| BotError::Internal("history lock poisoned".to_string()))?;
            let entries = history.entry(channel_id).or_default();
            entries.push(LLMMessage::user(prompt));
            entries.push(LLMMessage::assistant(response.content.clone()));
        }

        for chunk in chunk_message(&response.content, ctx.bot.max_message_len()) {
            ctx.reply(&chunk).await?;
        }

        Ok(true)
    }
}

/// Split a reply into platform-sized chunks on char boundaries
fn chunk_message(text: &str, limit: usize) -> Vec<String> {
    if text.len() <= limit {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut buf = String::with_capacity(limit);

    for ch in text.chars() {
        if buf.len() + ch.len_utf8() > limit {
            chunks.push(std::mem::take(&mut buf));
        }
        buf.push(ch);
    }

    if !buf.is_empty() {
        chunks.push(buf);
    }

    chunks
}
