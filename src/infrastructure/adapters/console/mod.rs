//! Console adapter for development/testing

use crate::application::errors::BotError;
use crate::domain::traits::{Bot, BotInfo};
use async_trait::async_trait;
use std::io::Write;

/// Console bot adapter for local development
pub struct ConsoleAdapter {
    info: BotInfo,
}

impl ConsoleAdapter {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            info: BotInfo {
                id: "console".to_string(),
                name: name.clone(),
                username: name,
            },
        }
    }

    /// Read one line from stdin; `None` on EOF
    pub async fn read_line(&self, prompt: &str) -> Option<String> {
        print!("{}", prompt);
        let _ = std::io::stdout().flush();

        let mut input = String::new();
        let read = std::io::stdin().read_line(&mut input).ok()?;
        if read == 0 {
            return None;
        }
        Some(input.trim().to_string())
    }
}

#[async_trait]
impl Bot for ConsoleAdapter {
    async fn start(&self) -> Result<(), BotError> {
        tracing::info!("Starting console bot (dev mode)");
        Ok(())
    }

    async fn send_message(&self, _channel_id: &str, text: &str) -> Result<String, BotError> {
        println!("[BOT] {}", text);
        Ok("console_msg".to_string())
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}
