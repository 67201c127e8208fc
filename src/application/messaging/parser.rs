//! Message parser - Builds structured messages and handles @mentions

use crate::domain::entities::{Channel, Guild, Message, User};
use once_cell::sync::Lazy;
use regex_lite::Regex;

static MENTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"@([A-Za-z0-9_]+)").unwrap());

/// Builds `Message` values for a platform adapter
pub struct MessageParser {
    platform: String,
}

impl MessageParser {
    pub fn new(platform: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
        }
    }

    pub fn parse(&self, author: User, channel: Channel, text: impl Into<String>) -> Message {
        Message::new(author, channel, text).with_platform(&self.platform)
    }

    pub fn parse_guild(
        &self,
        author: User,
        channel: Channel,
        guild: Guild,
        text: impl Into<String>,
    ) -> Message {
        self.parse(author, channel, text).with_guild(guild)
    }
}

/// True if `text` @mentions `username` (case-insensitive)
pub fn mentions(text: &str, username: &str) -> bool {
    MENTION.captures_iter(text).any(|caps| {
        caps.get(1)
            .map(|m| m.as_str().eq_ignore_ascii_case(username))
            .unwrap_or(false)
    })
}

/// Remove every @mention of `username` from `text` and trim the result
pub fn strip_mention(text: &str, username: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for caps in MENTION.captures_iter(text) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if name.as_str().eq_ignore_ascii_case(username) {
            out.push_str(&text[last..whole.start()]);
            last = whole.end();
        }
    }

    out.push_str(&text[last..]);
    out.trim().to_string()
}
