//! Dispatcher semantics tests
//! Run with: cargo test --test dispatch_test

use async_trait::async_trait;
use reflex_bot::application::errors::{BotError, HandlerError};
use reflex_bot::application::messaging::{DispatchMode, Dispatcher, MessageContext};
use reflex_bot::domain::entities::{Channel, Message, User};
use reflex_bot::domain::traits::{Bot, BotInfo};
use reflex_bot::handlers::{Handler, HandlerLoader, HandlerRegistry};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Bot double that records outbound messages
struct RecordingBot {
    sent: Mutex<Vec<String>>,
}

impl RecordingBot {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
        })
    }

    fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Bot for RecordingBot {
    async fn start(&self) -> Result<(), BotError> {
        Ok(())
    }

    async fn send_message(&self, _channel_id: &str, text: &str) -> Result<String, BotError> {
        self.sent.lock().unwrap().push(text.to_string());
        Ok("msg-id".to_string())
    }

    fn bot_info(&self) -> BotInfo {
        BotInfo {
            id: "test".to_string(),
            name: "reflex".to_string(),
            username: "reflex".to_string(),
        }
    }
}

/// Handler that optionally replies and reports a fixed consumed flag
struct ReplyHandler {
    name: &'static str,
    consumes: bool,
    reply: Option<&'static str>,
}

#[async_trait]
impl Handler for ReplyHandler {
    fn name(&self) -> &str {
        self.name
    }

    async fn handle(&self, ctx: &MessageContext) -> Result<bool, HandlerError> {
        if let Some(reply) = self.reply {
            ctx.reply(reply).await?;
        }
        Ok(self.consumes)
    }
}

struct FailingHandler;

#[async_trait]
impl Handler for FailingHandler {
    fn name(&self) -> &str {
        "failing"
    }

    async fn handle(&self, _ctx: &MessageContext) -> Result<bool, HandlerError> {
        Err(HandlerError::failed("boom"))
    }
}

struct SlowHandler {
    delay: Duration,
}

#[async_trait]
impl Handler for SlowHandler {
    fn name(&self) -> &str {
        "slow"
    }

    async fn handle(&self, ctx: &MessageContext) -> Result<bool, HandlerError> {
        tokio::time::sleep(self.delay).await;
        ctx.reply("late").await?;
        Ok(true)
    }
}

fn empty_registry() -> Arc<HandlerRegistry> {
    let dir = std::env::temp_dir().join("reflex-bot-no-handlers");
    Arc::new(HandlerRegistry::new(HandlerLoader::new(dir)))
}

fn message_ctx(bot: Arc<RecordingBot>) -> MessageContext {
    let message = Message::new(User::new("user-1"), Channel::new("chan-1"), "hello");
    MessageContext::new(message, bot, None)
}

#[tokio::test]
async fn inclusive_mode_runs_every_handler() {
    let registry = empty_registry();
    registry
        .register(Arc::new(ReplyHandler {
            name: "h1",
            consumes: false,
            reply: None,
        }))
        .unwrap();
    registry
        .register(Arc::new(ReplyHandler {
            name: "h2",
            consumes: true,
            reply: Some("pong"),
        }))
        .unwrap();
    registry
        .register(Arc::new(ReplyHandler {
            name: "h3",
            consumes: true,
            reply: Some("also-pong"),
        }))
        .unwrap();

    let bot = RecordingBot::new();
    let dispatcher = Dispatcher::new(registry);
    let handled = dispatcher.dispatch(&message_ctx(bot.clone())).await;

    assert!(handled);
    assert_eq!(bot.sent(), vec!["pong", "also-pong"]);
}

#[tokio::test]
async fn first_match_mode_stops_at_first_consumer() {
    let registry = empty_registry();
    registry
        .register(Arc::new(ReplyHandler {
            name: "h1",
            consumes: false,
            reply: None,
        }))
        .unwrap();
    registry
        .register(Arc::new(ReplyHandler {
            name: "h2",
            consumes: true,
            reply: Some("pong"),
        }))
        .unwrap();
    registry
        .register(Arc::new(ReplyHandler {
            name: "h3",
            consumes: true,
            reply: Some("also-pong"),
        }))
        .unwrap();

    let bot = RecordingBot::new();
    let dispatcher = Dispatcher::new(registry).with_mode(DispatchMode::FirstMatch);
    let handled = dispatcher.dispatch(&message_ctx(bot.clone())).await;

    assert!(handled);
    assert_eq!(bot.sent(), vec!["pong"]);
}

#[tokio::test]
async fn handler_error_does_not_stop_dispatch() {
    let registry = empty_registry();
    registry.register(Arc::new(FailingHandler)).unwrap();
    registry
        .register(Arc::new(ReplyHandler {
            name: "after-failure",
            consumes: true,
            reply: Some("pong"),
        }))
        .unwrap();

    let bot = RecordingBot::new();
    let dispatcher = Dispatcher::new(registry);
    let handled = dispatcher.dispatch(&message_ctx(bot.clone())).await;

    assert!(handled);
    assert_eq!(bot.sent(), vec!["pong"]);
}

#[tokio::test]
async fn no_consumer_reports_unhandled() {
    let registry = empty_registry();
    registry
        .register(Arc::new(ReplyHandler {
            name: "h1",
            consumes: false,
            reply: None,
        }))
        .unwrap();

    let bot = RecordingBot::new();
    let dispatcher = Dispatcher::new(registry);

    assert!(!dispatcher.dispatch(&message_ctx(bot)).await);
}

#[tokio::test]
async fn empty_registry_reports_unhandled() {
    let bot = RecordingBot::new();
    let dispatcher = Dispatcher::new(empty_registry());

    assert!(!dispatcher.dispatch(&message_ctx(bot.clone())).await);
    assert!(bot.sent().is_empty());
}

#[tokio::test]
async fn dispatch_order_is_stable_across_messages() {
    let registry = empty_registry();
    for name in ["first", "second", "third"] {
        registry
            .register(Arc::new(ReplyHandler {
                name,
                consumes: false,
                reply: Some(name),
            }))
            .unwrap();
    }

    let bot = RecordingBot::new();
    let dispatcher = Dispatcher::new(registry);

    for _ in 0..3 {
        dispatcher.dispatch(&message_ctx(bot.clone())).await;
    }

    let expected: Vec<String> = ["first", "second", "third"]
        .iter()
        .cycle()
        .take(9)
        .map(|s| s.to_string())
        .collect();
    assert_eq!(bot.sent(), expected);
}

#[tokio::test]
async fn timed_out_handler_counts_as_failure() {
    let registry = empty_registry();
    registry
        .register(Arc::new(SlowHandler {
            delay: Duration::from_millis(200),
        }))
        .unwrap();
    registry
        .register(Arc::new(ReplyHandler {
            name: "fast",
            consumes: true,
            reply: Some("pong"),
        }))
        .unwrap();

    let bot = RecordingBot::new();
    let dispatcher = Dispatcher::new(registry).with_timeout(Duration::from_millis(50));
    let handled = dispatcher.dispatch(&message_ctx(bot.clone())).await;

    assert!(handled);
    assert_eq!(bot.sent(), vec!["pong"]);
}
