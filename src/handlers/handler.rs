//! Handler trait definition
//!
//! A handler is one unit of auto-response logic. It receives the per-message
//! context and returns whether it consumed the message. Handlers are either
//! compiled into the binary and registered explicitly, or built as `cdylib`
//! crates dropped into the handler directory (see [`crate::handlers::loader`]
//! for the export contract).

use crate::application::errors::HandlerError;
use crate::application::messaging::MessageContext;
use async_trait::async_trait;

/// Core trait every handler implements
///
/// `handle` runs once per inbound message, sequentially with the other
/// handlers for that message. Side effects go through the context's bot
/// handle (e.g. `ctx.reply(..)`); the context itself is read-only.
#[async_trait]
pub trait Handler: Send + Sync {
    /// Unique identifier for the handler
    fn name(&self) -> &str;

    /// Human-readable description
    fn description(&self) -> &str {
        ""
    }

    /// Examine one message; return `Ok(true)` if this handler consumed it
    async fn handle(&self, ctx: &MessageContext) -> Result<bool, HandlerError>;
}
