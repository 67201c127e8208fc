//! Message dispatcher - Runs every registered handler over one message

use super::context::MessageContext;
use crate::handlers::HandlerRegistry;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// What to do once a handler reports it consumed the message
///
/// `Inclusive` keeps going so multiple handlers can process the same
/// message; `FirstMatch` stops at the first consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DispatchMode {
    #[default]
    Inclusive,
    FirstMatch,
}

/// Walks the registry for each inbound message
pub struct Dispatcher {
    registry: Arc<HandlerRegistry>,
    mode: DispatchMode,
    timeout: Option<Duration>,
}

impl Dispatcher {
    pub fn new(registry: Arc<HandlerRegistry>) -> Self {
        Self {
            registry,
            mode: DispatchMode::default(),
            timeout: None,
        }
    }

    pub fn with_mode(mut self, mode: DispatchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Bound each handler invocation; expiry counts as a handler failure
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Invoke every active handler for one message, in registry order
    ///
    /// Handlers run sequentially; a failing or timed-out handler is logged
    /// and counted as not-handled, and the remaining handlers still run.
    /// Returns whether any handler consumed the message.
    pub async fn dispatch(&self, ctx: &MessageContext) -> bool {
        let units = self.registry.snapshot();
        let mut handled = false;

        for unit in units.iter() {
            let invocation = unit.handler().handle(ctx);

            let result = match self.timeout {
                Some(limit) => match tokio::time::timeout(limit, invocation).await {
                    Ok(result) => result,
                    Err(_) => {
                        tracing::warn!(
                            "Handler '{}' timed out after {:?}",
                            unit.name(),
                            limit
                        );
                        continue;
                    }
                },
                None => invocation.await,
            };

            match result {
                Ok(true) => {
                    tracing::debug!("Handler '{}' consumed message", unit.name());
                    handled = true;
                    if self.mode == DispatchMode::FirstMatch {
                        break;
                    }
                }
                Ok(false) => {}
                Err(e) => {
                    tracing::error!("Handler '{}' failed: {}", unit.name(), e);
                }
            }
        }

        handled
    }
}
