//! Auto-response handler system
//!
//! Handlers are loaded from shared libraries dropped into the handler
//! directory, or registered in code at startup. The registry owns the
//! ordered active set; the dispatcher walks it once per inbound message.

pub mod handler;
pub mod loader;
pub mod registry;

pub use handler::Handler;
pub use loader::{HandlerLoader, HandlerSource, HandlerUnit};
pub use registry::HandlerRegistry;
