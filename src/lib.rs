//! reflex-bot - auto-response framework for chat bots
//!
//! Handler units dropped into a directory (or registered at compile time)
//! are invoked in order for every inbound message; each decides whether it
//! consumed the message. Unhandled messages fall through to an optional
//! LLM-backed responder.

pub mod application;
pub mod domain;
pub mod handlers;
pub mod infrastructure;
