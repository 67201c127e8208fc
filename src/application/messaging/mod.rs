//! Message handling - Context construction and handler dispatch

pub mod context;
pub mod dispatcher;
pub mod parser;

pub use context::MessageContext;
pub use dispatcher::{DispatchMode, Dispatcher};
pub use parser::MessageParser;
