//! Application services - Business logic orchestration

pub mod fallback;
pub mod message_service;

pub use fallback::FallbackResponder;
pub use message_service::MessageService;
