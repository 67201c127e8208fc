//! LLM integration - Provider seam for the fallback responder

pub mod config;
pub mod providers;
pub mod traits;


pub use config::LLMConfig;
pub use providers::GroqProvider;
pub use traits::{LLMError, LLMMessage, LLMResponse, LLMResult, LLMUsage, LLM};
