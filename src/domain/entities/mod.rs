//! Domain entities - Core business objects with no external dependencies

pub mod channel;
pub mod message;
pub mod user;

pub use channel::{Channel, Guild};
pub use message::Message;
pub use user::User;
