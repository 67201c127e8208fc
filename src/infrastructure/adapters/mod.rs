//! Platform adapters
//!
//! The chat platform client itself is an external collaborator; adapters
//! implement the `Bot` trait over it. Only the console adapter ships here.

pub mod console;

pub use console::ConsoleAdapter;
