//! Completion-call framing
//!
//! - [`entities`]: role-tagged chat messages
//! - [`history`]: converts the shared log into one participant's view

pub mod entities;
pub mod history;

pub use entities::{ChatMessage, ChatRole};
pub use history::build_history;
