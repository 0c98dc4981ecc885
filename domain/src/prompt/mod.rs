//! Prompt templates for participant instructions

pub mod template;

pub use template::{FALLBACK_RESPONSES, PromptTemplate};
