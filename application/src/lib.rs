//! Application layer for turing-traitor
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use config::SessionParams;
pub use ports::{
    completion_provider::{
        CompletionProvider, CompletionRequest, GenerationParams, ProviderError, ResponseFormat,
    },
    session_observer::{CompositeObserver, NoObserver, SessionObserver},
};
pub use use_cases::generate_response::{GeneratedResponse, generate_response};
pub use use_cases::run_session::{RunSessionError, RunSessionInput, RunSessionUseCase};
