//! Infrastructure layer for turing-traitor
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: HTTP completion providers, configuration
//! file loading and the JSONL session log.

pub mod config;
pub mod logging;
pub mod providers;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileConfig, FileGameConfig, FileOutputConfig, FileProviderEndpoint,
    FileProvidersConfig, FileSessionConfig,
};
pub use logging::JsonlSessionLogger;
pub use providers::{
    ChatCompletionsAdapter, GeminiAdapter, ProviderAdapter, ProviderEndpoint, ProviderKind,
    RoutingProvider, build_adapters,
};
