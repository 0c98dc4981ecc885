//! Port definitions (interfaces) for the application layer
//!
//! Ports define the boundaries between the application and the outside
//! world. Adapters (implementations) live in the infrastructure and
//! presentation layers.

pub mod completion_provider;
pub mod session_observer;
