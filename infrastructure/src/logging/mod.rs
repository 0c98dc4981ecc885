//! Session logging: a machine-readable event stream.
//!
//! Provides [`JsonlSessionLogger`], a JSONL file writer that implements the
//! [`SessionObserver`](traitor_application::SessionObserver) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlSessionLogger;
