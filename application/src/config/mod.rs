//! Application-level configuration.
//!
//! - [`SessionParams`]: pacing, turn limits, timeouts, retries and sampling

pub mod session_params;

pub use session_params::SessionParams;
