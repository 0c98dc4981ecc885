//! Configuration file loading for turing-traitor
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./traitor.toml` or `./.traitor.toml`
//! 3. Global: `$XDG_CONFIG_HOME/turing-traitor/config.toml`
//! 4. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileConfig, FileGameConfig, FileOutputConfig, FileProviderEndpoint, FileProvidersConfig,
    FileSessionConfig,
};
pub use loader::ConfigLoader;
