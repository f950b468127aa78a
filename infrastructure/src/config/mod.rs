//! Configuration file loading for agentgen
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. `AGENTGEN_*` environment variables
//! 3. Project root: `./agentgen.toml` or `./.agentgen.toml`
//! 4. Global: `$XDG_CONFIG_HOME/agentgen/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{FileConfig, FileGenerationConfig, FileOutputConfig};
pub use loader::ConfigLoader;
