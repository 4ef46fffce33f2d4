//! Configuration system for loading and merging settings.

mod file;
mod types;

pub use file::load_config;
pub use types::{CompileConfig, Config, RunConfig};
