pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::CommandGenerator;
pub use config::toml_config::ToolConfig;
pub use crate::core::{
    aggregator::ModulePathAggregator, config_scanner::ConfigScanner, executor::DocExecutor,
    path_resolver::PathResolver,
};
pub use utils::error::{DocError, Result};
