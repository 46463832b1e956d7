pub mod aggregator;
pub mod api_config;
pub mod config_scanner;
pub mod executor;
pub mod output_watcher;
pub mod path_resolver;

pub use crate::domain::model::{
    ApiConfig, ConfigDeclaration, GenerationContext, GenerationOutcome, ServiceLocation,
    SourcePath,
};
pub use crate::domain::ports::{DiscoveryProvider, DocGenerator};
pub use crate::utils::error::Result;
