use crate::domain::model::{ApiConfig, GenerationContext};
use crate::utils::error::Result;
use async_trait::async_trait;

/// External documentation generator. Resolves once the generator has
/// finished writing into `config.out_path`.
#[async_trait]
pub trait DocGenerator: Send + Sync {
    async fn generate(&self, ctx: &GenerationContext, config: &ApiConfig) -> Result<()>;
}

/// Knobs for locating services and reading their configuration files.
pub trait DiscoveryProvider: Send + Sync {
    fn marker_key(&self) -> &str;
    fn config_marker(&self) -> &str;
    fn config_extension(&self) -> &str;
    fn fallback_module(&self) -> &str;
    fn anchor(&self) -> &str;
    fn source_extension(&self) -> &str;
    fn resources_dir(&self) -> &str;
    fn doc_dir(&self) -> &str;
}
