use crate::config::toml_config::ToolConfig;
use crate::core::aggregator::ModulePathAggregator;
use crate::core::output_watcher::OutputWatcher;
use crate::core::path_resolver::PathResolver;
use crate::domain::model::{ApiConfig, GenerationContext, GenerationOutcome, ServiceLocation};
use crate::domain::ports::DocGenerator;
use crate::utils::error::{DocError, Result};
use chrono::Local;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// What would be handed to the generator, computed without touching the
/// output directory.
#[derive(Debug, Clone)]
pub struct GenerationPlan {
    pub location: ServiceLocation,
    pub config: ApiConfig,
    pub expected_output: PathBuf,
}

pub struct DocExecutor<G: DocGenerator> {
    generator: G,
    settings: Arc<ToolConfig>,
}

impl<G: DocGenerator> DocExecutor<G> {
    pub fn new(generator: G, settings: ToolConfig) -> Self {
        Self {
            generator,
            settings: Arc::new(settings),
        }
    }

    /// Resolves the service layout and discovers sibling modules.
    pub async fn plan(&self, file: &Path, project_root: &Path) -> Result<GenerationPlan> {
        let location = PathResolver::new(&self.settings.discovery).resolve(file)?;

        let settings = Arc::clone(&self.settings);
        let service_root = location.service_root.clone();
        let config_dir = location.config_dir.clone();
        let project = project_root.to_path_buf();
        // 掃描設定檔會阻塞，移到 blocking 執行緒
        let source_paths = tokio::task::spawn_blocking(move || {
            ModulePathAggregator::new(&settings.discovery).aggregate(
                &service_root,
                &config_dir,
                &project,
            )
        })
        .await
        .map_err(|e| DocError::TaskError {
            message: format!("module discovery failed: {}", e),
        })?;

        let config = ApiConfig::for_location(&location, source_paths, &self.settings.generator);
        let expected_output = config.expected_output(&location.file_stem, Local::now());

        Ok(GenerationPlan {
            location,
            config,
            expected_output,
        })
    }

    pub async fn run(&self, file: &Path, project_root: &Path) -> Result<GenerationOutcome> {
        tracing::info!("📄 Generating API docs for {}", file.display());

        let plan = self.plan(file, project_root).await?;
        tracing::info!(
            "📦 Package filter {}, {} source roots",
            plan.config.package_filters,
            plan.config.source_code_paths.len()
        );

        if plan.expected_output.exists() {
            tracing::debug!("Removing stale output {}", plan.expected_output.display());
            tokio::fs::remove_file(&plan.expected_output).await?;
        }
        tokio::fs::create_dir_all(&plan.config.out_path).await?;

        let watcher = OutputWatcher::new(
            &plan.config.out_path,
            plan.config.output_match(&plan.location.file_stem),
        )?;
        let ctx = GenerationContext::new(project_root);
        self.generator.generate(&ctx, &plan.config).await?;

        let output = watcher.wait(self.settings.wait_timeout()).await;
        match &output {
            Some(path) => tracing::info!("✅ Documentation written to {}", path.display()),
            None => tracing::warn!(
                "Generator finished but {} did not appear within {:?}",
                plan.expected_output.display(),
                self.settings.wait_timeout()
            ),
        }

        Ok(GenerationOutcome {
            location: plan.location,
            config: plan.config,
            expected_output: plan.expected_output,
            output,
        })
    }
}
