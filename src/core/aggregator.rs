use crate::core::config_scanner::ConfigScanner;
use crate::domain::model::{ConfigDeclaration, SourcePath};
use crate::domain::ports::DiscoveryProvider;
use rayon::prelude::*;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

/// Collects the source roots the generator must scan for one service: the
/// service itself plus every sibling module declared in its configuration
/// files.
pub struct ModulePathAggregator<'a, D: DiscoveryProvider> {
    settings: &'a D,
    scanner: ConfigScanner,
}

impl<'a, D: DiscoveryProvider> ModulePathAggregator<'a, D> {
    pub fn new(settings: &'a D) -> Self {
        Self {
            settings,
            scanner: ConfigScanner::new(settings.marker_key()),
        }
    }

    /// Blocks until every configuration file has been scanned.
    pub fn aggregate(
        &self,
        service_root: &Path,
        config_dir: &Path,
        project_root: &Path,
    ) -> Vec<SourcePath> {
        let mut source_paths = vec![SourcePath::new(service_root)];

        if !config_dir.is_dir() {
            tracing::debug!(
                "No config directory at {}, scanning the service only",
                config_dir.display()
            );
            return source_paths;
        }

        let files = self.matching_files(config_dir);
        if files.is_empty() {
            tracing::debug!("No configuration files matched in {}", config_dir.display());
            return source_paths;
        }

        let names: Vec<String> = self
            .scan_all(&files)
            .into_iter()
            .flat_map(ConfigDeclaration::into_modules)
            .collect();

        if names.is_empty() {
            let fallback = self.settings.fallback_module();
            tracing::info!("No sibling modules declared, falling back to {}", fallback);
            source_paths.push(SourcePath::new(project_root.join(fallback)));
        } else {
            tracing::info!("Sibling modules: {}", names.join(", "));
            source_paths.extend(
                names
                    .iter()
                    .map(|name| SourcePath::new(project_root.join(name))),
            );
        }

        source_paths
    }

    /// Direct children of `config_dir` named like `application*.yml`, sorted
    /// by file name.
    fn matching_files(&self, config_dir: &Path) -> Vec<PathBuf> {
        let entries = match std::fs::read_dir(config_dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Cannot list {}: {}", config_dir.display(), e);
                return Vec::new();
            }
        };

        let marker = self.settings.config_marker();
        let extension = self.settings.config_extension();

        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| {
                let name = entry.file_name();
                let name = name.to_string_lossy();
                name.contains(marker) && name.ends_with(extension)
            })
            .map(|entry| entry.path())
            .collect();
        files.sort();
        files
    }

    /// One scan per file on a pool sized to the file count; results come back
    /// in submission order.
    fn scan_all(&self, files: &[PathBuf]) -> Vec<ConfigDeclaration> {
        let pool = match rayon::ThreadPoolBuilder::new()
            .num_threads(files.len())
            .thread_name(|i| format!("config-scan-{}", i))
            .build()
        {
            Ok(pool) => pool,
            Err(e) => {
                tracing::warn!("Could not start scan pool ({}), scanning sequentially", e);
                return files.iter().map(|file| self.scan_guarded(file)).collect();
            }
        };

        tracing::debug!("Scanning {} config files on {} threads", files.len(), pool.current_num_threads());
        pool.install(|| files.par_iter().map(|file| self.scan_guarded(file)).collect())
    }

    fn scan_guarded(&self, file: &Path) -> ConfigDeclaration {
        panic::catch_unwind(AssertUnwindSafe(|| self.scanner.scan(file))).unwrap_or_else(|_| {
            tracing::error!("Scanning {} panicked", file.display());
            ConfigDeclaration::NothingDeclared
        })
    }
}
