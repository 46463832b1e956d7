use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// One directory tree the generator scans for sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcePath {
    path: PathBuf,
}

impl SourcePath {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// What a single configuration file declares about sibling modules.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConfigDeclaration {
    #[default]
    NothingDeclared,
    Modules(Vec<String>),
}

impl ConfigDeclaration {
    pub fn into_modules(self) -> Vec<String> {
        match self {
            ConfigDeclaration::NothingDeclared => Vec::new(),
            ConfigDeclaration::Modules(names) => names,
        }
    }
}

/// Everything derived from the selected source file's location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceLocation {
    pub service_root: PathBuf,
    pub class_path: String,
    pub out_path: PathBuf,
    pub config_dir: PathBuf,
    pub file_stem: String,
}

/// Configuration handed to the documentation generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiConfig {
    pub server_url: String,
    pub out_path: PathBuf,
    pub source_code_paths: Vec<SourcePath>,
    pub package_filters: String,
    pub cover_old: bool,
    pub response_example: bool,
    pub inline_enum: bool,
    pub all_in_one: bool,
    pub adoc: bool,
    pub params_data_to_tree: bool,
}

/// Passed explicitly to every generator call.
#[derive(Debug, Clone, Default)]
pub struct GenerationContext {
    pub working_dir: PathBuf,
    pub env: HashMap<String, String>,
}

impl GenerationContext {
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            env: HashMap::new(),
        }
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }
}

#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    pub location: ServiceLocation,
    pub config: ApiConfig,
    pub expected_output: PathBuf,
    /// `None` when the file did not show up before the wait timed out.
    pub output: Option<PathBuf>,
}
