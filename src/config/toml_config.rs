use crate::domain::ports::DiscoveryProvider;
use crate::utils::error::{DocError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_MARKER_KEY: &str = "smartDocDependencyName";
pub const DEFAULT_CONFIG_MARKER: &str = "application";
pub const DEFAULT_CONFIG_EXTENSION: &str = ".yml";
pub const DEFAULT_FALLBACK_MODULE: &str = "common-component";
pub const DEFAULT_ANCHOR: &str = "com";
pub const DEFAULT_SOURCE_EXTENSION: &str = "java";
pub const DEFAULT_RESOURCES_DIR: &str = "resources";
pub const DEFAULT_DOC_DIR: &str = "doc";
pub const DEFAULT_SERVER_URL: &str = "http://{{api_host_port}}";
pub const DEFAULT_WAIT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolConfig {
    #[serde(default)]
    pub discovery: DiscoveryConfig,
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    pub marker_key: String,
    pub config_marker: String,
    pub config_extension: String,
    pub fallback_module: String,
    pub anchor: String,
    pub source_extension: String,
    pub resources_dir: String,
    pub doc_dir: String,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            marker_key: DEFAULT_MARKER_KEY.to_string(),
            config_marker: DEFAULT_CONFIG_MARKER.to_string(),
            config_extension: DEFAULT_CONFIG_EXTENSION.to_string(),
            fallback_module: DEFAULT_FALLBACK_MODULE.to_string(),
            anchor: DEFAULT_ANCHOR.to_string(),
            source_extension: DEFAULT_SOURCE_EXTENSION.to_string(),
            resources_dir: DEFAULT_RESOURCES_DIR.to_string(),
            doc_dir: DEFAULT_DOC_DIR.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub server_url: String,
    pub program: Option<String>,
    pub args: Vec<String>,
    pub cover_old: bool,
    pub response_example: bool,
    pub inline_enum: bool,
    pub all_in_one: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            program: None,
            args: Vec::new(),
            cover_old: true,
            response_example: true,
            inline_enum: true,
            all_in_one: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub wait_timeout_secs: u64,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            wait_timeout_secs: DEFAULT_WAIT_TIMEOUT_SECS,
        }
    }
}

impl ToolConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DocError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DOC_GENERATOR})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DocError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.output.wait_timeout_secs)
    }
}

impl Validate for ToolConfig {
    fn validate(&self) -> Result<()> {
        let d = &self.discovery;
        validation::validate_non_empty_string("discovery.marker_key", &d.marker_key)?;
        validation::validate_non_empty_string("discovery.config_marker", &d.config_marker)?;
        validation::validate_non_empty_string("discovery.config_extension", &d.config_extension)?;
        validation::validate_segment("discovery.fallback_module", &d.fallback_module)?;
        validation::validate_segment("discovery.anchor", &d.anchor)?;
        validation::validate_segment("discovery.source_extension", &d.source_extension)?;
        validation::validate_segment("discovery.resources_dir", &d.resources_dir)?;
        validation::validate_segment("discovery.doc_dir", &d.doc_dir)?;

        validation::validate_url("generator.server_url", &self.generator.server_url)?;
        if let Some(program) = &self.generator.program {
            validation::validate_path("generator.program", program)?;
        }

        validation::validate_positive_number(
            "output.wait_timeout_secs",
            self.output.wait_timeout_secs,
            1,
        )?;

        Ok(())
    }
}

impl DiscoveryProvider for DiscoveryConfig {
    fn marker_key(&self) -> &str {
        &self.marker_key
    }

    fn config_marker(&self) -> &str {
        &self.config_marker
    }

    fn config_extension(&self) -> &str {
        &self.config_extension
    }

    fn fallback_module(&self) -> &str {
        &self.fallback_module
    }

    fn anchor(&self) -> &str {
        &self.anchor
    }

    fn source_extension(&self) -> &str {
        &self.source_extension
    }

    fn resources_dir(&self) -> &str {
        &self.resources_dir
    }

    fn doc_dir(&self) -> &str {
        &self.doc_dir
    }
}
