pub mod toml_config;

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "smartdoc-exec")]
#[command(about = "Generate API docs for the selected Java controller")]
pub struct CliConfig {
    /// Absolute path of the selected source file
    pub file: PathBuf,

    /// Project root containing the service directories
    #[arg(short, long)]
    pub project: PathBuf,

    /// Path to TOML settings file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Generator program (overrides generator.program)
    #[arg(long)]
    pub generator: Option<String>,

    /// Extra generator argument, may be repeated
    #[arg(long = "generator-arg", allow_hyphen_values = true)]
    pub generator_args: Vec<String>,

    /// Seconds to wait for the output file (overrides output.wait_timeout_secs)
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Print the generator config without running anything
    #[arg(long)]
    pub dry_run: bool,

    /// Log as JSON lines on stderr
    #[arg(long)]
    pub log_json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 載入設定檔並套用命令列覆蓋
    pub fn load_settings(&self) -> crate::utils::error::Result<toml_config::ToolConfig> {
        let mut settings = match &self.config {
            Some(path) => toml_config::ToolConfig::from_file(path)?,
            None => toml_config::ToolConfig::default(),
        };

        if let Some(program) = &self.generator {
            settings.generator.program = Some(program.clone());
        }
        if !self.generator_args.is_empty() {
            settings.generator.args = self.generator_args.clone();
        }
        if let Some(secs) = self.timeout_secs {
            settings.output.wait_timeout_secs = secs;
        }

        Ok(settings)
    }
}
