use crate::domain::model::{ApiConfig, GenerationContext};
use crate::domain::ports::DocGenerator;
use crate::utils::error::{DocError, Result};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Runs an external generator program and feeds it the `ApiConfig` as JSON
/// on stdin.
#[derive(Debug, Clone)]
pub struct CommandGenerator {
    program: String,
    args: Vec<String>,
}

impl CommandGenerator {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

#[async_trait]
impl DocGenerator for CommandGenerator {
    async fn generate(&self, ctx: &GenerationContext, config: &ApiConfig) -> Result<()> {
        let payload = serde_json::to_vec(config)?;

        tracing::debug!(
            "Spawning generator '{}' {:?} in {}",
            self.program,
            self.args,
            ctx.working_dir.display()
        );

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .current_dir(&ctx.working_dir)
            .envs(&ctx.env)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| DocError::GeneratorError {
                message: format!("cannot start '{}': {}", self.program, e),
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(&payload).await?;
            stdin.shutdown().await?;
        }

        let output = child.wait_with_output().await?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        for line in stdout.lines().filter(|l| !l.trim().is_empty()) {
            tracing::debug!("[generator] {}", line);
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DocError::GeneratorError {
                message: format!("'{}' exited with {}: {}", self.program, output.status, stderr.trim()),
            });
        }

        Ok(())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::domain::model::SourcePath;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn config(out_path: PathBuf) -> ApiConfig {
        ApiConfig {
            server_url: "http://{{api_host_port}}".to_string(),
            out_path,
            source_code_paths: vec![SourcePath::new("/proj/svc")],
            package_filters: "com.acme.Foo".to_string(),
            cover_old: true,
            response_example: true,
            inline_enum: true,
            all_in_one: false,
            adoc: false,
            params_data_to_tree: false,
        }
    }

    #[tokio::test]
    async fn test_config_is_written_to_stdin() {
        let dir = TempDir::new().unwrap();
        let captured = dir.path().join("captured.json");
        let generator = CommandGenerator::new(
            "sh",
            vec!["-c".to_string(), format!("cat > '{}'", captured.display())],
        );

        generator
            .generate(&GenerationContext::new(dir.path()), &config(dir.path().join("doc")))
            .await
            .unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&captured).unwrap()).unwrap();
        assert_eq!(written["packageFilters"], "com.acme.Foo");
    }

    #[tokio::test]
    async fn test_failed_exit_is_generator_error() {
        let dir = TempDir::new().unwrap();
        let generator = CommandGenerator::new(
            "sh",
            vec!["-c".to_string(), "cat > /dev/null; echo boom >&2; exit 3".to_string()],
        );

        let err = generator
            .generate(&GenerationContext::new(dir.path()), &config(dir.path().join("doc")))
            .await
            .unwrap_err();

        match err {
            DocError::GeneratorError { message } => assert!(message.contains("boom")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_missing_program_is_generator_error() {
        let dir = TempDir::new().unwrap();
        let generator = CommandGenerator::new("definitely-not-a-real-doc-generator", Vec::new());

        let err = generator
            .generate(&GenerationContext::new(dir.path()), &config(dir.path().join("doc")))
            .await
            .unwrap_err();
        assert!(matches!(err, DocError::GeneratorError { .. }));
    }

    #[tokio::test]
    async fn test_context_env_reaches_the_process() {
        let dir = TempDir::new().unwrap();
        let captured = dir.path().join("env.txt");
        let generator = CommandGenerator::new(
            "sh",
            vec![
                "-c".to_string(),
                format!("cat > /dev/null; printf %s \"$DOC_PROFILE\" > '{}'", captured.display()),
            ],
        );
        let ctx = GenerationContext::new(dir.path()).with_env("DOC_PROFILE", "dev");

        generator
            .generate(&ctx, &config(dir.path().join("doc")))
            .await
            .unwrap();

        assert_eq!(std::fs::read_to_string(&captured).unwrap(), "dev");
    }
}
