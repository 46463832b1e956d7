use crate::utils::error::Result;
use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;

/// Which file name in the output directory counts as the generator's result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMatch {
    Exact(String),
    /// `<prefix><anything><suffix>`, e.g. `AllInOne-V202403091405.md`.
    Versioned { prefix: String, suffix: String },
}

impl OutputMatch {
    pub fn matches(&self, name: &str) -> bool {
        match self {
            OutputMatch::Exact(expected) => name == expected,
            OutputMatch::Versioned { prefix, suffix } => {
                name.len() > prefix.len() + suffix.len()
                    && name.starts_with(prefix.as_str())
                    && name.ends_with(suffix.as_str())
            }
        }
    }
}

/// Waits for the output file to appear in a directory. Arm it before
/// starting the writer so no creation event is missed.
pub struct OutputWatcher {
    // Keep watcher alive
    _watcher: RecommendedWatcher,
    rx: mpsc::UnboundedReceiver<notify::Result<Event>>,
    dir: PathBuf,
    matcher: OutputMatch,
    // 已存在的舊版本不算新輸出
    preexisting: HashSet<String>,
}

impl OutputWatcher {
    /// `dir` must already exist.
    pub fn new(dir: &Path, matcher: OutputMatch) -> Result<Self> {
        let (tx, rx) = mpsc::unbounded_channel();

        let mut watcher = RecommendedWatcher::new(
            move |res| {
                let _ = tx.send(res);
            },
            Config::default(),
        )?;
        watcher.watch(dir, RecursiveMode::NonRecursive)?;

        let preexisting = match &matcher {
            OutputMatch::Exact(_) => HashSet::new(),
            OutputMatch::Versioned { .. } => matching_names(dir, &matcher).into_iter().collect(),
        };

        Ok(Self {
            _watcher: watcher,
            rx,
            dir: dir.to_path_buf(),
            matcher,
            preexisting,
        })
    }

    /// The newest matching file that was not there when the watcher was armed.
    fn find(&self) -> Option<PathBuf> {
        match &self.matcher {
            OutputMatch::Exact(name) => {
                let path = self.dir.join(name);
                path.exists().then_some(path)
            }
            OutputMatch::Versioned { .. } => matching_names(&self.dir, &self.matcher)
                .into_iter()
                .filter(|name| !self.preexisting.contains(name))
                .max()
                .map(|name| self.dir.join(name)),
        }
    }

    /// The output path once it exists, `None` if `timeout` passes first.
    pub async fn wait(mut self, timeout: Duration) -> Option<PathBuf> {
        let waited = tokio::time::timeout(timeout, async {
            loop {
                if let Some(found) = self.find() {
                    return Some(found);
                }
                match self.rx.recv().await {
                    Some(Ok(event)) => {
                        tracing::trace!("Output dir event: {:?}", event.kind);
                    }
                    Some(Err(e)) => {
                        tracing::warn!("Watch error in {}: {}", self.dir.display(), e);
                    }
                    // 通道關閉後只能再檢查一次
                    None => return self.find(),
                }
            }
        })
        .await;

        waited.unwrap_or_else(|_| self.find())
    }
}

fn matching_names(dir: &Path, matcher: &OutputMatch) -> Vec<String> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!("Cannot list {}: {}", dir.display(), e);
            return Vec::new();
        }
    };

    entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| matcher.matches(name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn exact(name: &str) -> OutputMatch {
        OutputMatch::Exact(name.to_string())
    }

    fn versioned() -> OutputMatch {
        OutputMatch::Versioned {
            prefix: "AllInOne-V".to_string(),
            suffix: ".md".to_string(),
        }
    }

    #[test]
    fn test_versioned_match() {
        let matcher = versioned();
        assert!(matcher.matches("AllInOne-V202403091405.md"));
        assert!(!matcher.matches("AllInOne-V.md"));
        assert!(!matcher.matches("AllInOne.md"));
        assert!(!matcher.matches("FooApi.md"));
    }

    #[tokio::test]
    async fn test_existing_file_returns_immediately() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("FooApi.md");
        std::fs::write(&target, "# Foo").unwrap();

        let watcher = OutputWatcher::new(dir.path(), exact("FooApi.md")).unwrap();
        assert_eq!(watcher.wait(Duration::from_secs(1)).await, Some(target));
    }

    #[tokio::test]
    async fn test_detects_file_written_later() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("FooApi.md");

        let watcher = OutputWatcher::new(dir.path(), exact("FooApi.md")).unwrap();
        let writer_target = target.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            tokio::fs::write(writer_target, "# Foo").await.unwrap();
        });

        assert_eq!(watcher.wait(Duration::from_secs(5)).await, Some(target));
    }

    #[tokio::test]
    async fn test_times_out_when_nothing_is_written() {
        let dir = TempDir::new().unwrap();

        let watcher = OutputWatcher::new(dir.path(), exact("NeverApi.md")).unwrap();
        assert_eq!(watcher.wait(Duration::from_millis(200)).await, None);
    }

    #[tokio::test]
    async fn test_versioned_ignores_older_versions() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("AllInOne-V202401010000.md"), "old").unwrap();

        let watcher = OutputWatcher::new(dir.path(), versioned()).unwrap();
        let fresh = dir.path().join("AllInOne-V202403091406.md");
        let writer_target = fresh.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            tokio::fs::write(writer_target, "new").await.unwrap();
        });

        assert_eq!(watcher.wait(Duration::from_secs(5)).await, Some(fresh));
    }

    #[tokio::test]
    async fn test_versioned_times_out_with_only_old_versions() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("AllInOne-V202401010000.md"), "old").unwrap();

        let watcher = OutputWatcher::new(dir.path(), versioned()).unwrap();
        assert_eq!(watcher.wait(Duration::from_millis(200)).await, None);
    }
}
