use crate::domain::model::ConfigDeclaration;
use crate::utils::error::Result;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Looks for `<marker>: a,b,c` lines in one configuration file.
#[derive(Debug, Clone)]
pub struct ConfigScanner {
    marker_key: String,
}

impl ConfigScanner {
    pub fn new(marker_key: impl Into<String>) -> Self {
        Self {
            marker_key: marker_key.into(),
        }
    }

    /// Never fails: unreadable files are logged and count as `NothingDeclared`.
    pub fn scan(&self, path: &Path) -> ConfigDeclaration {
        match self.try_scan(path) {
            Ok(declaration) => declaration,
            Err(e) => {
                tracing::error!("Failed to read config file {}: {}", path.display(), e);
                ConfigDeclaration::NothingDeclared
            }
        }
    }

    pub fn try_scan(&self, path: &Path) -> Result<ConfigDeclaration> {
        let reader = BufReader::new(File::open(path)?);
        let mut declaration = ConfigDeclaration::NothingDeclared;

        // 逐行以位元組讀取，非 UTF-8 的註解行不影響其他行
        for raw in reader.split(b'\n') {
            let raw = raw?;
            let line = String::from_utf8_lossy(&raw);
            if let Some(names) = self.parse_line(line.trim_end_matches('\r')) {
                // 後面的宣告覆蓋前面的
                declaration = ConfigDeclaration::Modules(names);
            }
        }

        if let ConfigDeclaration::Modules(names) = &declaration {
            tracing::debug!("{} declares modules {:?}", path.display(), names);
        }
        Ok(declaration)
    }

    /// Returns the declared names when `line` carries a non-blank declaration.
    fn parse_line(&self, line: &str) -> Option<Vec<String>> {
        if !line.contains(&self.marker_key) {
            return None;
        }

        let value = line.split_once(':').map(|(_, rest)| rest.trim()).unwrap_or("");
        if value.is_empty() {
            return None;
        }

        let names: Vec<String> = value
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();

        if names.is_empty() {
            None
        } else {
            Some(names)
        }
    }
}
