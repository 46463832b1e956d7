use crate::utils::error::{DocError, Result};
use regex::Regex;
use std::path::Path;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// 驗證 URL，允許 `{{api_host_port}}` 這類模板佔位符
pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(DocError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    let placeholder = Regex::new(r"\{\{[^}]*\}\}").map_err(|e| DocError::ConfigError {
        message: e.to_string(),
    })?;
    let concrete = placeholder.replace_all(url_str, "placeholder");

    match Url::parse(&concrete) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(DocError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(DocError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(DocError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(DocError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(DocError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DocError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// A directory-name setting must be a single path component.
pub fn validate_segment(field_name: &str, value: &str) -> Result<()> {
    validate_non_empty_string(field_name, value)?;
    if value.contains('/') || value.contains('\\') {
        return Err(DocError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be a single directory name".to_string(),
        });
    }
    Ok(())
}

/// 檢查選中的檔案是否為指定副檔名的原始碼檔案
pub fn validate_source_file(path: &Path, extension: &str) -> Result<()> {
    let matches = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == extension)
        .unwrap_or(false);

    if !matches {
        return Err(DocError::validation(format!(
            "Please select a valid .{} file (got '{}')",
            extension,
            path.display()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("generator.server_url", "http://{{api_host_port}}").is_ok());
        assert!(validate_url("generator.server_url", "https://api.example.com").is_ok());
        assert!(validate_url("generator.server_url", "").is_err());
        assert!(validate_url("generator.server_url", "not a url").is_err());
        assert!(validate_url("generator.server_url", "ftp://{{host}}").is_err());
    }

    #[test]
    fn test_validate_segment() {
        assert!(validate_segment("discovery.anchor", "com").is_ok());
        assert!(validate_segment("discovery.anchor", "  ").is_err());
        assert!(validate_segment("discovery.doc_dir", "doc/api").is_err());
    }

    #[test]
    fn test_validate_source_file() {
        assert!(validate_source_file(Path::new("/p/s/src/main/java/com/A.java"), "java").is_ok());
        assert!(validate_source_file(Path::new("/p/s/src/main/java/com/A.kt"), "java").is_err());
        assert!(validate_source_file(Path::new("/p/s/README"), "java").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("output.wait_timeout_secs", 5, 1).is_ok());
        assert!(validate_positive_number("output.wait_timeout_secs", 0, 1).is_err());
    }
}
