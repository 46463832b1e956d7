use crate::domain::model::ServiceLocation;
use crate::domain::ports::DiscoveryProvider;
use crate::utils::error::{DocError, Result};
use crate::utils::validation::validate_source_file;
use std::path::{Component, Path, PathBuf};

const SRC_SEGMENT: &str = "src";
const JAVA_SEGMENT: &str = "java";

/// Derives the service layout from a source file path such as
/// `/proj/svc/src/main/java/com/acme/Foo.java`.
///
/// Segments are matched as whole path components, so `srcgen` never counts
/// as `src`.
pub struct PathResolver<'a, D: DiscoveryProvider> {
    settings: &'a D,
}

impl<'a, D: DiscoveryProvider> PathResolver<'a, D> {
    pub fn new(settings: &'a D) -> Self {
        Self { settings }
    }

    pub fn resolve(&self, file: &Path) -> Result<ServiceLocation> {
        validate_source_file(file, self.settings.source_extension())?;

        let components: Vec<Component<'_>> = file.components().collect();

        let src_idx = position_of(&components, SRC_SEGMENT, 0)
            .ok_or_else(|| DocError::missing_segment(SRC_SEGMENT, file))?;
        let java_idx = position_of(&components, JAVA_SEGMENT, src_idx + 1)
            .ok_or_else(|| DocError::missing_segment(JAVA_SEGMENT, file))?;
        // 套件名稱一定在 java 目錄之下
        let anchor = self.settings.anchor();
        let anchor_idx = position_of(&components, anchor, java_idx + 1)
            .ok_or_else(|| DocError::missing_segment(anchor, file))?;

        let service_root = join_prefix(&components[..src_idx]);
        let config_dir = join_prefix(&components[..java_idx]).join(self.settings.resources_dir());
        let out_path = service_root.join(self.settings.doc_dir());

        let file_stem = file
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| DocError::validation(format!("'{}' has no file name", file.display())))?
            .to_string();

        let last = components.len() - 1;
        let mut packages: Vec<&str> = Vec::with_capacity(last - anchor_idx + 1);
        for component in &components[anchor_idx..last] {
            packages.push(component_str(component, file)?);
        }
        packages.push(&file_stem);
        let class_path = packages.join(".");

        tracing::debug!(
            "Resolved {} -> service root {}, class path {}",
            file.display(),
            service_root.display(),
            class_path
        );

        Ok(ServiceLocation {
            service_root,
            class_path,
            out_path,
            config_dir,
            file_stem,
        })
    }
}

fn position_of(components: &[Component<'_>], segment: &str, from: usize) -> Option<usize> {
    components
        .iter()
        .enumerate()
        .skip(from)
        .find(|(_, c)| matches!(c, Component::Normal(name) if *name == segment))
        .map(|(i, _)| i)
}

fn join_prefix(components: &[Component<'_>]) -> PathBuf {
    components.iter().collect()
}

fn component_str<'c>(component: &'c Component<'_>, file: &Path) -> Result<&'c str> {
    component.as_os_str().to_str().ok_or_else(|| {
        DocError::validation(format!("'{}' is not valid UTF-8", file.display()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::toml_config::DiscoveryConfig;

    fn resolve(path: &str) -> Result<ServiceLocation> {
        let settings = DiscoveryConfig::default();
        PathResolver::new(&settings).resolve(Path::new(path))
    }

    #[test]
    fn test_resolves_standard_layout() {
        let location = resolve("/proj/svc/src/main/java/com/acme/Foo.java").unwrap();

        assert_eq!(location.service_root, PathBuf::from("/proj/svc"));
        assert_eq!(location.class_path, "com.acme.Foo");
        assert_eq!(location.out_path, PathBuf::from("/proj/svc/doc"));
        assert_eq!(
            location.config_dir,
            PathBuf::from("/proj/svc/src/main/resources")
        );
        assert_eq!(location.file_stem, "Foo");
    }

    #[test]
    fn test_service_root_is_prefix_of_input() {
        let input = "/work/shop/order-service/src/main/java/com/shop/order/api/OrderController.java";
        let location = resolve(input).unwrap();

        assert!(Path::new(input).starts_with(&location.service_root));
        assert_eq!(
            location.class_path,
            "com.shop.order.api.OrderController"
        );
        assert!(!location.class_path.contains('/'));
    }

    #[test]
    fn test_segment_match_is_whole_component() {
        // "srcgen" and "community" must not be mistaken for "src" and "com"
        let location =
            resolve("/home/community/srcgen/svc/src/main/java/com/acme/Foo.java").unwrap();

        assert_eq!(
            location.service_root,
            PathBuf::from("/home/community/srcgen/svc")
        );
        assert_eq!(location.class_path, "com.acme.Foo");
    }

    #[test]
    fn test_anchor_is_searched_below_java() {
        let location = resolve("/com/svc/src/main/java/com/acme/Foo.java").unwrap();
        assert_eq!(location.class_path, "com.acme.Foo");
    }

    #[test]
    fn test_java_above_service_is_ignored() {
        let location = resolve("/home/me/java/proj/svc/src/main/java/com/acme/Foo.java").unwrap();

        assert_eq!(location.service_root, PathBuf::from("/home/me/java/proj/svc"));
        assert_eq!(
            location.config_dir,
            PathBuf::from("/home/me/java/proj/svc/src/main/resources")
        );
        assert!(location.config_dir.starts_with(&location.service_root));
    }

    #[test]
    fn test_java_must_be_below_src() {
        let err = resolve("/proj/java/svc/src/main/kotlin/com/acme/Foo.java").unwrap_err();
        assert!(matches!(err, DocError::MissingSegmentError { ref segment, .. } if segment == "java"));
    }

    #[test]
    fn test_rejects_non_java_file() {
        let err = resolve("/proj/svc/src/main/java/com/acme/Foo.kt").unwrap_err();
        assert!(matches!(err, DocError::ValidationError { .. }));
    }

    #[test]
    fn test_missing_segments_are_reported() {
        let err = resolve("/proj/svc/main/java/com/acme/Foo.java").unwrap_err();
        assert!(matches!(err, DocError::MissingSegmentError { ref segment, .. } if segment == "src"));

        let err = resolve("/proj/svc/src/main/kotlin/com/acme/Foo.java").unwrap_err();
        assert!(matches!(err, DocError::MissingSegmentError { ref segment, .. } if segment == "java"));

        let err = resolve("/proj/svc/src/main/java/org/acme/Foo.java").unwrap_err();
        assert!(matches!(err, DocError::MissingSegmentError { ref segment, .. } if segment == "com"));
    }

    #[test]
    fn test_custom_anchor_and_doc_dir() {
        let settings = DiscoveryConfig {
            anchor: "org".to_string(),
            doc_dir: "api-docs".to_string(),
            ..DiscoveryConfig::default()
        };
        let location = PathResolver::new(&settings)
            .resolve(Path::new("/proj/svc/src/main/java/org/acme/Bar.java"))
            .unwrap();

        assert_eq!(location.class_path, "org.acme.Bar");
        assert_eq!(location.out_path, PathBuf::from("/proj/svc/api-docs"));
    }
}
