use crate::config::toml_config::GeneratorConfig;
use crate::core::output_watcher::OutputMatch;
use crate::domain::model::{ApiConfig, ServiceLocation, SourcePath};
use chrono::{DateTime, Local};
use std::path::PathBuf;

impl ApiConfig {
    pub fn for_location(
        location: &ServiceLocation,
        source_code_paths: Vec<SourcePath>,
        generator: &GeneratorConfig,
    ) -> Self {
        Self {
            server_url: generator.server_url.clone(),
            out_path: location.out_path.clone(),
            source_code_paths,
            package_filters: location.class_path.clone(),
            cover_old: generator.cover_old,
            response_example: generator.response_example,
            inline_enum: generator.inline_enum,
            all_in_one: generator.all_in_one,
            adoc: false,
            params_data_to_tree: false,
        }
    }

    /// Name of the Markdown file the generator writes for `file_stem`.
    ///
    /// All-in-one output is versioned with a minute timestamp unless old
    /// files are overwritten. The generator stamps its own clock, so a
    /// versioned name computed here is only a guess; wait on
    /// [`ApiConfig::output_match`] instead.
    pub fn output_file_name(&self, file_stem: &str, now: DateTime<Local>) -> String {
        if self.all_in_one {
            if self.cover_old {
                "AllInOne.md".to_string()
            } else {
                format!("AllInOne-V{}.md", now.format("%Y%m%d%H%M"))
            }
        } else {
            format!("{}Api.md", file_stem)
        }
    }

    pub fn expected_output(&self, file_stem: &str, now: DateTime<Local>) -> PathBuf {
        self.out_path.join(self.output_file_name(file_stem, now))
    }

    /// Which file in `out_path` to accept as this run's output.
    pub fn output_match(&self, file_stem: &str) -> OutputMatch {
        match (self.all_in_one, self.cover_old) {
            (true, false) => OutputMatch::Versioned {
                prefix: "AllInOne-V".to_string(),
                suffix: ".md".to_string(),
            },
            (true, true) => OutputMatch::Exact("AllInOne.md".to_string()),
            (false, _) => OutputMatch::Exact(format!("{}Api.md", file_stem)),
        }
    }
}
