//! File-backed settings for the importer.
//!
//! Every field has a default, so a config file only needs the
//! settings it wants to change. CLI flags override whatever the
//! file says.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory the JSON page store writes into.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Parent page reference new pages are filed under.
    #[serde(default = "default_parent")]
    pub parent: String,

    /// Drop the note's first element, which duplicates the title.
    #[serde(default = "default_skip_title")]
    pub skip_title: bool,

    /// Append note metadata to each page as a YAML code block.
    #[serde(default)]
    pub include_meta: bool,

    /// Append the raw exported HTML to each page as a code block.
    #[serde(default)]
    pub include_html: bool,

    /// Log filter in `env_logger` syntax, e.g. `notelift=debug`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            parent: default_parent(),
            skip_title: default_skip_title(),
            include_meta: false,
            include_html: false,
            log_filter: None,
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./pages")
}

fn default_parent() -> String {
    "notes".to_string()
}

fn default_skip_title() -> bool {
    true
}

impl AppConfig {
    /// Load settings from a YAML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&contents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn defaults_skip_the_title_and_both_appendices() {
        let config = AppConfig::default();
        assert_eq!(config.output_dir, PathBuf::from("./pages"));
        assert_eq!(config.parent, "notes");
        assert!(config.skip_title);
        assert!(!config.include_meta);
        assert!(!config.include_html);
        assert!(config.log_filter.is_none());
    }

    #[test]
    fn partial_file_keeps_defaults_for_the_rest() {
        let config: AppConfig =
            serde_yaml::from_str("output_dir: /tmp/export\ninclude_meta: true\n")
                .expect("parses");
        assert_eq!(config.output_dir, PathBuf::from("/tmp/export"));
        assert!(config.include_meta);
        assert!(config.skip_title);
        assert_eq!(config.parent, "notes");
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "parent: inbox\nlog_filter: notelift=debug").expect("write");
        let config = AppConfig::load(file.path()).expect("loads");
        assert_eq!(config.parent, "inbox");
        assert_eq!(config.log_filter.as_deref(), Some("notelift=debug"));
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "output_dir: [unclosed").expect("write");
        assert!(matches!(
            AppConfig::load(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            AppConfig::load(Path::new("/nonexistent/notelift.yaml")),
            Err(ConfigError::Io(_))
        ));
    }
}
