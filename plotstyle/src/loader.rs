//! Configuration document loading.
//!
//! A source is either a local path or an `http(s)://` URL. Both yield a YAML
//! mapping; no further schema checks happen here.

use crate::defaults::bundled;
use crate::error::{StyleError, StyleResult};
use serde_yaml::{Mapping, Value};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Where a palette or theme document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Path(PathBuf),
    Url(String),
    /// Document compiled into the binary.
    Bundled(&'static str),
}

impl ConfigSource {
    pub fn is_remote(&self) -> bool {
        matches!(self, ConfigSource::Url(_))
    }
}

impl From<&str> for ConfigSource {
    fn from(source: &str) -> Self {
        if source.starts_with("http://") || source.starts_with("https://") {
            ConfigSource::Url(source.to_string())
        } else {
            ConfigSource::Path(PathBuf::from(source))
        }
    }
}

impl From<String> for ConfigSource {
    fn from(source: String) -> Self {
        ConfigSource::from(source.as_str())
    }
}

impl From<&Path> for ConfigSource {
    fn from(path: &Path) -> Self {
        ConfigSource::Path(path.to_path_buf())
    }
}

impl From<PathBuf> for ConfigSource {
    fn from(path: PathBuf) -> Self {
        ConfigSource::Path(path)
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Path(path) => write!(f, "{}", path.display()),
            ConfigSource::Url(url) => write!(f, "{url}"),
            ConfigSource::Bundled(name) => write!(f, "<bundled {name}>"),
        }
    }
}

/// Reads configuration documents from disk or over HTTP.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    timeout: Duration,
}

impl ConfigLoader {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Load and parse a document into its top-level mapping.
    pub fn load(&self, source: &ConfigSource) -> StyleResult<Mapping> {
        let text = match source {
            ConfigSource::Path(path) => self.read_file(path)?,
            ConfigSource::Url(url) => self.fetch(url)?,
            ConfigSource::Bundled(name) => bundled(name)
                .ok_or_else(|| StyleError::Io {
                    path: source.to_string(),
                    reason: "no bundled document with this name".to_string(),
                })?
                .to_string(),
        };
        parse_document(&text, &source.to_string())
    }

    fn read_file(&self, path: &Path) -> StyleResult<String> {
        fs::read_to_string(path).map_err(|e| StyleError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    fn fetch(&self, url: &str) -> StyleResult<String> {
        let fetch_error = |reason: String| StyleError::Fetch {
            url: url.to_string(),
            reason,
        };

        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| fetch_error(format!("HTTP client creation failed: {e}")))?;

        let response = client.get(url).send().map_err(|e| {
            if e.is_timeout() {
                fetch_error(format!("timed out after {}s", self.timeout.as_secs()))
            } else {
                fetch_error(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(fetch_error(format!("HTTP status {status}")));
        }

        let body = response
            .text()
            .map_err(|e| fetch_error(format!("failed to read response body: {e}")))?;

        log::debug!("Fetched {} bytes from {url}", body.len());
        Ok(body)
    }
}

/// Parse YAML text, requiring a mapping at the top level.
pub fn parse_document(text: &str, source_name: &str) -> StyleResult<Mapping> {
    let parse_error = |reason: String| StyleError::Parse {
        source_name: source_name.to_string(),
        reason,
    };

    let value: Value = serde_yaml::from_str(text).map_err(|e| parse_error(e.to_string()))?;

    match value {
        Value::Mapping(mapping) => Ok(mapping),
        Value::Null => Err(parse_error("document is empty".to_string())),
        other => Err(parse_error(format!(
            "top-level value must be a mapping, found {}",
            value_kind(&other)
        ))),
    }
}

/// Human-readable name of a YAML value's type, for error messages.
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

/// Render a YAML mapping key as a plain string.
pub(crate) fn key_to_string(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::*;
    use std::io::Write;

    #[test]
    fn test_source_detection() {
        assert!(ConfigSource::from("https://example.com/palettes.yaml").is_remote());
        assert!(ConfigSource::from("http://localhost/themes.yaml").is_remote());
        assert!(!ConfigSource::from("resources/palettes.yaml").is_remote());
        assert!(!ConfigSource::from("httpdocs/palettes.yaml").is_remote());
    }

    #[test]
    fn test_parse_document_requires_mapping() {
        assert_ok!(parse_document("vibrant: [red, green, blue]", "test"));

        let err = assert_err!(parse_document("- red\n- green", "test"));
        assert!(err.to_string().contains("found a sequence"));

        let err = assert_err!(parse_document("", "test"));
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_parse_document_malformed_yaml() {
        let result = parse_document("vibrant: [red, green", "broken.yaml");
        assert!(matches!(
            result,
            Err(StyleError::Parse { ref source_name, .. }) if source_name == "broken.yaml"
        ));
    }

    #[test]
    fn test_load_local_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "vibrant:\n  - red\n  - green").unwrap();

        let loader = ConfigLoader::new(Duration::from_secs(1));
        let mapping = assert_ok!(loader.load(&ConfigSource::from(file.path())));

        assert_eq!(mapping.len(), 1);
        assert_some!(mapping.get("vibrant"));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let loader = ConfigLoader::new(Duration::from_secs(1));
        let result = loader.load(&ConfigSource::from("/nonexistent/palettes.yaml"));

        assert!(matches!(result, Err(StyleError::Io { .. })));
    }

    #[test]
    fn test_load_bundled_document() {
        let loader = ConfigLoader::new(Duration::from_secs(1));

        let mapping = assert_ok!(loader.load(&ConfigSource::Bundled("themes.yaml")));
        assert_some!(mapping.get("paper"));

        assert!(matches!(
            loader.load(&ConfigSource::Bundled("extra.yaml")),
            Err(StyleError::Io { .. })
        ));
    }

    #[test]
    fn test_unreachable_url_is_fetch_error() {
        let loader = ConfigLoader::new(Duration::from_secs(2));
        let result = loader.load(&ConfigSource::from("http://127.0.0.1:1/palettes.yaml"));

        let err = assert_err!(result);
        assert!(err.is_recoverable());
    }
}
