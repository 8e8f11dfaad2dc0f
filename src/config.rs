// src/config.rs

//! Configuration file support
//!
//! The optional TOML file holds API settings under a `[default]` section,
//! with named overrides under `[profile.<name>]`:
//!
//! ```toml
//! [default]
//! api_host = "https://api.cloudsmith.io/v1"
//! api_key = "..."
//!
//! [profile.staging]
//! api_host = "https://api.staging.example.com/v1"
//! ```
//!
//! Values given on the command line or in the environment win over the
//! profile, which wins over `[default]`, which wins over built-in defaults.

use crate::api::ApiOptions;
use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directory name under the user config dir
const CONFIG_DIR_NAME: &str = "cloudsmith";

/// Config file name
const CONFIG_FILE_NAME: &str = "config.toml";

/// API settings as they appear in one config section
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiSection {
    pub api_host: Option<String>,
    pub api_key: Option<String>,
    pub user_agent: Option<String>,
}

impl ApiSection {
    /// Values from `other` replace ours where set
    fn overlay(&mut self, other: &ApiSection) {
        if other.api_host.is_some() {
            self.api_host.clone_from(&other.api_host);
        }
        if other.api_key.is_some() {
            self.api_key.clone_from(&other.api_key);
        }
        if other.user_agent.is_some() {
            self.user_agent.clone_from(&other.user_agent);
        }
    }
}

/// TOML configuration file structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub default: ApiSection,

    #[serde(default)]
    pub profile: HashMap<String, ApiSection>,
}

impl ConfigFile {
    /// Parse configuration from TOML text
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::Config(format!("Invalid config file: {e}")))
    }

    /// Load configuration
    ///
    /// With an explicit `path` the file must exist. Without one the default
    /// location is tried and a missing file yields an empty configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => match default_config_path() {
                Some(path) => (path, false),
                None => return Ok(Self::default()),
            },
        };

        if !path.exists() {
            if required {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            debug!("No config file at {}", path.display());
            return Ok(Self::default());
        }

        debug!("Loading config from {}", path.display());
        let text = std::fs::read_to_string(&path).map_err(|e| {
            Error::Config(format!("Failed to read config file {}: {e}", path.display()))
        })?;
        Self::parse(&text)
    }

    /// Merged settings for a profile (or just `[default]`)
    pub fn section(&self, profile: Option<&str>) -> Result<ApiSection> {
        let mut section = self.default.clone();
        if let Some(name) = profile {
            let overrides = self
                .profile
                .get(name)
                .ok_or_else(|| Error::Config(format!("Unknown profile '{}'", name)))?;
            section.overlay(overrides);
        }
        Ok(section)
    }
}

/// Default config file location (`<config dir>/cloudsmith/config.toml`)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Resolve API options from command-line values and a config section
pub fn resolve_api_options(
    api_host: Option<&str>,
    api_key: Option<&str>,
    section: &ApiSection,
) -> ApiOptions {
    let defaults = ApiOptions::default();
    ApiOptions {
        host: api_host
            .map(str::to_string)
            .or_else(|| section.api_host.clone())
            .unwrap_or(defaults.host),
        api_key: api_key
            .map(str::to_string)
            .or_else(|| section.api_key.clone())
            .filter(|key| !key.is_empty()),
        user_agent: section.user_agent.clone().unwrap_or(defaults.user_agent),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::DEFAULT_API_HOST;

    const SAMPLE: &str = r#"
[default]
api_key = "default-key"

[profile.staging]
api_host = "https://staging.example.com/v1"

[profile.other]
api_key = "other-key"
user_agent = "custom/1.0"
"#;

    #[test]
    fn test_parse_and_profiles() {
        let config = ConfigFile::parse(SAMPLE).unwrap();

        let section = config.section(None).unwrap();
        assert_eq!(section.api_key.as_deref(), Some("default-key"));
        assert_eq!(section.api_host, None);

        let section = config.section(Some("staging")).unwrap();
        assert_eq!(section.api_key.as_deref(), Some("default-key"));
        assert_eq!(section.api_host.as_deref(), Some("https://staging.example.com/v1"));

        let section = config.section(Some("other")).unwrap();
        assert_eq!(section.api_key.as_deref(), Some("other-key"));
        assert_eq!(section.user_agent.as_deref(), Some("custom/1.0"));
    }

    #[test]
    fn test_unknown_profile() {
        let config = ConfigFile::parse(SAMPLE).unwrap();
        assert!(matches!(config.section(Some("nope")), Err(Error::Config(_))));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(ConfigFile::parse("[default]\napi_kee = 1"), Err(Error::Config(_))));
        assert!(matches!(ConfigFile::parse("not toml ["), Err(Error::Config(_))));
    }

    #[test]
    fn test_resolve_precedence() {
        let section = ApiSection {
            api_host: Some("https://file.example.com".to_string()),
            api_key: Some("file-key".to_string()),
            user_agent: None,
        };

        let options = resolve_api_options(None, None, &section);
        assert_eq!(options.host, "https://file.example.com");
        assert_eq!(options.api_key.as_deref(), Some("file-key"));

        let options =
            resolve_api_options(Some("https://flag.example.com"), Some("flag-key"), &section);
        assert_eq!(options.host, "https://flag.example.com");
        assert_eq!(options.api_key.as_deref(), Some("flag-key"));

        let options = resolve_api_options(None, Some(""), &ApiSection::default());
        assert_eq!(options.host, DEFAULT_API_HOST);
        assert_eq!(options.api_key, None);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, SAMPLE).unwrap();

        let config = ConfigFile::load(Some(&path)).unwrap();
        assert!(config.profile.contains_key("staging"));
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        assert!(matches!(ConfigFile::load(Some(&path)), Err(Error::Config(_))));
    }
}
