//! Configuration file support.
//!
//! Built once at startup and passed down; nothing reads the environment
//! after that. Layers, lowest first:
//!
//! 1. compiled defaults (loopback backends, `.zip`/200 MB uploads,
//!    `.pdf`/10 MB analysis)
//! 2. `.disclosure/config.toml` under the working directory, or the file
//!    given with `--config`
//! 3. `DISCLOSURE_*` environment variables
//! 4. command-line flags

use std::path::{Path, PathBuf};

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";
pub const DEFAULT_BACKEND_BASE: &str = "http://127.0.0.1:5000";

pub const ENV_API_BASE: &str = "DISCLOSURE_API_BASE";
pub const ENV_BACKEND_URL: &str = "DISCLOSURE_BACKEND_URL";
pub const ENV_PUBLISHABLE_KEY: &str = "DISCLOSURE_PUBLISHABLE_KEY";
pub const ENV_IDENTITY_REQUIRED: &str = "DISCLOSURE_IDENTITY_REQUIRED";

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Analyzer and summary service.
    pub api_base: String,
    /// Batch upload service.
    pub backend_base: String,
    /// Ask the analyzer for its fast extraction path.
    pub fast_mode: bool,
    pub upload: FileLimits,
    pub analyze: FileLimits,
    pub identity: IdentityConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            backend_base: DEFAULT_BACKEND_BASE.to_string(),
            fast_mode: true,
            upload: FileLimits::upload_defaults(),
            analyze: FileLimits::analyze_defaults(),
            identity: IdentityConfig::default(),
        }
    }
}

/// Format allow-list and size ceiling for one flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileLimits {
    /// Extensions with the leading dot, e.g. `[".zip"]`.
    pub accepted_formats: Vec<String>,
    pub max_size_mb: u64,
}

impl FileLimits {
    pub fn upload_defaults() -> Self {
        Self {
            accepted_formats: vec![".zip".to_string()],
            max_size_mb: 200,
        }
    }

    pub fn analyze_defaults() -> Self {
        Self {
            accepted_formats: vec![".pdf".to_string()],
            max_size_mb: 10,
        }
    }
}

/// Hosted identity provider settings. Sign-in is disabled unless
/// `required` is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    pub required: bool,
    pub publishable_key: Option<String>,
}

/// Values from command-line flags; `None` keeps the lower layer.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub api_base: Option<String>,
    pub backend_base: Option<String>,
    pub fast_mode: Option<bool>,
}

impl AppConfig {
    /// Path of the implicit config file under `root`.
    pub fn default_path(root: &Path) -> PathBuf {
        root.join(".disclosure").join("config.toml")
    }

    /// Load `.disclosure/config.toml` from `root`.
    /// Returns the defaults if the file doesn't exist or is invalid.
    pub fn load(root: &Path) -> Self {
        let path = Self::default_path(root);
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from_path(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("{e}; using defaults");
                Self::default()
            }
        }
    }

    /// Load config from a specific path. Errors are returned, not swallowed.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply `DISCLOSURE_*` variables. `lookup` is `std::env::var` in
    /// production and a map in tests.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup(ENV_API_BASE).filter(|v| !v.is_empty()) {
            self.api_base = v;
        }
        if let Some(v) = lookup(ENV_BACKEND_URL).filter(|v| !v.is_empty()) {
            self.backend_base = v;
        }
        if let Some(v) = lookup(ENV_PUBLISHABLE_KEY).filter(|v| !v.is_empty()) {
            self.identity.publishable_key = Some(v);
        }
        if let Some(v) = lookup(ENV_IDENTITY_REQUIRED) {
            self.identity.required = parse_flag(ENV_IDENTITY_REQUIRED, &v)?;
        }
        Ok(())
    }

    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(v) = &overrides.api_base {
            self.api_base = v.clone();
        }
        if let Some(v) = &overrides.backend_base {
            self.backend_base = v.clone();
        }
        if let Some(v) = overrides.fast_mode {
            self.fast_mode = v;
        }
    }

    /// Check the merged configuration. Runs after every layer is applied.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_url("api_base", &self.api_base)?;
        check_url("backend_base", &self.backend_base)?;
        check_limits("upload", &self.upload)?;
        check_limits("analyze", &self.analyze)?;

        let has_key = self
            .identity
            .publishable_key
            .as_deref()
            .is_some_and(|k| !k.trim().is_empty());
        if self.identity.required && !has_key {
            return Err(ConfigError::MissingPublishableKey);
        }
        Ok(())
    }

    /// Build the effective configuration from every layer.
    ///
    /// An explicit `config_path` must load; the implicit file under `root`
    /// only warns when it is broken.
    pub fn resolve<F>(
        root: &Path,
        config_path: Option<&Path>,
        lookup: F,
        overrides: &ConfigOverrides,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match config_path {
            Some(path) => Self::load_from_path(path)?,
            None => Self::load(root),
        };
        config.apply_env(lookup)?;
        config.apply_overrides(overrides);
        config.validate()?;
        tracing::debug!(
            api_base = %config.api_base,
            backend_base = %config.backend_base,
            fast_mode = config.fast_mode,
            "configuration resolved"
        );
        Ok(config)
    }
}

fn parse_flag(field: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidValue {
            field,
            reason: format!("{other:?} is not a boolean"),
        }),
    }
}

fn check_url(field: &'static str, value: &str) -> Result<(), ConfigError> {
    let ok = Url::parse(value)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
        .unwrap_or(false);
    if ok {
        Ok(())
    } else {
        Err(ConfigError::InvalidUrl {
            field,
            value: value.to_string(),
        })
    }
}

fn check_limits(field: &'static str, limits: &FileLimits) -> Result<(), ConfigError> {
    if limits.accepted_formats.is_empty() {
        return Err(ConfigError::InvalidValue {
            field,
            reason: "accepted_formats must not be empty".into(),
        });
    }
    if let Some(bad) = limits.accepted_formats.iter().find(|f| !f.starts_with('.')) {
        return Err(ConfigError::InvalidValue {
            field,
            reason: format!("format {bad:?} must start with '.'"),
        });
    }
    if limits.max_size_mb == 0 {
        return Err(ConfigError::InvalidValue {
            field,
            reason: "max_size_mb must be greater than zero".into(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn write_config(temp: &TempDir, body: &str) -> PathBuf {
        let dir = temp.path().join(".disclosure");
        std::fs::create_dir_all(&dir).expect("create .disclosure");
        let path = dir.join("config.toml");
        let mut file = std::fs::File::create(&path).expect("create config");
        writeln!(file, "{body}").expect("write config");
        path
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.api_base, "http://127.0.0.1:8000");
        assert_eq!(config.backend_base, "http://127.0.0.1:5000");
        assert!(config.fast_mode);
        assert_eq!(config.upload.accepted_formats, vec![".zip"]);
        assert_eq!(config.upload.max_size_mb, 200);
        assert_eq!(config.analyze.accepted_formats, vec![".pdf"]);
        assert_eq!(config.analyze.max_size_mb, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().expect("temp dir");
        assert_eq!(AppConfig::load(temp.path()), AppConfig::default());
    }

    #[test]
    fn test_load_valid_config() {
        let temp = TempDir::new().expect("temp dir");
        write_config(
            &temp,
            r#"
api_base = "https://api.example.test"
fast_mode = false

[upload]
accepted_formats = [".zip", ".pdf"]
max_size_mb = 500
"#,
        );

        let config = AppConfig::load(temp.path());
        assert_eq!(config.api_base, "https://api.example.test");
        assert_eq!(config.backend_base, DEFAULT_BACKEND_BASE);
        assert!(!config.fast_mode);
        assert_eq!(config.upload.accepted_formats, vec![".zip", ".pdf"]);
        assert_eq!(config.upload.max_size_mb, 500);
        assert_eq!(config.analyze, FileLimits::analyze_defaults());
    }

    #[test]
    fn test_invalid_implicit_config_falls_back() {
        let temp = TempDir::new().expect("temp dir");
        write_config(&temp, "api_base = [not toml");
        assert_eq!(AppConfig::load(temp.path()), AppConfig::default());
    }

    #[test]
    fn test_invalid_explicit_config_is_an_error() {
        let temp = TempDir::new().expect("temp dir");
        let path = write_config(&temp, "api_base = [not toml");
        let err = AppConfig::resolve(
            temp.path(),
            Some(&path),
            env(&[]),
            &ConfigOverrides::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));

        let missing = temp.path().join("nope.toml");
        let err = AppConfig::load_from_path(&missing).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_layer_precedence() {
        let temp = TempDir::new().expect("temp dir");
        write_config(
            &temp,
            r#"
api_base = "http://file.test:1"
backend_base = "http://file.test:2"
"#,
        );
        let overrides = ConfigOverrides {
            backend_base: Some("http://flag.test:3".into()),
            ..Default::default()
        };
        let config = AppConfig::resolve(
            temp.path(),
            None,
            env(&[
                (ENV_API_BASE, "http://env.test:4"),
                (ENV_BACKEND_URL, "http://env.test:5"),
            ]),
            &overrides,
        )
        .expect("resolve");

        assert_eq!(config.api_base, "http://env.test:4");
        assert_eq!(config.backend_base, "http://flag.test:3");
    }

    #[test]
    fn test_rejects_non_http_urls() {
        let temp = TempDir::new().expect("temp dir");
        let overrides = ConfigOverrides {
            api_base: Some("ftp://example.test".into()),
            ..Default::default()
        };
        let err = AppConfig::resolve(temp.path(), None, env(&[]), &overrides).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { field: "api_base", .. }));

        let overrides = ConfigOverrides {
            backend_base: Some("not a url".into()),
            ..Default::default()
        };
        assert!(AppConfig::resolve(temp.path(), None, env(&[]), &overrides).is_err());
    }

    #[test]
    fn test_identity_key_required_only_when_flagged() {
        let temp = TempDir::new().expect("temp dir");
        let none = ConfigOverrides::default();

        assert!(AppConfig::resolve(temp.path(), None, env(&[]), &none).is_ok());

        let err = AppConfig::resolve(
            temp.path(),
            None,
            env(&[(ENV_IDENTITY_REQUIRED, "true")]),
            &none,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingPublishableKey));

        let config = AppConfig::resolve(
            temp.path(),
            None,
            env(&[
                (ENV_IDENTITY_REQUIRED, "1"),
                (ENV_PUBLISHABLE_KEY, "pk_test_123"),
            ]),
            &none,
        )
        .expect("resolve");
        assert_eq!(config.identity.publishable_key.as_deref(), Some("pk_test_123"));

        let err = AppConfig::resolve(
            temp.path(),
            None,
            env(&[(ENV_IDENTITY_REQUIRED, "maybe")]),
            &none,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_rejects_bad_limits() {
        let mut config = AppConfig::default();
        config.upload.max_size_mb = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.analyze.accepted_formats = vec!["pdf".into()];
        assert!(config.validate().is_err());
    }
}
