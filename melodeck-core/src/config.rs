use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MelodeckConfig {
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub kuwo: KuwoConfig,
    #[serde(default)]
    pub lyrics: LyricsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Defaults applied to every HTTP client the app creates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default)]
    pub retry: u32,
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

const fn default_timeout_ms() -> u64 {
    30_000
}

const fn default_retry_delay_ms() -> u64 {
    1000
}

impl HttpConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    #[must_use]
    pub const fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            retry: 0,
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

/// Remote catalog used for song search and remote lyrics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KuwoConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_kuwo_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_kuwo_retry")]
    pub retry: u32,
}

const fn default_true() -> bool {
    true
}

fn default_kuwo_base_url() -> String {
    "https://kw-api.cenguigui.cn".to_string()
}

const fn default_kuwo_retry() -> u32 {
    1
}

impl KuwoConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for KuwoConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: default_kuwo_base_url(),
            timeout_ms: default_timeout_ms(),
            retry: default_kuwo_retry(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LyricsConfig {
    /// Provider priority: providers are tried in order
    #[serde(default = "default_providers")]
    pub providers: Vec<LyricsProviderType>,
}

fn default_providers() -> Vec<LyricsProviderType> {
    vec![LyricsProviderType::Local, LyricsProviderType::Kuwo]
}

impl Default for LyricsConfig {
    fn default() -> Self {
        Self {
            providers: default_providers(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LyricsProviderType {
    Local,
    Kuwo,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Also write logs to ~/.config/melodeck/melodeck.log
    #[serde(default)]
    pub file_enabled: bool,
}

impl MelodeckConfig {
    /// Get the config file path (~/.config/melodeck/config.toml)
    #[must_use]
    pub fn config_path() -> PathBuf {
        crate::paths::config_path()
    }

    /// Load config from file or create template on first run
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ConfigNotFound`] after writing the template, or an
    /// error if the config file cannot be read, parsed or validated.
    pub fn load_or_create() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            if let Some(parent) = config_path.parent() {
                fs::create_dir_all(parent)?;
            }

            fs::write(&config_path, CONFIG_TEMPLATE)?;
            info!("Wrote config template to {}", config_path.display());

            return Err(CoreError::ConfigNotFound { path: config_path });
        }

        let content = fs::read_to_string(&config_path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate a config document
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or a field is invalid.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate field values that serde cannot check
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ConfigInvalid`] describing the first invalid field.
    pub fn validate(&self) -> Result<()> {
        if self.http.timeout_ms == 0 {
            return Err(CoreError::ConfigInvalid {
                message: "http.timeout_ms must be greater than zero".into(),
            });
        }
        if self.kuwo.timeout_ms == 0 {
            return Err(CoreError::ConfigInvalid {
                message: "kuwo.timeout_ms must be greater than zero".into(),
            });
        }

        match url::Url::parse(&self.kuwo.base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => {
                return Err(CoreError::ConfigInvalid {
                    message: format!("kuwo.base_url has unsupported scheme: {}", url.scheme()),
                });
            }
            Err(e) => {
                return Err(CoreError::ConfigInvalid {
                    message: format!("kuwo.base_url is not a valid URL: {e}"),
                });
            }
        }

        Ok(())
    }
}

/// Commented template written on first run
pub const CONFIG_TEMPLATE: &str = r#"# Melodeck Configuration
# ~/.config/melodeck/config.toml

[http]
# Defaults for HTTP requests
timeout_ms = 30000
# Extra attempts after a network failure (HTTP error statuses are never retried)
retry = 0
retry_delay_ms = 1000

[kuwo]
# Remote catalog used for search and remote lyrics
enabled = true
base_url = "https://kw-api.cenguigui.cn"
timeout_ms = 30000
retry = 1

[lyrics]
# Provider priority: "local", "kuwo"
# Providers are tried in order; first successful result wins
providers = ["local", "kuwo"]

[logging]
# Also write logs to ~/.config/melodeck/melodeck.log
file_enabled = false
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_parses_to_defaults() {
        let config = MelodeckConfig::from_toml_str(CONFIG_TEMPLATE).unwrap();
        assert_eq!(config, MelodeckConfig::default());
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = MelodeckConfig::from_toml_str("").unwrap();
        assert_eq!(config.http.timeout(), Duration::from_secs(30));
        assert_eq!(config.http.retry, 0);
        assert_eq!(config.http.retry_delay(), Duration::from_secs(1));
        assert_eq!(config.kuwo.retry, 1);
        assert_eq!(
            config.lyrics.providers,
            vec![LyricsProviderType::Local, LyricsProviderType::Kuwo]
        );
        assert!(!config.logging.file_enabled);
    }

    #[test]
    fn test_partial_override() {
        let config = MelodeckConfig::from_toml_str(
            r#"
[http]
retry = 3

[lyrics]
providers = ["kuwo"]
"#,
        )
        .unwrap();
        assert_eq!(config.http.retry, 3);
        assert_eq!(config.http.timeout_ms, 30_000);
        assert_eq!(config.lyrics.providers, vec![LyricsProviderType::Kuwo]);
    }

    #[test]
    fn test_invalid_base_url() {
        let err = MelodeckConfig::from_toml_str("[kuwo]\nbase_url = \"not a url\"").unwrap_err();
        assert!(matches!(err, CoreError::ConfigInvalid { .. }));

        let err = MelodeckConfig::from_toml_str("[kuwo]\nbase_url = \"ftp://host\"").unwrap_err();
        assert!(matches!(err, CoreError::ConfigInvalid { .. }));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = MelodeckConfig::from_toml_str("[http]\ntimeout_ms = 0").unwrap_err();
        assert!(matches!(err, CoreError::ConfigInvalid { .. }));
    }

    #[test]
    fn test_syntax_error() {
        let err = MelodeckConfig::from_toml_str("[http\nretry = ").unwrap_err();
        assert!(matches!(err, CoreError::ConfigParseError(_)));
    }

    #[test]
    fn test_unknown_provider_rejected() {
        assert!(MelodeckConfig::from_toml_str("[lyrics]\nproviders = [\"genius\"]").is_err());
    }
}
