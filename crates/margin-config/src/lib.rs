use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

/// OpenAI-compatible chat-completions endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
/// Fallback for the API key when the config file has none.
pub const API_KEY_ENV: &str = "MARGIN_API_KEY";
pub const DEFAULT_CONTEXT_WINDOW: usize = 2000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

const LOCAL_HOSTS: [&str; 3] = ["localhost", "127.0.0.1", "::1"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error(
        "{endpoint} is a hosted endpoint and needs an API key: set api_key in the config file or {var}",
        var = API_KEY_ENV
    )]
    MissingCredential { endpoint: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub endpoint: String,
    pub model: String,
    /// Literal key or a shell reference such as `$OPENAI_API_KEY`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Characters of document sent on each side of the cursor.
    pub context_window: usize,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            context_window: DEFAULT_CONTEXT_WINDOW,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Endpoint details ready to hand to a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/margin");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// The API key from the config file, else from the environment.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.resolve_api_key_from(|name| std::env::var(name).ok())
    }

    /// As [`Config::resolve_api_key`], reading variables through `env`.
    pub fn resolve_api_key_from<F>(&self, env: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.api_key
            .as_deref()
            .and_then(|raw| {
                // A reference to an unset variable counts as no key.
                shellexpand::full_with_context(raw, || None::<&str>, |name| {
                    env(name).map(Some).ok_or(std::env::VarError::NotPresent)
                })
                .ok()
                .map(|key| key.into_owned())
            })
            .filter(|key| !key.trim().is_empty())
            .or_else(|| env(API_KEY_ENV))
            .filter(|key| !key.trim().is_empty())
    }

    /// Host part of the endpoint URL, without port or brackets.
    pub fn endpoint_host(&self) -> Option<String> {
        let url = Url::parse(&self.endpoint).ok()?;
        let host = url.host_str()?.trim_start_matches('[').trim_end_matches(']');
        (!host.is_empty()).then(|| host.to_string())
    }

    /// Anything that is not a loopback host needs a credential.
    pub fn is_hosted(&self) -> bool {
        self.endpoint_host()
            .is_none_or(|host| !LOCAL_HOSTS.contains(&host.as_str()))
    }

    pub fn credentials(&self) -> Result<Credentials, ConfigError> {
        self.credentials_from(|name| std::env::var(name).ok())
    }

    pub fn credentials_from<F>(&self, env: F) -> Result<Credentials, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = self.resolve_api_key_from(env);
        if api_key.is_none() && self.is_hosted() {
            return Err(ConfigError::MissingCredential {
                endpoint: self.endpoint.clone(),
            });
        }
        Ok(Credentials {
            endpoint: self.endpoint.clone(),
            model: self.model.clone(),
            api_key,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/margin/config.toml"));
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config: Config = toml::from_str(
            r#"
endpoint = "http://localhost:11434/v1/chat/completions"
context_window = 500
"#,
        )
        .unwrap();
        assert_eq!(config.context_window, 500);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_load_invalid_toml_is_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "endpoint = [").unwrap();

        let err = Config::load_from_path(&config_file).unwrap_err();

        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested/config.toml");
        let test_config = Config {
            model: "local-model".to_string(),
            api_key: Some("$OPENAI_API_KEY".to_string()),
            ..Config::default()
        };

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }

    #[test]
    fn test_api_key_from_config_wins() {
        let config = Config {
            api_key: Some("sk-file".to_string()),
            ..Config::default()
        };
        let env = |_: &str| Some("sk-env".to_string());
        assert_eq!(config.resolve_api_key_from(env).as_deref(), Some("sk-file"));
    }

    #[test]
    fn test_api_key_reference_is_expanded() {
        let config = Config {
            api_key: Some("$OPENAI_KEY".to_string()),
            ..Config::default()
        };
        let env = |name: &str| (name == "OPENAI_KEY").then(|| "sk-ref".to_string());
        assert_eq!(config.resolve_api_key_from(env).as_deref(), Some("sk-ref"));
    }

    #[test]
    fn test_unset_reference_falls_back_to_environment() {
        let config = Config {
            api_key: Some("$UNSET_KEY".to_string()),
            ..Config::default()
        };
        let env = |name: &str| (name == API_KEY_ENV).then(|| "sk-env".to_string());
        assert_eq!(config.resolve_api_key_from(env).as_deref(), Some("sk-env"));
    }

    #[test]
    fn test_api_key_falls_back_to_environment() {
        let config = Config::default();
        let env = |name: &str| (name == API_KEY_ENV).then(|| "sk-env".to_string());
        assert_eq!(config.resolve_api_key_from(env).as_deref(), Some("sk-env"));
    }

    #[test]
    fn test_api_key_from_process_environment() {
        unsafe {
            env::set_var("MARGIN_TEST_KEY", "sk-process");
        }

        let config = Config {
            api_key: Some("${MARGIN_TEST_KEY}".to_string()),
            ..Config::default()
        };
        assert_eq!(config.resolve_api_key().as_deref(), Some("sk-process"));

        unsafe {
            env::remove_var("MARGIN_TEST_KEY");
        }
    }

    #[test]
    fn test_endpoint_host() {
        let host = |endpoint: &str| {
            Config {
                endpoint: endpoint.to_string(),
                ..Config::default()
            }
            .endpoint_host()
        };
        assert_eq!(host(DEFAULT_ENDPOINT).as_deref(), Some("api.openai.com"));
        assert_eq!(host("http://localhost:8080/v1").as_deref(), Some("localhost"));
        assert_eq!(host("http://[::1]:8080/v1").as_deref(), Some("::1"));
        assert_eq!(host("http://user@127.0.0.1/v1").as_deref(), Some("127.0.0.1"));
        assert_eq!(host("HTTP://LocalHost:11434/v1").as_deref(), Some("localhost"));
        assert_eq!(host("").as_deref(), None);
        assert_eq!(host("localhost:8080/v1").as_deref(), None);
    }

    #[test]
    fn test_unparseable_endpoint_counts_as_hosted() {
        let config = Config {
            endpoint: "not a url".to_string(),
            ..Config::default()
        };
        assert!(config.is_hosted());
        assert!(matches!(
            config.credentials_from(no_env),
            Err(ConfigError::MissingCredential { .. })
        ));
    }

    #[test]
    fn test_hosted_endpoint_needs_a_key() {
        let err = Config::default().credentials_from(no_env).unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredential { .. }));
        assert!(err.to_string().contains(API_KEY_ENV));
    }

    #[test]
    fn test_local_endpoint_needs_no_key() {
        let config = Config {
            endpoint: "http://127.0.0.1:11434/v1/chat/completions".to_string(),
            ..Config::default()
        };
        let credentials = config.credentials_from(no_env).unwrap();
        assert_eq!(credentials.api_key, None);
        assert_eq!(credentials.model, DEFAULT_MODEL);
    }
}
