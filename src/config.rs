use crate::notifier::template;
use serde::{Deserialize, Serialize};
use std::{env, io::ErrorKind, path::PathBuf, time::Duration};
use thiserror::Error;

const DEFAULT_CONFIG_FILE_NAME: &str = "prherald.yaml";
const CONFIG_PATH_ENV: &str = "PRHERALD_CONFIG";

const DEFAULT_CACHE_PATH: &str = "data/pull_requests.json";
const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
const DEFAULT_TWITTER_API_URL: &str = "https://api.twitter.com";
const DEFAULT_MAX_LENGTH: usize = 280;
const DEFAULT_DELAY_SECS: u64 = 10;
const MIN_DELAY_SECS: u64 = DEFAULT_DELAY_SECS;
// room for at least one character plus the ellipsis
const MIN_MAX_LENGTH: usize = 2;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        cause: std::io::Error,
    },
    #[error("Failed to parse config file")]
    Parse {
        #[source]
        cause: serde_yaml::Error,
    },
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{field} must be at least {min}, got {value}")]
    TooSmall {
        field: &'static str,
        min: u64,
        value: u64,
    },
    #[error("Invalid message template")]
    Template {
        #[source]
        cause: handlebars::TemplateError,
    },
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub repository: RepositoryConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub github: GithubConfig,
    #[serde(default)]
    pub twitter: TwitterConfig,
    #[serde(default)]
    pub notifier: NotifierConfig,
}

impl Config {
    /// Reads the YAML file named by `PRHERALD_CONFIG` (or `prherald.yaml`) if
    /// present, then applies environment overrides and validates the result.
    pub async fn load() -> Result<Config, ConfigError> {
        let path = env::var(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE_NAME));

        let yaml = match tokio::fs::read_to_string(&path).await {
            Ok(content) => Some(content),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::debug!("no config file at {}, using defaults", path.display());
                None
            }
            Err(cause) => return Err(ConfigError::Read { path, cause }),
        };

        Config::from_sources(yaml.as_deref(), |key| env::var(key).ok())
    }

    pub fn from_sources(
        yaml: Option<&str>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Config, ConfigError> {
        let mut config = match yaml {
            Some(yaml) => serde_yaml::from_str::<Config>(yaml)
                .map_err(|cause| ConfigError::Parse { cause })?,
            None => Config::default(),
        };

        config.apply_env(env);
        config.validate()?;

        Ok(config)
    }

    fn apply_env(&mut self, env: impl Fn(&str) -> Option<String>) {
        let overrides: [(&str, &mut String); 6] = [
            ("REPO_OWNER", &mut self.repository.owner),
            ("REPO", &mut self.repository.repo),
            ("CONSUMER_KEY", &mut self.twitter.credentials.consumer_key),
            ("CONSUMER_SECRET", &mut self.twitter.credentials.consumer_secret),
            ("ACCESS_TOKEN", &mut self.twitter.credentials.access_token),
            (
                "ACCESS_TOKEN_SECRET",
                &mut self.twitter.credentials.access_token_secret,
            ),
        ];

        for (key, field) in overrides {
            if let Some(value) = env(key) {
                *field = value;
            }
        }

        if let Some(token) = env("GITHUB_TOKEN").filter(|t| !t.is_empty()) {
            self.github.token = Some(token);
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.repository.owner.is_empty() {
            return Err(ConfigError::Missing("REPO_OWNER"));
        }
        if self.repository.repo.is_empty() {
            return Err(ConfigError::Missing("REPO"));
        }

        if !self.notifier.dry_run {
            let credentials = &self.twitter.credentials;
            let required = [
                ("CONSUMER_KEY", &credentials.consumer_key),
                ("CONSUMER_SECRET", &credentials.consumer_secret),
                ("ACCESS_TOKEN", &credentials.access_token),
                ("ACCESS_TOKEN_SECRET", &credentials.access_token_secret),
            ];
            if let Some((key, _)) = required.into_iter().find(|(_, value)| value.is_empty()) {
                return Err(ConfigError::Missing(key));
            }
        }

        let notifier = &self.notifier;
        if notifier.delay_secs < MIN_DELAY_SECS {
            return Err(ConfigError::TooSmall {
                field: "notifier.delay_secs",
                min: MIN_DELAY_SECS,
                value: notifier.delay_secs,
            });
        }
        if notifier.max_length < MIN_MAX_LENGTH {
            return Err(ConfigError::TooSmall {
                field: "notifier.max_length",
                min: MIN_MAX_LENGTH as u64,
                value: notifier.max_length as u64,
            });
        }

        template::handlebars(notifier.template.as_deref())
            .map_err(|cause| ConfigError::Template { cause })?;

        Ok(())
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RepositoryConfig {
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub repo: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "CacheConfig::default_path")]
    pub path: PathBuf,
}

impl CacheConfig {
    fn default_path() -> PathBuf {
        PathBuf::from(DEFAULT_CACHE_PATH)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfig {
            path: CacheConfig::default_path(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GithubConfig {
    #[serde(default = "GithubConfig::default_api_url")]
    pub api_url: String,
    #[serde(skip)]
    pub token: Option<String>,
}

impl GithubConfig {
    fn default_api_url() -> String {
        DEFAULT_GITHUB_API_URL.to_owned()
    }
}

impl Default for GithubConfig {
    fn default() -> Self {
        GithubConfig {
            api_url: GithubConfig::default_api_url(),
            token: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TwitterConfig {
    #[serde(default = "TwitterConfig::default_api_url")]
    pub api_url: String,
    #[serde(skip)]
    pub credentials: Credentials,
}

impl TwitterConfig {
    fn default_api_url() -> String {
        DEFAULT_TWITTER_API_URL.to_owned()
    }
}

impl Default for TwitterConfig {
    fn default() -> Self {
        TwitterConfig {
            api_url: TwitterConfig::default_api_url(),
            credentials: Credentials::default(),
        }
    }
}

/// OAuth 1.0a user-context credentials. Only ever read from the environment.
#[derive(Clone, Default)]
pub struct Credentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token: String,
    pub access_token_secret: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"***")
            .field("access_token", &self.access_token)
            .field("access_token_secret", &"***")
            .finish()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NotifierConfig {
    /// Handlebars template; the built-in announcement is used when unset.
    pub template: Option<String>,
    #[serde(default = "NotifierConfig::default_max_length")]
    pub max_length: usize,
    #[serde(default = "NotifierConfig::default_delay_secs")]
    pub delay_secs: u64,
    #[serde(default)]
    pub dry_run: bool,
}

impl NotifierConfig {
    fn default_max_length() -> usize {
        DEFAULT_MAX_LENGTH
    }

    fn default_delay_secs() -> u64 {
        DEFAULT_DELAY_SECS
    }

    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.delay_secs)
    }
}

impl Default for NotifierConfig {
    fn default() -> Self {
        NotifierConfig {
            template: None,
            max_length: NotifierConfig::default_max_length(),
            delay_secs: NotifierConfig::default_delay_secs(),
            dry_run: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const FULL_ENV: &[(&str, &str)] = &[
        ("REPO_OWNER", "polkadot-fellows"),
        ("REPO", "RFCs"),
        ("CONSUMER_KEY", "ck"),
        ("CONSUMER_SECRET", "cs"),
        ("ACCESS_TOKEN", "at"),
        ("ACCESS_TOKEN_SECRET", "ats"),
    ];

    #[test]
    fn should_use_defaults_without_a_file() -> Result<(), ConfigError> {
        let config = Config::from_sources(None, env_from(FULL_ENV))?;

        assert_eq!(config.repository.owner, "polkadot-fellows");
        assert_eq!(config.repository.repo, "RFCs");
        assert_eq!(config.cache.path, PathBuf::from("data/pull_requests.json"));
        assert_eq!(config.github.api_url, "https://api.github.com");
        assert_eq!(config.github.token, None);
        assert_eq!(config.twitter.api_url, "https://api.twitter.com");
        assert_eq!(config.twitter.credentials.consumer_secret, "cs");
        assert_eq!(config.notifier.max_length, 280);
        assert_eq!(config.notifier.delay(), Duration::from_secs(10));
        assert!(!config.notifier.dry_run);
        Ok(())
    }

    #[test]
    fn should_let_env_override_the_file() -> Result<(), ConfigError> {
        let yaml = r#"
repository:
  owner: someone
  repo: something
cache:
  path: /var/lib/prherald/state.json
notifier:
  delay_secs: 30
  template: "New PR #{{number}}: {{title}}"
"#;
        let mut env = FULL_ENV.to_vec();
        env.push(("GITHUB_TOKEN", "ghp_token"));

        let config = Config::from_sources(Some(yaml), env_from(&env))?;

        assert_eq!(config.repository.owner, "polkadot-fellows");
        assert_eq!(
            config.cache.path,
            PathBuf::from("/var/lib/prherald/state.json")
        );
        assert_eq!(config.notifier.delay_secs, 30);
        assert_eq!(config.github.token.as_deref(), Some("ghp_token"));
        Ok(())
    }

    #[test]
    fn should_require_repository_identity() {
        let result = Config::from_sources(None, env_from(&FULL_ENV[1..]));

        assert!(matches!(result, Err(ConfigError::Missing("REPO_OWNER"))));
    }

    #[test]
    fn should_require_credentials_unless_dry_run() -> Result<(), ConfigError> {
        let env = &FULL_ENV[..5];

        let result = Config::from_sources(None, env_from(env));
        assert!(matches!(
            result,
            Err(ConfigError::Missing("ACCESS_TOKEN_SECRET"))
        ));

        let config = Config::from_sources(Some("notifier:\n  dry_run: true\n"), env_from(env))?;
        assert!(config.notifier.dry_run);
        Ok(())
    }

    #[test]
    fn should_reject_a_broken_template() {
        let yaml = "notifier:\n  template: \"{{#if title}}unterminated\"\n";

        let result = Config::from_sources(Some(yaml), env_from(FULL_ENV));

        assert!(matches!(result, Err(ConfigError::Template { .. })));
    }

    #[test]
    fn should_reject_a_delay_below_ten_seconds() -> Result<(), ConfigError> {
        let result =
            Config::from_sources(Some("notifier:\n  delay_secs: 0\n"), env_from(FULL_ENV));
        assert!(matches!(
            result,
            Err(ConfigError::TooSmall {
                field: "notifier.delay_secs",
                min: 10,
                value: 0,
            })
        ));

        let result =
            Config::from_sources(Some("notifier:\n  delay_secs: 9\n"), env_from(FULL_ENV));
        assert!(matches!(result, Err(ConfigError::TooSmall { value: 9, .. })));

        let config =
            Config::from_sources(Some("notifier:\n  delay_secs: 10\n"), env_from(FULL_ENV))?;
        assert_eq!(config.notifier.delay(), Duration::from_secs(10));
        Ok(())
    }

    #[test]
    fn should_reject_a_length_that_cannot_hold_a_shortened_message() -> Result<(), ConfigError> {
        for max_length in [0, 1] {
            let yaml = format!("notifier:\n  max_length: {}\n", max_length);

            let result = Config::from_sources(Some(&yaml), env_from(FULL_ENV));

            assert!(matches!(
                result,
                Err(ConfigError::TooSmall {
                    field: "notifier.max_length",
                    ..
                })
            ));
        }

        let config =
            Config::from_sources(Some("notifier:\n  max_length: 2\n"), env_from(FULL_ENV))?;
        assert_eq!(config.notifier.max_length, 2);
        Ok(())
    }

    #[test]
    fn should_not_print_secrets() {
        let credentials = Credentials {
            consumer_key: "ck".to_owned(),
            consumer_secret: "super-secret".to_owned(),
            access_token: "at".to_owned(),
            access_token_secret: "also-secret".to_owned(),
        };

        let printed = format!("{:?}", credentials);

        assert!(!printed.contains("super-secret"));
        assert!(!printed.contains("also-secret"));
    }
}
