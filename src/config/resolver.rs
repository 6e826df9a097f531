//! Where the API base URL and token come from.
//!
//! The token is taken from the first source that has one: process environment, then the
//! global `~/.cloudflare-cli/config.json`, then a local `.env` file. The base URL follows
//! the same order and falls back to [`DEFAULT_API_BASE`].

use crate::utils::error::{CliError, Result};
use crate::utils::validation::{validate_url, Validate};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_API_BASE: &str = "https://api.cloudflare.com/client/v4";
pub const ENV_API_TOKEN: &str = "CLOUDFLARE_API_TOKEN";
pub const ENV_API_BASE: &str = "CLOUDFLARE_API_BASE";

const CONFIG_DIR_NAME: &str = ".cloudflare-cli";
const CONFIG_FILE_NAME: &str = "config.json";
const DOTENV_FILE_NAME: &str = ".env";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub api_base: String,
    pub api_token: Option<String>,
}

impl Configuration {
    pub fn new(api_base: impl Into<String>, api_token: Option<String>) -> Self {
        Self {
            api_base: api_base.into(),
            api_token,
        }
    }

    pub fn has_token(&self) -> bool {
        self.api_token.is_some()
    }
}

impl Validate for Configuration {
    fn validate(&self) -> Result<()> {
        validate_url("api_base", &self.api_base)
    }
}

/// On-disk shape of the global config file. A field holding anything but a string is
/// treated as missing without discarding the other one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoredConfig {
    #[serde(default, deserialize_with = "string_or_none")]
    api_token: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    api_base: Option<String>,
}

fn string_or_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// The three places a configuration can come from.
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    pub env: HashMap<String, String>,
    pub global_file: Option<PathBuf>,
    pub dotenv_file: Option<PathBuf>,
}

impl ConfigSources {
    /// Snapshot of the real process environment, home directory and working directory.
    pub fn from_process() -> Self {
        let env = [ENV_API_TOKEN, ENV_API_BASE]
            .iter()
            .filter_map(|key| std::env::var(key).ok().map(|v| (key.to_string(), v)))
            .collect();

        Self {
            env,
            global_file: global_config_path(),
            dotenv_file: Some(PathBuf::from(DOTENV_FILE_NAME)),
        }
    }

    pub fn with_env(mut self, key: &str, value: &str) -> Self {
        self.env.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_global_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.global_file = Some(path.into());
        self
    }

    pub fn with_dotenv_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.dotenv_file = Some(path.into());
        self
    }

    fn var(&self, key: &str) -> Option<String> {
        non_empty(self.env.get(key).cloned())
    }
}

pub fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

pub fn resolve() -> Configuration {
    resolve_from(&ConfigSources::from_process())
}

pub fn resolve_from(sources: &ConfigSources) -> Configuration {
    let mut api_base = sources.var(ENV_API_BASE);
    let mut api_token = sources.var(ENV_API_TOKEN);

    if api_token.is_some() {
        tracing::debug!("Using API token from {}", ENV_API_TOKEN);
    }

    if api_token.is_none() {
        if let Some(stored) = sources.global_file.as_deref().and_then(read_stored_config) {
            api_token = non_empty(stored.api_token);
            api_base = api_base.or(non_empty(stored.api_base));
            if api_token.is_some() {
                tracing::debug!("Using API token from global config file");
            }
        }
    }

    if api_token.is_none() {
        if let Some(vars) = sources.dotenv_file.as_deref().and_then(read_dotenv) {
            api_token = non_empty(vars.get(ENV_API_TOKEN).cloned());
            api_base = api_base.or(non_empty(vars.get(ENV_API_BASE).cloned()));
            if api_token.is_some() {
                tracing::debug!("Using API token from .env file");
            }
        }
    }

    if api_token.is_none() {
        tracing::warn!("No Cloudflare API token found in any configuration source");
    }

    Configuration {
        api_base: api_base.unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
        api_token,
    }
}

/// Writes the global config file, replacing whatever was there.
pub fn persist(api_token: &str, api_base: &str) -> Result<PathBuf> {
    let path = global_config_path().ok_or_else(|| CliError::Configuration {
        message: "Could not determine the home directory".to_string(),
    })?;
    persist_to(&path, api_token, api_base)?;
    Ok(path)
}

pub fn persist_to(path: &Path, api_token: &str, api_base: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let stored = StoredConfig {
        api_token: Some(api_token.to_string()),
        api_base: Some(api_base.to_string()),
    };
    fs::write(path, serde_json::to_string_pretty(&stored)?)?;

    tracing::info!("Saved configuration to {}", path.display());
    Ok(())
}

fn read_stored_config(path: &Path) -> Option<StoredConfig> {
    if !path.exists() {
        return None;
    }

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::debug!("Ignoring unreadable config file {}: {}", path.display(), e);
            return None;
        }
    };

    match serde_json::from_str(&content) {
        Ok(stored) => Some(stored),
        Err(e) => {
            tracing::debug!("Ignoring malformed config file {}: {}", path.display(), e);
            None
        }
    }
}

fn read_dotenv(path: &Path) -> Option<HashMap<String, String>> {
    let iter = match dotenv::from_path_iter(path) {
        Ok(iter) => iter,
        Err(e) => {
            tracing::debug!("No usable .env at {}: {}", path.display(), e);
            return None;
        }
    };

    let vars = iter
        .filter_map(|item| match item {
            Ok(pair) => Some(pair),
            Err(e) => {
                tracing::debug!("Skipping .env line: {}", e);
                None
            }
        })
        .collect();
    Some(vars)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    struct Fixture {
        _dir: TempDir,
        global: PathBuf,
        dotenv: PathBuf,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            let global = dir.path().join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME);
            let dotenv = dir.path().join(DOTENV_FILE_NAME);
            Self {
                _dir: dir,
                global,
                dotenv,
            }
        }

        fn sources(&self) -> ConfigSources {
            ConfigSources::default()
                .with_global_file(&self.global)
                .with_dotenv_file(&self.dotenv)
        }

        fn write_global(&self, content: &str) {
            fs::create_dir_all(self.global.parent().unwrap()).unwrap();
            fs::write(&self.global, content).unwrap();
        }

        fn write_dotenv(&self, content: &str) {
            fs::write(&self.dotenv, content).unwrap();
        }
    }

    #[derive(Clone, Copy, Debug)]
    enum GlobalFile {
        Absent,
        Present,
        Malformed,
    }

    #[test]
    fn test_precedence_matrix() {
        for env_token in [false, true] {
            for global in [GlobalFile::Absent, GlobalFile::Present, GlobalFile::Malformed] {
                for dotenv in [false, true] {
                    let fixture = Fixture::new();
                    let mut sources = fixture.sources();
                    if env_token {
                        sources = sources.with_env(ENV_API_TOKEN, "env-token");
                    }
                    match global {
                        GlobalFile::Absent => {}
                        GlobalFile::Present => fixture.write_global(
                            r#"{"api_token": "file-token", "api_base": "https://file.example/v4"}"#,
                        ),
                        GlobalFile::Malformed => fixture.write_global("{not json"),
                    }
                    if dotenv {
                        fixture.write_dotenv("CLOUDFLARE_API_TOKEN=dotenv-token\n");
                    }

                    let expected = if env_token {
                        Some("env-token")
                    } else if matches!(global, GlobalFile::Present) {
                        Some("file-token")
                    } else if dotenv {
                        Some("dotenv-token")
                    } else {
                        None
                    };

                    let config = resolve_from(&sources);
                    assert_eq!(
                        config.api_token.as_deref(),
                        expected,
                        "env={env_token} global={global:?} dotenv={dotenv}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_defaults_when_nothing_is_configured() {
        let fixture = Fixture::new();
        let config = resolve_from(&fixture.sources());
        assert_eq!(config, Configuration::new(DEFAULT_API_BASE, None));
        assert!(!config.has_token());
    }

    #[test]
    fn test_env_base_without_env_token() {
        let fixture = Fixture::new();
        fixture.write_dotenv("CLOUDFLARE_API_TOKEN=dotenv-token\nCLOUDFLARE_API_BASE=http://dotenv.example\n");
        let sources = fixture
            .sources()
            .with_env(ENV_API_BASE, "http://env.example");

        let config = resolve_from(&sources);
        assert_eq!(config.api_token.as_deref(), Some("dotenv-token"));
        assert_eq!(config.api_base, "http://env.example");
    }

    #[test]
    fn test_dotenv_base_used_when_unset() {
        let fixture = Fixture::new();
        fixture.write_dotenv("CLOUDFLARE_API_TOKEN=dotenv-token\nCLOUDFLARE_API_BASE=http://dotenv.example\n");

        let config = resolve_from(&fixture.sources());
        assert_eq!(config.api_base, "http://dotenv.example");
    }

    #[test]
    fn test_global_file_without_base_keeps_default() {
        let fixture = Fixture::new();
        fixture.write_global(r#"{"api_token": "file-token"}"#);

        let config = resolve_from(&fixture.sources());
        assert_eq!(config.api_token.as_deref(), Some("file-token"));
        assert_eq!(config.api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn test_non_object_global_file_is_ignored() {
        let fixture = Fixture::new();
        fixture.write_global("[1, 2, 3]");

        let config = resolve_from(&fixture.sources());
        assert!(config.api_token.is_none());
    }

    #[test]
    fn test_non_string_token_keeps_file_base() {
        let fixture = Fixture::new();
        fixture.write_global(r#"{"api_token": 123, "api_base": "https://file.example/v4"}"#);

        let config = resolve_from(&fixture.sources());
        assert!(config.api_token.is_none());
        assert_eq!(config.api_base, "https://file.example/v4");

        fixture.write_dotenv("CLOUDFLARE_API_TOKEN=dotenv-token\n");
        let config = resolve_from(&fixture.sources());
        assert_eq!(config.api_token.as_deref(), Some("dotenv-token"));
        assert_eq!(config.api_base, "https://file.example/v4");
    }

    #[test]
    fn test_empty_env_token_counts_as_absent() {
        let fixture = Fixture::new();
        fixture.write_global(r#"{"api_token": "file-token", "api_base": "https://file.example/v4"}"#);
        let sources = fixture.sources().with_env(ENV_API_TOKEN, "");

        let config = resolve_from(&sources);
        assert_eq!(config.api_token.as_deref(), Some("file-token"));
        assert_eq!(config.api_base, "https://file.example/v4");
    }

    #[test]
    fn test_persist_then_resolve() {
        let fixture = Fixture::new();
        persist_to(&fixture.global, "tokABC", DEFAULT_API_BASE).unwrap();

        let config = resolve_from(&fixture.sources());
        assert_eq!(
            config,
            Configuration::new(DEFAULT_API_BASE, Some("tokABC".to_string()))
        );
    }

    #[test]
    fn test_persist_overwrites_without_merging() {
        let fixture = Fixture::new();
        fixture.write_global(r#"{"api_token": "old", "api_base": "https://old.example", "extra": 1}"#);

        persist_to(&fixture.global, "new", "https://new.example").unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&fixture.global).unwrap()).unwrap();
        assert_eq!(
            written,
            serde_json::json!({"api_token": "new", "api_base": "https://new.example"})
        );
    }

    #[test]
    fn test_validate_rejects_bad_base() {
        assert!(Configuration::new("not a url", None).validate().is_err());
        assert!(Configuration::new(DEFAULT_API_BASE, None).validate().is_ok());
    }
}
