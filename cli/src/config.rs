//! Configuration and secret loading for the sep6 CLI
//!
//! Settings come from a TOML file, found via `--config`, then `$SEP6_CONFIG`,
//! then `~/.sep6/config.toml`. Command-line flags win over file values.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use zeroize::Zeroize;

use sep6_client::webhook::DEFAULT_MAX_AGE_MINUTES;
use sep6_client::{ClientConfig, OverflowPolicy, PoolConfig};

/// Environment variable naming a config file
pub const CONFIG_ENV: &str = "SEP6_CONFIG";
/// Environment variable holding the wallet secret seed
pub const SECRET_ENV: &str = "SEP6_SECRET_KEY";

const SEP6_DIR: &str = ".sep6";
const CONFIG_FILE: &str = "config.toml";
const DEFAULT_HORIZON_URL: &str = "https://horizon.stellar.org";
const DEFAULT_LISTEN: &str = "127.0.0.1:8000";
const DEFAULT_WEBHOOK_PATH: &str = "/webhook";

/// Contents of the config file
#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub anchor_url: Option<String>,
    #[serde(default)]
    pub horizon_url: Option<String>,
    #[serde(default)]
    pub home_domain: Option<String>,
    /// Wallet secret seed (`S...`); prefer `SEP6_SECRET_KEY` or the prompt
    #[serde(default)]
    pub secret_key: Option<String>,
    #[serde(default)]
    pub webhook: WebhookConfig,
}

impl Drop for FileConfig {
    fn drop(&mut self) {
        if let Some(secret) = self.secret_key.as_mut() {
            secret.zeroize();
        }
    }
}

/// `[webhook]` section
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct WebhookConfig {
    pub listen: String,
    pub path: String,
    pub max_age_minutes: u64,
    pub workers: usize,
    pub queue_capacity: usize,
    pub overflow: OverflowPolicy,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        let pool = PoolConfig::default();
        Self {
            listen: DEFAULT_LISTEN.to_string(),
            path: DEFAULT_WEBHOOK_PATH.to_string(),
            max_age_minutes: DEFAULT_MAX_AGE_MINUTES,
            workers: pool.workers,
            queue_capacity: pool.queue_capacity,
            overflow: pool.overflow,
        }
    }
}

impl WebhookConfig {
    pub fn pool_config(&self) -> PoolConfig {
        PoolConfig {
            workers: self.workers,
            queue_capacity: self.queue_capacity,
            overflow: self.overflow,
        }
    }
}

/// Flag values that override the file
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub anchor_url: Option<String>,
    pub home_domain: Option<String>,
}

/// Fully resolved, non-secret settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub anchor_url: String,
    pub horizon_url: String,
    pub home_domain: String,
    pub webhook: WebhookConfig,
}

impl Settings {
    /// Build the client configuration, taking ownership of the secret
    pub fn client_config(&self, secret_key: String) -> ClientConfig {
        let mut config = ClientConfig::new(
            secret_key,
            self.anchor_url.clone(),
            self.horizon_url.clone(),
            self.home_domain.clone(),
        );
        config.max_age_minutes = self.webhook.max_age_minutes;
        config
    }
}

/// Get the sep6 directory path
pub fn sep6_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(SEP6_DIR))
        .context("Could not find home directory")
}

/// Get the default config file path
pub fn default_config_path() -> Result<PathBuf> {
    Ok(sep6_dir()?.join(CONFIG_FILE))
}

/// Pick the config file to load
///
/// An explicit flag or env path must exist; the default location is optional.
pub fn resolve_config_path(
    flag: Option<&Path>,
    env: Option<OsString>,
    default: Option<PathBuf>,
) -> Result<Option<PathBuf>> {
    let explicit = flag
        .map(Path::to_path_buf)
        .or_else(|| env.filter(|v| !v.is_empty()).map(PathBuf::from));

    if let Some(path) = explicit {
        if !path.exists() {
            bail!("Config file not found at {}", path.display());
        }
        return Ok(Some(path));
    }

    Ok(default.filter(|path| path.exists()))
}

/// Parse config file contents
pub fn parse_config(text: &str) -> Result<FileConfig> {
    toml::from_str(text).context("Failed to parse config file")
}

/// Load config from disk
pub fn load_config(path: &Path) -> Result<FileConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    parse_config(&text)
}

/// Merge flags over file values and check required settings
pub fn resolve_settings(file: &FileConfig, overrides: &Overrides) -> Result<Settings> {
    let anchor_url = overrides
        .anchor_url
        .clone()
        .or_else(|| file.anchor_url.clone())
        .filter(|v| !v.is_empty())
        .context("No anchor URL configured. Set anchor_url in the config file or pass --anchor-url")?;

    let home_domain = overrides
        .home_domain
        .clone()
        .or_else(|| file.home_domain.clone())
        .filter(|v| !v.is_empty())
        .context("No home domain configured. Set home_domain in the config file or pass --home-domain")?;

    let horizon_url = file
        .horizon_url
        .clone()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_HORIZON_URL.to_string());

    Ok(Settings {
        anchor_url,
        horizon_url,
        home_domain,
        webhook: file.webhook.clone(),
    })
}

/// Secret seed from the config file, else the environment, else `None`
pub fn configured_secret(file: &FileConfig, env: Option<String>) -> Option<String> {
    file.secret_key
        .clone()
        .filter(|v| !v.is_empty())
        .or_else(|| env.filter(|v| !v.is_empty()))
}

/// Secret seed, prompting without echo when none is configured
pub fn load_secret(file: &FileConfig) -> Result<String> {
    if let Some(secret) = configured_secret(file, std::env::var(SECRET_ENV).ok()) {
        return Ok(secret);
    }

    let secret = rpassword::prompt_password("Wallet secret seed (S...): ")
        .context("Failed to read secret seed")?;
    if secret.is_empty() {
        bail!("No secret seed given. Set {} or secret_key in the config file", SECRET_ENV);
    }
    Ok(secret)
}
