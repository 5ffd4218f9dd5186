use std::{net::SocketAddr, path::Path};

use anyhow::Context;
use config::{Environment, File, FileFormat};
use serde::Deserialize;
use url::Url;
use ysyw_models::Sensitive;

pub use duration::Duration;

mod duration;

/// Environment variable containing a colon separated list of additional
/// config files.
pub const CONFIG_PATHS_ENV: &str = "YSYW_CONFIG";

/// Prefix of environment variables overriding single config keys, e.g.
/// `YSYW__EMAILJS__SERVICE_ID`.
pub const ENV_PREFIX: &str = "YSYW";

pub const DEFAULT_CONFIG: &str = include_str!("../../config.toml");
pub const DEV_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.dev.toml");

/// Loads the default config, the files listed in [`CONFIG_PATHS_ENV`] and
/// the environment overrides, in this order.
pub fn load() -> anyhow::Result<Config> {
    let paths = std::env::var(CONFIG_PATHS_ENV).unwrap_or_default();
    let paths = paths
        .split(':')
        .filter(|path| !path.is_empty())
        .collect::<Vec<_>>();
    build(&paths, &[], true)
}

/// Loads the default config and the development config, ignoring the
/// environment.
pub fn load_dev_config() -> anyhow::Result<Config> {
    build(&[DEV_CONFIG_PATH], &[], false)
}

/// Loads the default config and the given files, followed by the given toml
/// snippets. The environment is ignored.
pub fn load_with_override(
    paths: &[impl AsRef<Path>],
    overrides: &[&str],
) -> anyhow::Result<Config> {
    build(paths, overrides, false)
}

fn build(
    paths: &[impl AsRef<Path>],
    overrides: &[&str],
    environment: bool,
) -> anyhow::Result<Config> {
    let builder = config::Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

    let builder = paths.iter().try_fold(builder, |builder, path| {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at {}", path.display()))?;
        anyhow::Ok(builder.add_source(File::from_str(&content, FileFormat::Toml)))
    })?;

    let builder = overrides.iter().fold(builder, |builder, snippet| {
        builder.add_source(File::from_str(snippet, FileFormat::Toml))
    });

    let builder = if environment {
        builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
    } else {
        builder
    };

    builder
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub site: SiteConfig,
    pub contact: ContactConfig,
    pub auto_reply: AutoReplyConfig,
    pub emailjs: EmailJsConfig,
    pub api: Option<ApiConfig>,
    pub recaptcha: Option<RecaptchaConfig>,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub address: SocketAddr,
    pub client_timeout: Duration,
}

#[derive(Debug, Deserialize)]
pub struct SiteConfig {
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    pub recipient_name: String,
}

#[derive(Debug, Deserialize)]
pub struct AutoReplyConfig {
    pub from_name: String,
    pub from_email: String,
    pub reply_to: String,
}

#[derive(Debug, Deserialize)]
pub struct EmailJsConfig {
    pub endpoint: Url,
    #[serde(default)]
    pub service_id: String,
    #[serde(default)]
    pub template_id: String,
    #[serde(default)]
    pub auto_reply_template_id: String,
    #[serde(default)]
    pub public_key: String,
    pub private_key: Option<Sensitive<String>>,
}

#[derive(Debug, Deserialize)]
pub struct ApiConfig {
    pub base_url: Url,
}

#[derive(Debug, Deserialize)]
pub struct RecaptchaConfig {
    pub sitekey: String,
    pub secret: Option<Sensitive<String>>,
    #[serde(default)]
    pub min_score: f64,
    pub siteverify_endpoint_override: Option<Url>,
}
