pub mod toml_config;

use crate::utils::error::Result;
use crate::utils::logger::LogFormat;
use crate::utils::validation::{validate_url, Validate};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use toml_config::ConfigLayer;
use url::Url;

#[derive(Debug, Clone, Parser)]
#[command(name = "uid-ban-checker")]
#[command(about = "Telegram bot that checks whether a user ID is banned")]
pub struct CliArgs {
    #[arg(long, env = "TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    #[arg(long, env = "API_URL")]
    pub api_url: Option<String>,

    #[arg(long, env = "DISCORD_URL")]
    pub discord_url: Option<String>,

    #[arg(long, env = "REQUEST_TIMEOUT_SECONDS")]
    pub request_timeout_seconds: Option<u64>,

    #[arg(long, short = 'c', help = "Optional TOML file with the same settings")]
    pub config: Option<PathBuf>,

    #[arg(long, short = 'v', help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

impl CliArgs {
    pub fn layer(&self) -> ConfigLayer {
        ConfigLayer {
            token: self.token.clone(),
            api_url: self.api_url.clone(),
            discord_url: self.discord_url.clone(),
            request_timeout_seconds: self.request_timeout_seconds,
        }
    }
}

/// Immutable process configuration, built once at startup.
#[derive(Clone)]
pub struct BotConfig {
    token: String,
    api_url: Url,
    discord_url: Url,
    request_timeout: Duration,
}

impl BotConfig {
    /// CLI flags and environment first, then the optional TOML file.
    pub fn load(args: &CliArgs) -> Result<Self> {
        let file_layer = match &args.config {
            Some(path) => {
                tracing::debug!("Loading configuration file {}", path.display());
                ConfigLayer::from_file(path)?
            }
            None => ConfigLayer::default(),
        };

        Self::from_layer(args.layer().merge(file_layer))
    }

    pub fn from_layer(layer: ConfigLayer) -> Result<Self> {
        layer.validate()?;

        let request_timeout = Duration::from_secs(layer.request_timeout_seconds());
        let ConfigLayer {
            token,
            api_url,
            discord_url,
            ..
        } = layer;

        Ok(Self {
            token: token.unwrap_or_default(),
            api_url: validate_url("api_url", api_url.as_deref().unwrap_or_default())?,
            discord_url: validate_url("discord_url", discord_url.as_deref().unwrap_or_default())?,
            request_timeout,
        })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    pub fn discord_url(&self) -> &Url {
        &self.discord_url
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}

impl std::fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotConfig")
            .field("token", &"<redacted>")
            .field("api_url", &self.api_url.as_str())
            .field("discord_url", &self.discord_url.as_str())
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}
