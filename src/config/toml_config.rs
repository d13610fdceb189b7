use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_range, validate_required_field, validate_url, Validate,
};
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 10;
pub const MAX_REQUEST_TIMEOUT_SECONDS: u64 = 120;

/// One source of settings (CLI/env or a TOML file). Every field is optional;
/// layers are merged before validation.
#[derive(Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigLayer {
    pub token: Option<String>,
    pub api_url: Option<String>,
    pub discord_url: Option<String>,
    pub request_timeout_seconds: Option<u64>,
}

impl ConfigLayer {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Fill the gaps in `self` from `lower`; values already set win.
    pub fn merge(self, lower: ConfigLayer) -> Self {
        Self {
            token: self.token.or(lower.token),
            api_url: self.api_url.or(lower.api_url),
            discord_url: self.discord_url.or(lower.discord_url),
            request_timeout_seconds: self
                .request_timeout_seconds
                .or(lower.request_timeout_seconds),
        }
    }

    pub fn request_timeout_seconds(&self) -> u64 {
        self.request_timeout_seconds
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECONDS)
    }
}

impl std::fmt::Debug for ConfigLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigLayer")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("api_url", &self.api_url)
            .field("discord_url", &self.discord_url)
            .field("request_timeout_seconds", &self.request_timeout_seconds)
            .finish()
    }
}

impl Validate for ConfigLayer {
    fn validate(&self) -> Result<()> {
        let token = validate_required_field("token", &self.token)?;
        validate_non_empty_string("token", token)?;

        validate_url("api_url", validate_required_field("api_url", &self.api_url)?)?;
        validate_url(
            "discord_url",
            validate_required_field("discord_url", &self.discord_url)?,
        )?;

        validate_range(
            "request_timeout_seconds",
            self.request_timeout_seconds(),
            1,
            MAX_REQUEST_TIMEOUT_SECONDS,
        )?;

        Ok(())
    }
}
