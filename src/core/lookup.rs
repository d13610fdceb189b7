use crate::domain::model::{Identifier, LookupResult};
use crate::domain::ports::LookupService;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::time::Duration;
use url::Url;

pub const DEFAULT_MESSAGE: &str = "Mensagem não especificada.";
pub const DEFAULT_CREDITS_URL: &str = "https://t.me/ngxjs";
pub const DEFAULT_BAN_CODE: &str = "0";

/// Body returned by the lookup service.
///
/// Every field is optional on the wire; defaults are filled in by
/// [`LookupResponse::into_result`] so nothing downstream sees a hole.
#[derive(Debug, Default, Deserialize)]
pub struct LookupResponse {
    #[serde(default, deserialize_with = "display_value")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "flag_value")]
    pub is_banned: bool,
    #[serde(default, deserialize_with = "display_value")]
    pub period: Option<String>,
    #[serde(default, deserialize_with = "display_value")]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "display_value")]
    pub credits: Option<String>,
    #[serde(default, deserialize_with = "display_value")]
    pub uid: Option<String>,
}

impl LookupResponse {
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some("success")
    }

    pub fn into_result(self, queried: &Identifier) -> LookupResult {
        if !self.is_success() {
            return LookupResult::ApiError {
                message: self.message.unwrap_or_else(|| DEFAULT_MESSAGE.to_string()),
            };
        }

        LookupResult::Success {
            id: self.uid.unwrap_or_else(|| queried.to_string()),
            banned: self.is_banned,
            ban_code: self.period.unwrap_or_else(|| DEFAULT_BAN_CODE.to_string()),
            message: self.message.unwrap_or_else(|| DEFAULT_MESSAGE.to_string()),
            credits_url: self
                .credits
                .unwrap_or_else(|| DEFAULT_CREDITS_URL.to_string()),
        }
    }
}

/// Strings pass through, numbers and booleans are stringified, `null` is absent.
fn display_value<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

/// Nonzero numbers, `true` and numeric strings other than zero mean banned.
fn flag_value<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => s.trim().parse::<f64>().is_ok_and(|f| f != 0.0),
        _ => false,
    })
}

/// Error message followed by every `source()` cause, joined with `: `.
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut detail = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        detail.push_str(": ");
        detail.push_str(&cause.to_string());
        source = cause.source();
    }
    detail
}

pub struct HttpLookupClient {
    client: Client,
    api_url: Url,
}

impl HttpLookupClient {
    pub fn new(api_url: Url, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, api_url })
    }

    async fn fetch(&self, id: &Identifier) -> reqwest::Result<LookupResponse> {
        let response = self
            .client
            .get(self.api_url.clone())
            .query(&[("uid", id.as_str())])
            .send()
            .await?;

        tracing::debug!("API response status: {}", response.status());

        response.error_for_status()?.json::<LookupResponse>().await
    }
}

#[async_trait]
impl LookupService for HttpLookupClient {
    async fn lookup(&self, id: &Identifier) -> LookupResult {
        tracing::info!("Consultando dados para o ID: {}", id);

        let body = match self.fetch(id).await {
            Ok(body) => body,
            Err(e) => {
                let detail = error_chain(&e);
                tracing::error!("Erro ao acessar a API. Detalhes: {}", detail);
                return LookupResult::TransportError { detail };
            }
        };

        tracing::info!("Resposta da API: {:?}", body);

        let result = body.into_result(id);
        if let LookupResult::ApiError { message } = &result {
            tracing::error!("Erro na API: {}", message);
        }
        result
    }
}
