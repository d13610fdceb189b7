use crate::domain::model::Identifier;
use thiserror::Error;
use url::form_urlencoded;

/// Input problems that stop the pipeline before any network call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("missing uid parameter")]
    MissingUidParameter,

    #[error("invalid identifier format")]
    InvalidIdentifier,
}

impl InputError {
    /// Instruction shown to the user as plain text.
    pub fn user_message(&self) -> &'static str {
        match self {
            InputError::MissingUidParameter => {
                "A URL não contém o parâmetro 'uid'. Por favor, envie um ID válido."
            }
            InputError::InvalidIdentifier => {
                "Por favor, insira um ID válido (somente números com 5 a 15 dígitos)."
            }
        }
    }
}

/// Extract a candidate identifier from free-form user text.
///
/// Anything containing `http` is read as a URL and must carry a `uid` query
/// parameter; everything else is the trimmed text itself.
pub fn normalize(raw: &str) -> Result<String, InputError> {
    let text = raw.trim();

    if !text.contains("http") {
        return Ok(text.to_string());
    }

    let query = query_part(text).ok_or(InputError::MissingUidParameter)?;

    form_urlencoded::parse(query.as_bytes())
        .find(|(key, value)| key == "uid" && !value.is_empty())
        .map(|(_, value)| value.into_owned())
        .ok_or(InputError::MissingUidParameter)
}

/// Query string of a possibly partial URL: the text after the first `?`,
/// with any `#fragment` cut off first. Scheme and host are not required.
fn query_part(text: &str) -> Option<&str> {
    let without_fragment = text.split_once('#').map_or(text, |(url, _)| url);
    without_fragment
        .split_once('?')
        .map(|(_, query)| query)
}

pub fn validate(candidate: &str) -> Result<Identifier, InputError> {
    Identifier::parse(candidate).ok_or(InputError::InvalidIdentifier)
}

/// Normalize then validate.
pub fn parse_input(raw: &str) -> Result<Identifier, InputError> {
    let candidate = normalize(raw)?;
    validate(&candidate)
}
