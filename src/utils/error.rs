use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("API request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Telegram request failed: {0}")]
    TelegramError(#[from] teloxide::RequestError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl BotError {
    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            BotError::MissingConfigError { field } => {
                format!("Configuração ausente: {}", field)
            }
            BotError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuração inválida em {}: {}", field, reason)
            }
            BotError::TomlError(e) => format!("Arquivo de configuração inválido: {}", e),
            BotError::IoError(e) => format!("Erro de E/S: {}", e),
            BotError::HttpError(e) => format!("Erro HTTP: {}", e),
            BotError::TelegramError(e) => format!("Erro do Telegram: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            BotError::MissingConfigError { .. } => {
                "Set the value via CLI flag, environment variable, .env or --config file"
            }
            BotError::InvalidConfigValueError { .. } => {
                "Check the configured values (URLs must be absolute http/https)"
            }
            BotError::TomlError(_) => "Fix the syntax of the TOML configuration file",
            BotError::IoError(_) => "Check that the configuration file exists and is readable",
            BotError::HttpError(_) => "Check network connectivity to the lookup service",
            BotError::TelegramError(_) => "Check the bot token and Telegram connectivity",
        }
    }
}

pub type Result<T> = std::result::Result<T, BotError>;
