//! Rendering of lookup results for Telegram MarkdownV2.
//!
//! Dynamic values get their reserved characters escaped before they are
//! placed into the template, except `.`; periods are escaped in a single
//! pass over the finished text by [`escape_periods`].

use crate::domain::model::LookupResult;

const BOT_AUTHOR_URL: &str = "https://t.me/ngxjs";
const API_AUTHOR_URL: &str = "https://upload.spgunk.eu.org";

/// MarkdownV2 reserved characters, minus `.`.
const RESERVED: &[char] = &[
    '\\', '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '!',
];

/// Escape every `.` with a preceding backslash. Apply once per rendered message.
pub fn escape_periods(text: &str) -> String {
    text.replace('.', "\\.")
}

/// Escape a free-text value for plain MarkdownV2 context.
pub fn escape_markdown_value(value: &str) -> String {
    escape_chars(value, RESERVED)
}

/// Inside inline code only the backtick and backslash are special.
fn escape_code(value: &str) -> String {
    escape_chars(value, &['\\', '`'])
}

/// Inside the `(...)` part of a link only `)` and backslash are special.
fn escape_link_url(value: &str) -> String {
    escape_chars(value, &['\\', ')'])
}

fn escape_chars(value: &str, reserved: &[char]) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if reserved.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn render(result: &LookupResult) -> String {
    match result {
        LookupResult::Success {
            id,
            banned,
            ban_code,
            message,
            credits_url,
        } => {
            let mut text = format!("🔒 *ID:* {}\n", escape_markdown_value(id));
            if *banned {
                text.push_str("🚫 *Banido:* Sim\n");
                text.push_str(&format!(
                    "🧑‍💻 *Ban Code:* `{}`\n",
                    escape_code(ban_code)
                ));
            } else {
                text.push_str("🚫 *Banido:* Não\n");
            }
            text.push('\n');
            text.push_str(&escape_markdown_value(message));
            text.push_str("\n\n");
            text.push_str(&format!("🤖 [Bot Criado Por]({})\n", BOT_AUTHOR_URL));
            text.push_str(&format!("🔗 [Api Feito Por]({})\n", API_AUTHOR_URL));
            text.push_str(&format!(
                "💬 Créditos: [@ngxjs]({})",
                escape_link_url(credits_url)
            ));
            text
        }
        LookupResult::ApiError { message } => {
            format!("Erro da API: {}", escape_markdown_value(message))
        }
        LookupResult::TransportError { detail } => {
            format!(
                "Erro ao acessar a API. Detalhes: {}",
                escape_markdown_value(detail)
            )
        }
    }
}

/// Render a lookup result into text ready to send with MarkdownV2.
pub fn format_result(result: &LookupResult) -> String {
    escape_periods(&render(result))
}
