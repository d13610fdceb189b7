//! Telegram transport: command routing, message handlers and the dispatcher.

use crate::config::BotConfig;
use crate::core::lookup::HttpLookupClient;
use crate::core::pipeline::LookupPipeline;
use crate::domain::model::Reply;
use crate::utils::error::Result;
use std::sync::Arc;
use teloxide::{
    dispatching::{HandlerExt, UpdateFilterExt, UpdateHandler},
    dptree,
    error_handlers::LoggingErrorHandler,
    prelude::*,
    types::{InlineKeyboardButton, InlineKeyboardMarkup, ParseMode},
    utils::command::BotCommands,
};
use url::Url;

pub const DISCORD_PROMPT: &str = "Entre no meu servidor do Discord:";
pub const DISCORD_BUTTON: &str = "Entrar no meu servidor do Discord";

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Comandos disponíveis:")]
pub enum Command {
    #[command(description = "inicia a conversa")]
    Start,
    #[command(description = "mostra como usar o bot")]
    Help,
}

impl Command {
    /// Fixed messages sent, in order, for each command.
    pub fn replies(&self) -> &'static [&'static str] {
        match self {
            Command::Start => &[
                "Olá! Bem-vindo ao bot checker de banimentos!",
                "Envie o ID que você deseja consultar.",
            ],
            Command::Help => &["Envie um ID para consulta. Use /start para reiniciar a conversa."],
        }
    }
}

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct BotState {
    pub pipeline: Arc<LookupPipeline<HttpLookupClient>>,
    pub discord_url: Url,
}

impl BotState {
    pub fn new(pipeline: LookupPipeline<HttpLookupClient>, discord_url: Url) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            discord_url,
        }
    }
}

/// Text that should go through the lookup pipeline: anything but a command.
pub fn is_lookup_text(text: &str) -> bool {
    !text.starts_with('/')
}

pub fn discord_keyboard(discord_url: &Url) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::url(
        DISCORD_BUTTON,
        discord_url.clone(),
    )]])
}

async fn handle_command(bot: Bot, msg: Message, cmd: Command) -> ResponseResult<()> {
    tracing::debug!("Command {:?} from chat {}", cmd, msg.chat.id);

    for text in cmd.replies() {
        bot.send_message(msg.chat.id, *text).await?;
    }
    Ok(())
}

async fn handle_lookup(bot: Bot, msg: Message, state: BotState) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let chat_id = msg.chat.id;

    match state.pipeline.resolve(text).await {
        Reply::Plain(instruction) => {
            bot.send_message(chat_id, instruction).await?;
            return Ok(());
        }
        Reply::Markdown(display) => {
            bot.send_message(chat_id, display)
                .parse_mode(ParseMode::MarkdownV2)
                .await?;
        }
    }

    bot.send_message(chat_id, DISCORD_PROMPT)
        .reply_markup(discord_keyboard(&state.discord_url))
        .await?;

    Ok(())
}

pub fn schema() -> UpdateHandler<teloxide::RequestError> {
    Update::filter_message()
        .branch(
            dptree::entry()
                .filter_command::<Command>()
                .endpoint(handle_command),
        )
        .branch(
            dptree::filter(|msg: Message| msg.text().is_some_and(is_lookup_text))
                .endpoint(handle_lookup),
        )
}

/// Start long polling until Ctrl-C.
pub async fn run(config: BotConfig) -> Result<()> {
    let client = HttpLookupClient::new(config.api_url().clone(), config.request_timeout())?;
    let state = BotState::new(LookupPipeline::new(client), config.discord_url().clone());
    let bot = Bot::new(config.token());

    // token 無效時在啟動階段就失敗
    let me = bot.get_me().await?;
    tracing::info!(
        "Logged in as @{}",
        me.user.username.as_deref().unwrap_or_default()
    );

    // 註冊指令清單失敗不影響運作
    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        tracing::warn!("Failed to register bot commands: {}", e);
    }

    tracing::info!("Bot está rodando...");

    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![state])
        .default_handler(|upd| async move {
            tracing::debug!("Unhandled update: {:?}", upd.id);
        })
        .error_handler(LoggingErrorHandler::with_custom_text(
            "Error in message handler",
        ))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    tracing::info!("Dispatcher stopped");
    Ok(())
}
