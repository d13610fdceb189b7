use clap::Parser;
use uid_ban_checker::adapters::telegram;
use uid_ban_checker::utils::logger;
use uid_ban_checker::{BotConfig, CliArgs};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 不存在時忽略
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();

    // 初始化日誌
    logger::init_logger(args.verbose, args.log_format);

    tracing::info!("Starting uid-ban-checker");

    let config = match BotConfig::load(&args) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    if args.verbose {
        tracing::debug!("Bot config: {:?}", config);
    }

    telegram::run(config).await?;
    Ok(())
}
