use clap::Parser;
use std::time::Duration;
use uid_ban_checker::config::toml_config::{
    DEFAULT_REQUEST_TIMEOUT_SECONDS, MAX_REQUEST_TIMEOUT_SECONDS,
};
use uid_ban_checker::utils::logger::{self, LogFormat};
use uid_ban_checker::utils::validation::{validate_range, validate_required_field, validate_url};
use uid_ban_checker::{HttpLookupClient, LookupPipeline, Reply};

const EXIT_CONFIG_ERROR: i32 = 1;
const EXIT_INPUT_REJECTED: i32 = 2;

/// Run a single lookup without Telegram and print the reply.
#[derive(Debug, Parser)]
#[command(name = "lookup")]
#[command(about = "Resolve the bot reply for one ID or URL")]
#[command(
    after_help = "Exit codes: 0 lookup reply printed (including API/transport errors), \
                  1 configuration error, 2 input rejected before any lookup"
)]
struct LookupArgs {
    /// Raw user input: a numeric ID or a URL with a uid parameter
    input: String,

    #[arg(long, env = "API_URL")]
    api_url: Option<String>,

    #[arg(long, env = "REQUEST_TIMEOUT_SECONDS", default_value_t = DEFAULT_REQUEST_TIMEOUT_SECONDS)]
    request_timeout_seconds: u64,

    #[arg(long, short = 'v')]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let args = LookupArgs::parse();

    logger::init_logger(args.verbose, LogFormat::Compact);

    let settings = validate_required_field("api_url", &args.api_url)
        .and_then(|raw| validate_url("api_url", raw))
        .and_then(|url| {
            validate_range(
                "request_timeout_seconds",
                args.request_timeout_seconds,
                1,
                MAX_REQUEST_TIMEOUT_SECONDS,
            )?;
            Ok(url)
        });
    let api_url = match settings {
        Ok(url) => url,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(EXIT_CONFIG_ERROR);
        }
    };

    let client = HttpLookupClient::new(api_url, Duration::from_secs(args.request_timeout_seconds))?;
    let pipeline = LookupPipeline::new(client);

    let reply = pipeline.resolve(&args.input).await;
    println!("{}", reply.text());

    let code = exit_code(&reply);
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}

/// 輸入被拒絕（沒有呼叫 API）時回傳非零
fn exit_code(reply: &Reply) -> i32 {
    match reply {
        Reply::Plain(_) => EXIT_INPUT_REJECTED,
        Reply::Markdown(_) => 0,
    }
}
