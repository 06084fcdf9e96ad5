mod config;
mod converters;
mod error;
mod extract;
mod llm_client;
mod logging;
mod models;
mod presets;
mod request_id;
mod router;

use clap::Parser;
use config::Config;
use router::{AppState, build_router};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{Level, info, warn};

#[derive(Parser, Debug)]
#[command(name = "vision-chat-gateway")]
#[command(about = "HTTP gateway for image and text chat over an OpenAI-compatible API")]
struct Args {
    #[arg(short, long, default_value = "0.0.0.0")]
    ip: String,

    #[arg(short, long, default_value = "8000")]
    port: u16,

    /// Optional YAML file with api_key, api_base, model, max_tokens, temperature
    #[arg(short, long)]
    config: Option<String>,

    /// Overrides the configured model
    #[arg(short, long)]
    model: Option<String>,

    /// Overrides the configured API base, e.g. https://api.openai.com/v1
    #[arg(long)]
    api_base: Option<String>,

    /// trace, debug, info, warn, error
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Also write logs to this file, capped at 10 MiB
    #[arg(long)]
    log_file: Option<String>,

    /// socks and http proxy, example: socks5://192.168.0.2:10080
    #[arg(long)]
    proxy: Option<String>,

    /// Upstream request timeout; unlimited when unset
    #[arg(long)]
    timeout_secs: Option<u64>,
}

fn load_config(args: &Args) -> anyhow::Result<Config> {
    let base = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    let mut config = base.with_env(|key| std::env::var(key).ok());
    if let Some(model) = &args.model {
        config.model = model.clone();
    }
    if let Some(api_base) = &args.api_base {
        config.api_base = api_base.clone();
    }
    Ok(config)
}

fn build_http_client(args: &Args) -> anyhow::Result<reqwest::Client> {
    let mut client_builder = reqwest::Client::builder();
    if let Some(proxy) = &args.proxy {
        client_builder = client_builder.proxy(reqwest::Proxy::all(proxy)?);
    }
    if let Some(secs) = args.timeout_secs {
        client_builder = client_builder.timeout(Duration::from_secs(secs));
    }
    Ok(client_builder.build()?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = Level::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {}. Using INFO level.", args.log_level);
        Level::INFO
    });
    logging::init_logging(log_level, args.log_file.as_deref());

    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            warn!("Failed to load .env file: {}", e);
        }
    }

    let config = load_config(&args)?;
    if config.api_key.is_empty() {
        warn!("OPENAI_API_KEY is not set; upstream calls will be rejected");
    }
    info!("Using model {} at {}", config.model, config.api_base);

    let http_client = build_http_client(&args)?;
    let llm_client = llm_client::LlmClient::new(http_client, Arc::new(config));
    let app = build_router(AppState {
        llm_client: Arc::new(llm_client),
    });

    let bind_address = format!("{}:{}", args.ip, args.port);
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("Server started on http://{}", bind_address);

    axum::serve(listener, app).await?;
    Ok(())
}
