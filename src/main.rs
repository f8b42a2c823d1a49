use anyhow::Result;
use clap::Parser;
use speech_session::{create_router, AppState, Config};
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "speech-session", about = "Speech session service", version)]
struct Args {
    /// Path to the configuration file (extension optional)
    #[arg(short, long, default_value = "config/speech-session")]
    config: String,

    /// Override the configured HTTP bind address
    #[arg(long)]
    bind: Option<String>,

    /// Override the configured HTTP port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let mut cfg = Config::load(&args.config)?;
    if let Some(bind) = args.bind {
        cfg.service.http.bind = bind;
    }
    if let Some(port) = args.port {
        cfg.service.http.port = port;
    }

    info!("{} v{}", cfg.service.name, env!("CARGO_PKG_VERSION"));
    info!(
        "Recognition engine: {} at {}",
        cfg.recognizer.engine, cfg.recognizer.nats_url
    );
    info!(
        "Recognition locale: {} (silence limit {} ms)",
        cfg.recognizer.locale, cfg.recognizer.silence_limit_ms
    );
    info!("Playback sink: {}", cfg.playback.sink);

    let state = AppState::new(&cfg)?;
    let router = create_router(state);

    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    info!("HTTP server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
