#![warn(clippy::all)]

use tracing_subscriber::fmt::format::FmtSpan;

use trivia_api::config::Config;

#[tokio::main]
async fn main() -> Result<(), handle_errors::Error> {
    let config = Config::new()?;

    let log_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        format!(
            "handle_errors={},trivia_api={},warp={}",
            config.log_level, config.log_level, config.log_level
        )
    });

    tracing_subscriber::fmt()
        .with_env_filter(log_filter)
        .with_span_events(FmtSpan::CLOSE)
        .init();

    let store = trivia_api::setup_store(&config).await?;
    trivia_api::run(config, store).await;

    Ok(())
}
