use anyhow::Context;
use quicklink::{config, server};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; variables may already be set.
    dotenvy::dotenv().ok();

    init_tracing();

    let config = config::load_from_env().context("Invalid configuration")?;
    config.print_summary();

    server::run(config).await
}

/// Installs the global subscriber before configuration is loaded, so warnings
/// raised while reading the environment are not lost.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}
