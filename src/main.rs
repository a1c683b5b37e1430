//! ElderEase service entry point
use elderease::config::ServerConfig;
use elderease::context::AppContext;
use elderease::error::AppResult;
use elderease::server;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> AppResult<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "elderease=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    print_banner();

    // Load configuration
    let config = ServerConfig::from_env()?;

    // Create application context
    let ctx = AppContext::new(config).await?;

    // Start server
    server::serve(ctx).await?;

    Ok(())
}

fn print_banner() {
    println!(
        r#"
    ________    __          ______
   / ____/ /___/ /__  _____/ ____/___ _________
  / __/ / / __  / _ \/ ___/ __/ / __ `/ ___/ _ \
 / /___/ / /_/ /  __/ /  / /___/ /_/ (__  )  __/
/_____/_/\__,_/\___/_/  /_____/\__,_/____/\___/

        Social media learning for seniors v{}
        "#,
        env!("CARGO_PKG_VERSION")
    );
}
