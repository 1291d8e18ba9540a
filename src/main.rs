//! Finance News Digest — binary entrypoint.
//! Loads settings, starts the cron scheduler, and runs cycles until killed.

use finance_news_digest::{config::Settings, init_tracing, scheduler};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();

    let settings = Settings::from_env()?;
    init_tracing(&settings.log_level);

    let handle = scheduler::start(settings)?;
    handle.wait().await;
    Ok(())
}
