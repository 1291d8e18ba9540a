//! Run a single digest cycle and exit. Useful for smoke-testing credentials
//! without waiting for the next cron tick.

use finance_news_digest::{config::Settings, init_tracing, scheduler};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let settings = Settings::from_env()?;
    init_tracing(&settings.log_level);

    tracing::info!("running single finance news cycle");
    scheduler::run_cycle(&settings).await
}
