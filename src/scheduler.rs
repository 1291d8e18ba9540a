// src/scheduler.rs
// Cron trigger + single-slot run queue. Ticks push a unit signal into a
// bounded channel; a worker loop drains it and runs cycles sequentially, so
// a cycle that overruns its cadence can never overlap the next one.

use anyhow::{bail, Context, Result};
use chrono::Utc;
use cron::Schedule;
use metrics::counter;
use std::str::FromStr;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::Settings;
use crate::ingest::types::{NewsItem, NewsSource};
use crate::ingest::{self, providers::newsapi::NewsApiSource};
use crate::notify::{self, TelegramNotifier};
use crate::summarize::Summarizer;

/// How many merged items go to the summarizer per cycle.
pub const SUMMARIZE_LIMIT: usize = 8;
/// How many of those appear in the digest's source listing.
pub const DIGEST_LIMIT: usize = 5;
/// Per-source page size requested from the headline API.
const FETCH_LIMIT: usize = 12;

/// Parse a standard 5-field crontab expression. The schedule crate wants a
/// seconds field, so it gets prefilled with zero here; configs stay in the
/// documented 5-field syntax.
pub fn parse_crontab(expr: &str) -> Result<Schedule> {
    let fields = expr.split_whitespace().count();
    if fields != 5 {
        bail!("expected a 5-field cron expression, got {fields} fields in '{expr}'");
    }
    let with_seconds = format!("0 {}", expr.trim());
    Schedule::from_str(&with_seconds).with_context(|| format!("invalid cron expression '{expr}'"))
}

/// Per-cycle truncation plan. `None` means the no-items branch: nothing to
/// summarize, nothing to send.
#[derive(Debug, Clone, PartialEq)]
pub struct CyclePlan {
    pub summarize: Vec<NewsItem>,
    pub digest: Vec<NewsItem>,
}

pub fn plan_cycle(items: Vec<NewsItem>) -> Option<CyclePlan> {
    if items.is_empty() {
        return None;
    }
    let summarize: Vec<NewsItem> = items.into_iter().take(SUMMARIZE_LIMIT).collect();
    let digest: Vec<NewsItem> = summarize.iter().take(DIGEST_LIMIT).cloned().collect();
    Some(CyclePlan { summarize, digest })
}

/// One complete fetch → merge → summarize → notify cycle. A failure at any
/// stage aborts the rest; the caller logs it and the next trigger starts
/// fresh. No state carries over between cycles.
pub async fn run_cycle(settings: &Settings) -> Result<()> {
    let mut sources: Vec<Box<dyn NewsSource>> = Vec::new();
    if let Some(key) = &settings.news_api_key {
        sources.push(Box::new(NewsApiSource::new(
            key.clone(),
            settings.sources.clone(),
            FETCH_LIMIT,
        )));
    }
    if sources.is_empty() {
        tracing::error!("no news sources configured; set NEWS_API_KEY");
        return Ok(());
    }

    tracing::info!("fetching news items");
    let items = ingest::collect(&sources).await?;

    let Some(plan) = plan_cycle(items) else {
        tracing::warn!("no news items retrieved");
        return Ok(());
    };

    let summarizer = Summarizer::new(settings);
    let summary = summarizer.summarize(&plan.summarize).await?;

    let digest = notify::format_digest(&summary, &plan.digest);
    let notifier = TelegramNotifier::new(settings);
    notifier.send(&digest).await?;

    counter!("digest_sent_total").increment(1);
    Ok(())
}

pub struct SchedulerHandle {
    trigger: JoinHandle<()>,
    worker: JoinHandle<()>,
}

impl SchedulerHandle {
    pub async fn wait(self) {
        let _ = self.worker.await;
        let _ = self.trigger.await;
    }
}

/// Start the cron trigger task and the cycle worker. An immediate run fires
/// once at startup; after that, cycles follow the configured schedule.
pub fn start(settings: Settings) -> Result<SchedulerHandle> {
    let schedule = parse_crontab(&settings.schedule_cron)?;
    let (tx, mut rx) = mpsc::channel::<()>(1);

    // immediate run at startup
    let _ = tx.try_send(());

    let cron_expr = settings.schedule_cron.clone();
    let trigger = tokio::spawn(async move {
        loop {
            let Some(next) = schedule.upcoming(Utc).next() else {
                tracing::warn!("cron schedule has no upcoming fire times, trigger stopping");
                break;
            };
            let wait = (next - Utc::now()).to_std().unwrap_or_default();
            tokio::time::sleep(wait).await;

            if tx.try_send(()).is_err() {
                tracing::warn!("cycle still in flight, dropping this tick");
                counter!("cycle_skipped_total").increment(1);
            }
        }
    });

    let worker = tokio::spawn(async move {
        while rx.recv().await.is_some() {
            counter!("cycle_runs_total").increment(1);
            if let Err(e) = run_cycle(&settings).await {
                tracing::error!(error = ?e, "cycle aborted");
            }
        }
    });

    tracing::info!(cron = %cron_expr, "scheduler started");
    Ok(SchedulerHandle { trigger, worker })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn item(url: &str, minutes_ago: i64) -> NewsItem {
        NewsItem {
            title: url.to_string(),
            url: url.to_string(),
            published_at: Utc::now() - Duration::minutes(minutes_ago),
            source: "Test".to_string(),
            summary: None,
        }
    }

    #[test]
    fn empty_input_takes_no_items_branch() {
        assert!(plan_cycle(Vec::new()).is_none());
    }

    #[test]
    fn plan_truncates_to_limits() {
        let items: Vec<NewsItem> = (0..12).map(|i| item(&format!("https://{i}"), i)).collect();
        let plan = plan_cycle(items).unwrap();
        assert_eq!(plan.summarize.len(), SUMMARIZE_LIMIT);
        assert_eq!(plan.digest.len(), DIGEST_LIMIT);
        // digest is a prefix of the summarizer batch
        assert_eq!(plan.digest[..], plan.summarize[..DIGEST_LIMIT]);
    }

    #[test]
    fn small_batches_pass_through_whole() {
        let plan = plan_cycle(vec![item("https://a", 0), item("https://b", 1)]).unwrap();
        assert_eq!(plan.summarize.len(), 2);
        assert_eq!(plan.digest.len(), 2);
    }
}
