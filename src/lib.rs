// src/lib.rs
// Public library surface for integration tests and the bin targets.

pub mod config;
pub mod ingest;
pub mod notify;
pub mod scheduler;
pub mod summarize;

// ---- Re-exports for stable public API ----
pub use crate::config::Settings;
pub use crate::ingest::types::{FetchError, NewsItem, NewsSource};
pub use crate::notify::{format_digest, TelegramNotifier};
pub use crate::summarize::{Stance, SummaryResult, Summarizer};

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize compact tracing output. `RUST_LOG` wins when set; otherwise
/// the configured level applies to everything.
pub fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}
