pub mod ai;
pub mod config;
pub mod error;

pub use crate::ai::emotion::{
    EmotionHistoryEntry, EmotionLabel, EmotionSnapshot, EmotionState, EmotionTracker,
    EmotionTrend, EmotionTrends,
};
pub use crate::ai::sentiment::{Classification, EmotionClassifier, KeywordClassifier};
pub use crate::ai::session::EmotionSession;
pub use crate::ai::style_adapter::AdaptationProfile;
pub use crate::config::TrackerConfig;
pub use crate::error::{EmotionError, Result};

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Install the stdout log subscriber. `RUST_LOG` overrides the default
/// `info` filter; repeated calls are ignored.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Interactive demo: every stdin line is fed to one session and the
/// resulting state, adaptation and trends are printed as JSON.
pub async fn run() -> anyhow::Result<()> {
    init_logging();

    let session = EmotionSession::start(TrackerConfig::from_env())?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        if text == "/quit" {
            break;
        }

        let state = session.process_input(text).await;
        let adaptation = session.adaptation().await;
        let suggestion = adaptation
            .pick_suggestion(&mut rand::thread_rng())
            .map(str::to_string);
        let report = serde_json::json!({
            "state": state,
            "adaptation": adaptation,
            "trends": session.trends().await,
            "summary": session.describe().await,
            "suggestion": suggestion,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    let final_state = session.end().await;
    info!(label = %final_state.label, "Demo finished");
    Ok(())
}
