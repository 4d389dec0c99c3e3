//! JSON-lines session driver.
//!
//! Reads one [`SessionAction`](runtime::SessionAction) per stdin line, runs it
//! against a [`SessionOrchestrator`](runtime::SessionOrchestrator) and writes
//! one JSON response per stdout line. Diagnostics go to stderr (and to a log
//! file when `SESSION_LOG_DIR` is set).
//!
//! ```bash
//! echo '{"action":"start","participantId":"alice","variant":"CLASSIC"}' | session-cli
//! ```
mod driver;
mod logging;

use anyhow::Result;
use runtime::{SessionConfig, SessionOrchestrator};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let _log_guard = logging::setup_logging()?;

    let config = SessionConfig::from_env();
    tracing::info!(
        hand_size = config.match_config.hand_size,
        turn_secs = config.match_config.turn_duration_secs,
        data_dir = ?config.data_dir,
        "starting session driver"
    );

    let session = SessionOrchestrator::builder().config(config).build()?;
    driver::run(&session).await
}
