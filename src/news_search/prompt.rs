//! Interactive confirmation for manual-login mode

use async_trait::async_trait;
use std::io::Write;
use tracing::info;

use crate::error::{ScrapeError, ScrapeResult};

/// Blocks the workflow until a human says the login is done
#[async_trait]
pub trait LoginPrompt: Send + Sync {
    async fn wait_for_confirmation(&self, message: &str) -> ScrapeResult<()>;
}

/// Waits for Enter on stdin. There is no timeout.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinPrompt;

#[async_trait]
impl LoginPrompt for StdinPrompt {
    async fn wait_for_confirmation(&self, message: &str) -> ScrapeResult<()> {
        let message = message.to_string();
        tokio::task::spawn_blocking(move || {
            let mut stdout = std::io::stdout();
            writeln!(stdout, "{message}")?;
            stdout.flush()?;
            let mut line = String::new();
            std::io::stdin().read_line(&mut line)?;
            Ok::<_, std::io::Error>(())
        })
        .await
        .map_err(|e| ScrapeError::Prompt(format!("prompt task failed: {e}")))?
        .map_err(|e| ScrapeError::Prompt(e.to_string()))
    }
}

/// Confirms immediately; for unattended runs and tests
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoConfirm;

#[async_trait]
impl LoginPrompt for AutoConfirm {
    async fn wait_for_confirmation(&self, message: &str) -> ScrapeResult<()> {
        info!("Auto-confirming login prompt: {}", message);
        Ok(())
    }
}
