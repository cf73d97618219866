//! Diagnostic log of the browser driver process
//!
//! Lines are appended to a fixed local file. Failure to open or write the
//! file never affects the scrape; it is reported through tracing only.

use chrono::Local;
use std::path::Path;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::warn;

pub struct DriverLog {
    file: Option<File>,
}

impl DriverLog {
    /// Open `path` for appending, creating it if needed
    pub async fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let file = match OpenOptions::new().create(true).append(true).open(path).await {
            Ok(file) => Some(file),
            Err(e) => {
                warn!("Cannot open driver log {}: {}", path.display(), e);
                None
            }
        };
        Self { file }
    }

    /// Append one timestamped line
    pub async fn record(&mut self, message: &str) {
        let Some(file) = self.file.as_mut() else {
            return;
        };
        let line = format!("{} {}\n", Local::now().format("%Y-%m-%d %H:%M:%S%.3f"), message);
        let written = match file.write_all(line.as_bytes()).await {
            Ok(()) => file.flush().await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            warn!("Driver log write failed, disabling it: {}", e);
            self.file = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn appends_timestamped_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("driver.log");

        let mut log = DriverLog::open(&path).await;
        log.record("browser launched").await;
        log.record("handler stopped").await;
        drop(log);

        let mut reopened = DriverLog::open(&path).await;
        reopened.record("second session").await;
        drop(reopened);

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with("browser launched"));
        assert!(lines[2].ends_with("second session"));
    }
}
