use anyhow::{Context, Result};
use chromiumoxide::browser::{Browser, BrowserConfigBuilder, HeadlessMode};
use chromiumoxide::fetcher::{BrowserFetcher, BrowserFetcherOptions};
use futures::StreamExt;
use std::path::PathBuf;
use std::process::Command;
use std::time::Duration;
use tokio::task::{self, JoinHandle};
use tracing::{info, trace, warn};

use crate::browser::driver_log::DriverLog;
use crate::config::SessionConfig;
use crate::utils::{
    BROWSER_PATH_ENV, CDP_REQUEST_TIMEOUT_SECS, DRIVER_LOG_PATH, WINDOW_HEIGHT, WINDOW_WIDTH,
};

/// Well-known Chrome and Chromium install locations for this platform
#[must_use]
pub fn candidate_paths() -> Vec<PathBuf> {
    let fixed: &[&str] = if cfg!(target_os = "windows") {
        &[
            r"C:\Program Files\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
        ]
    } else if cfg!(target_os = "macos") {
        &[
            "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            "/Applications/Chromium.app/Contents/MacOS/Chromium",
        ]
    } else {
        &[
            "/usr/bin/google-chrome",
            "/usr/bin/chromium",
            "/usr/bin/chromium-browser",
            "/snap/bin/chromium",
        ]
    };
    fixed.iter().map(PathBuf::from).collect()
}

/// Locate an installed Chrome/Chromium.
///
/// `BROWSER_PATH_ENV` wins, then the well-known locations, then `PATH`.
#[must_use]
pub fn find_browser_executable() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(BROWSER_PATH_ENV).map(PathBuf::from) {
        if path.exists() {
            info!("Using browser from {}: {}", BROWSER_PATH_ENV, path.display());
            return Some(path);
        }
        warn!("{} points to a missing file: {}", BROWSER_PATH_ENV, path.display());
    }

    if let Some(path) = candidate_paths().into_iter().find(|p| p.exists()) {
        info!("Found browser at: {}", path.display());
        return Some(path);
    }

    if cfg!(target_os = "windows") {
        return None;
    }
    ["google-chrome", "chromium", "chromium-browser"]
        .iter()
        .filter_map(|cmd| Command::new("which").arg(cmd).output().ok())
        .filter(|output| output.status.success())
        .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
        .find(|path| !path.is_empty())
        .map(PathBuf::from)
}

/// Fetch a managed Chromium into the user cache and return its executable.
pub async fn download_managed_browser() -> Result<PathBuf> {
    let cache_dir = dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("udn_newsscrape")
        .join("chromium");
    info!("Downloading managed Chromium into {}", cache_dir.display());

    std::fs::create_dir_all(&cache_dir).context("Failed to create cache directory")?;
    let options = BrowserFetcherOptions::builder()
        .with_path(&cache_dir)
        .build()
        .context("Failed to build fetcher options")?;
    let revision = BrowserFetcher::new(options)
        .fetch()
        .await
        .context("Failed to fetch browser")?;

    Ok(revision.executable_path)
}

/// Resolve the executable: configured path, then discovery, then download.
pub async fn resolve_browser_executable(config: &SessionConfig) -> Result<PathBuf> {
    if let Some(path) = config.browser_executable() {
        if path.exists() {
            return Ok(path.clone());
        }
        warn!(
            "Configured browser executable does not exist: {}",
            path.display()
        );
    }

    match find_browser_executable() {
        Some(path) => Ok(path),
        None => {
            warn!("No local Chrome/Chromium found");
            download_managed_browser().await
        }
    }
}

/// Extra command-line switches passed to the browser.
///
/// Window size, profile directory and headless mode are set through the
/// config builder; everything else is listed here.
#[must_use]
pub fn launch_arguments() -> Vec<&'static str> {
    vec![
        "--start-maximized",
        // No images: pages settle faster
        "--blink-settings=imagesEnabled=false",
        // Use the system network path so VPN/institutional routing applies
        "--proxy-server=direct://",
        "--proxy-bypass-list=*",
        "--no-sandbox",
        "--disable-dev-shm-usage",
        "--no-first-run",
        "--no-default-browser-check",
    ]
}

/// Profile directory used when none is configured
#[must_use]
pub fn temporary_profile_dir() -> PathBuf {
    std::env::temp_dir().join(format!("udn_newsscrape_chrome_{}", std::process::id()))
}

/// Launched browser plus everything needed to tear it down
pub struct LaunchedBrowser {
    pub browser: Browser,
    pub handler: JoinHandle<()>,
    /// Temporary profile to delete after shutdown; `None` for a persistent profile
    pub temp_profile: Option<PathBuf>,
}

/// Launch a browser configured for portal scraping.
///
/// A configured `user_data_dir` is reused as-is so an authenticated session
/// survives between runs; otherwise a per-process temp profile is created.
/// CDP handler errors are appended to the fixed driver log file.
pub async fn launch_browser(config: &SessionConfig) -> Result<LaunchedBrowser> {
    let chrome_path = resolve_browser_executable(config).await?;

    let (user_data_dir, temp_profile) = match config.user_data_dir() {
        Some(dir) => (dir.clone(), None),
        None => {
            let dir = temporary_profile_dir();
            (dir.clone(), Some(dir))
        }
    };

    std::fs::create_dir_all(&user_data_dir).context("Failed to create user data directory")?;

    let mut config_builder = BrowserConfigBuilder::default()
        .request_timeout(Duration::from_secs(CDP_REQUEST_TIMEOUT_SECS))
        .window_size(WINDOW_WIDTH, WINDOW_HEIGHT)
        .user_data_dir(user_data_dir)
        .chrome_executable(chrome_path);

    if config.headless() {
        config_builder = config_builder.headless_mode(HeadlessMode::default());
    } else {
        config_builder = config_builder.with_head();
    }

    for arg in launch_arguments() {
        config_builder = config_builder.arg(arg);
    }

    let browser_config = config_builder
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build browser config: {e}"))?;

    let mut driver_log = DriverLog::open(DRIVER_LOG_PATH).await;

    info!("Launching browser with config: {:?}", browser_config);
    let (browser, mut handler) = Browser::launch(browser_config)
        .await
        .context("Failed to launch browser")?;
    driver_log.record("browser launched").await;

    let handler_task = task::spawn(async move {
        while let Some(h) = handler.next().await {
            if let Err(e) = h {
                let error_msg = e.to_string();

                // Chrome emits CDP events chromiumoxide cannot deserialize; these are noise.
                let is_benign_serialization_error = error_msg
                    .contains("data did not match any variant of untagged enum Message")
                    || error_msg.contains("Failed to deserialize WS response");

                if is_benign_serialization_error {
                    trace!("Suppressed benign CDP serialization error: {}", error_msg);
                } else {
                    warn!("Browser handler error: {:?}", e);
                    driver_log.record(&format!("handler error: {error_msg}")).await;
                }
            }
        }
        driver_log.record("handler stopped").await;
        info!("Browser handler task completed");
    });

    Ok(LaunchedBrowser {
        browser,
        handler: handler_task,
        temp_profile,
    })
}
