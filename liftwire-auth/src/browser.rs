//! Chromium provisioning and teardown.

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::config::WebAuthConfig;
use crate::error::AuthError;

/// A launched browser with its CDP event pump and one page.
///
/// The handler stream must be drained for the connection to make
/// progress, so it runs on its own task for the session's lifetime.
/// [`close`](Self::close) shuts the browser down; `Drop` aborts the pump
/// as a backstop so no task outlives the attempt.
#[derive(Debug)]
pub struct BrowserSession {
    browser: Browser,
    handler_task: JoinHandle<()>,
    /// The page the login flow drives.
    pub page: Page,
}

/// Launches a Chromium instance per the flow configuration.
///
/// Provisioning failures are environmental (missing binary, broken
/// sandbox) and surface as the fatal, unretried
/// [`AuthError::BrowserLaunch`].
pub async fn launch(config: &WebAuthConfig) -> Result<BrowserSession, AuthError> {
    let mut builder = BrowserConfig::builder().window_size(1280, 900);
    if !config.headless {
        builder = builder.with_head();
    }
    if let Some(executable) = &config.chrome_executable {
        builder = builder.chrome_executable(executable);
    }
    for arg in &config.extra_browser_args {
        builder = builder.arg(arg.clone());
    }

    let browser_config = builder.build().map_err(AuthError::BrowserLaunch)?;

    debug!(headless = config.headless, "Launching browser");
    let launched = tokio::time::timeout(config.launch_timeout, Browser::launch(browser_config))
        .await
        .map_err(|_| {
            AuthError::BrowserLaunch(format!(
                "launch timed out after {:?}",
                config.launch_timeout
            ))
        })?;

    let (browser, mut handler) = launched.map_err(|e| AuthError::BrowserLaunch(e.to_string()))?;

    let handler_task = tokio::spawn(async move {
        while let Some(event) = handler.next().await {
            if event.is_err() {
                break;
            }
        }
    });

    let page = browser
        .new_page("about:blank")
        .await
        .map_err(|e| AuthError::BrowserLaunch(format!("could not open page: {e}")))?;

    debug!("Browser ready");
    Ok(BrowserSession {
        browser,
        handler_task,
        page,
    })
}

impl BrowserSession {
    /// Shuts the browser down and stops the event pump.
    pub async fn close(&mut self) {
        if let Err(e) = self.browser.close().await {
            warn!(error = %e, "Browser close failed");
        }
        let _ = self.browser.wait().await;
        self.handler_task.abort();
        debug!("Browser closed");
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        self.handler_task.abort();
    }
}
