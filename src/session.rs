//! Browser session handle shared across all lookups.
//!
//! One headless Chrome process and one tab serve the whole run; each query
//! re-navigates the same tab instead of paying a fresh launch. Dropping the
//! session kills the Chrome process, so the release runs on every exit path,
//! panics and early errors included.

use anyhow::{anyhow, Result};
use headless_chrome::protocol::cdp::types::Event;
use headless_chrome::protocol::cdp::Page;
use headless_chrome::{Browser, LaunchOptions, Tab};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::LookupConfig;

pub struct BrowserSession {
    // Keeps the Chrome process alive; killed on drop.
    _browser: Browser,
    tab: Arc<Tab>,
    dialog_message: Arc<Mutex<Option<String>>>,
}

impl BrowserSession {
    /// Launch headless Chrome and open the tab reused by every lookup.
    ///
    /// Sandbox is disabled when running inside a container (detected via
    /// /.dockerenv or the APPCATFINDER_CONTAINER env var). The Chrome binary
    /// is resolved from CHROME_PATH, then the config, then well-known
    /// defaults. Proxy bypass is explicit launch configuration rather than
    /// ambient environment mutation.
    pub fn launch(config: &LookupConfig, default_timeout: Duration) -> Result<Self> {
        let is_container = std::env::var("APPCATFINDER_CONTAINER").is_ok()
            || Path::new("/.dockerenv").exists();

        let chrome_path: Option<PathBuf> = std::env::var("CHROME_PATH")
            .ok()
            .map(PathBuf::from)
            .or_else(|| config.chrome_path.as_ref().map(PathBuf::from));

        let mut extra_args: Vec<&OsStr> = Vec::new();
        if config.bypass_proxy {
            extra_args.push(OsStr::new("--no-proxy-server"));
        }

        let options = LaunchOptions::default_builder()
            .headless(true)
            .sandbox(!is_container)
            .path(chrome_path)
            .args(extra_args)
            .window_size(Some((1920, 1080)))
            .idle_browser_timeout(Duration::from_secs(300))
            .build()
            .map_err(|e| anyhow!("Failed to build Chrome launch options: {}", e))?;

        let browser = Browser::new(options)
            .map_err(|e| anyhow!("Failed to launch headless Chrome: {}", e))?;

        let tab = browser
            .new_tab()
            .map_err(|e| anyhow!("Failed to create browser tab: {}", e))?;
        tab.set_default_timeout(default_timeout);

        // Native dialogs (the page's rejection path) halt page scripting
        // until handled. The listener only records the text; dismissal
        // happens from the lookup thread once the text has been classified.
        let dialog_message = Arc::new(Mutex::new(None));
        let captured = Arc::clone(&dialog_message);
        tab.add_event_listener(Arc::new(move |event: &Event| {
            if let Event::PageJavascriptDialogOpening(dialog) = event {
                debug!("Native dialog opened: {}", dialog.params.message);
                *captured.lock().unwrap() = Some(dialog.params.message.clone());
            }
        }))
        .map_err(|e| anyhow!("Failed to register dialog listener: {}", e))?;

        Ok(BrowserSession {
            _browser: browser,
            tab,
            dialog_message,
        })
    }

    pub fn tab(&self) -> &Tab {
        &self.tab
    }

    /// Forget any dialog text recorded by a previous query.
    pub fn reset_dialog(&self) {
        *self.dialog_message.lock().unwrap() = None;
    }

    pub fn has_dialog(&self) -> bool {
        self.dialog_message.lock().unwrap().is_some()
    }

    /// Take the text of a dialog captured since the last reset.
    pub fn take_dialog_message(&self) -> Option<String> {
        self.dialog_message.lock().unwrap().take()
    }

    /// Accept the currently open dialog so the page, and with it the next
    /// query, can proceed.
    pub fn dismiss_dialog(&self) {
        let result = self.tab.call_method(Page::HandleJavaScriptDialog {
            accept: true,
            prompt_text: None,
        });
        if let Err(e) = result {
            warn!("Failed to dismiss dialog: {}", e);
        }
    }
}
