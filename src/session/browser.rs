//! Chromium-backed session.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig as ChromiumConfig};
use chromiumoxide::cdp::browser_protocol::network::{
    ClearBrowserCookiesParams, Cookie, CookieParam, CookieSameSite, TimeSinceEpoch,
};
use chromiumoxide::page::Page;
use futures::StreamExt;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Instant};

use crate::config::{BrowserConfig, Config};
use crate::error::{Error, Result};
use crate::media::{FetchedPage, PageKind, PageMarkers};
use crate::output::create_spinner;
use crate::session::cookies::{
    cookie_store_exists, load_cookie_store, save_cookie_store, CookieJar, CookieRecord,
};
use crate::session::{PageFetcher, SessionProvider};

/// Interval between marker checks while waiting on a page.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Launches Chromium sessions authenticated from a cookie store.
pub struct ChromiumSessionProvider {
    browser: BrowserConfig,
    markers: PageMarkers,
    logged_in: String,
    page_timeout: Duration,
    login_timeout: Duration,
    session_check_timeout: Duration,
}

impl ChromiumSessionProvider {
    pub fn new(config: &Config, markers: PageMarkers) -> Self {
        Self {
            browser: config.browser.clone(),
            markers,
            logged_in: config.selectors.logged_in.clone(),
            page_timeout: config.page_timeout(),
            login_timeout: config.login_timeout(),
            session_check_timeout: config.session_check_timeout(),
        }
    }

    async fn launch(&self, headless: bool) -> Result<ChromiumSession> {
        ChromiumSession::launch(
            &self.browser,
            headless,
            self.markers.clone(),
            self.page_timeout,
        )
        .await
    }

    /// Open a visible browser, wait for the user to log in and save the
    /// resulting cookies.
    async fn interactive_login(&self, cookie_store: &Path) -> Result<()> {
        let session = self.launch(false).await?;

        let spinner = create_spinner("Waiting for login in the browser window...");
        let logged_in = session.wait_for(&self.logged_in, self.login_timeout).await;
        spinner.finish_and_clear();

        if !logged_in {
            session.shutdown().await;
            return Err(Error::Authentication(format!(
                "Timed out after {} seconds waiting for login",
                self.login_timeout.as_secs()
            )));
        }

        tracing::info!("Logged in, saving cookies...");

        let cookies = session.cookies().await;
        session.shutdown().await;
        save_cookie_store(cookie_store, &cookies?)?;

        Ok(())
    }
}

#[async_trait]
impl SessionProvider for ChromiumSessionProvider {
    type Session = ChromiumSession;

    async fn obtain(&self, cookie_store: &Path) -> Result<(ChromiumSession, CookieJar)> {
        if cookie_store_exists(cookie_store) {
            tracing::info!("Using existing cookies");
        } else {
            tracing::info!("Cookies not found, waiting for manual login");
            self.interactive_login(cookie_store).await?;
        }

        let stored = load_cookie_store(cookie_store)?;
        let session = self.launch(self.browser.headless).await?;

        if let Err(e) = session.replace_cookies(&stored).await {
            session.shutdown().await;
            return Err(e);
        }

        tracing::info!("Checking login...");

        if let Err(e) = session.reload().await {
            session.shutdown().await;
            return Err(e);
        }

        if !session
            .wait_for(&self.logged_in, self.session_check_timeout)
            .await
        {
            session.shutdown().await;
            return Err(Error::Authentication(format!(
                "Not logged in after restoring cookies. Delete {} to log in again.",
                cookie_store.display()
            )));
        }

        let jar = match session.cookies().await {
            Ok(cookies) => CookieJar::new(cookies),
            Err(e) => {
                session.shutdown().await;
                return Err(e);
            }
        };

        tracing::info!("Driver ready ({} cookies)", jar.len());

        Ok((session, jar))
    }
}

/// A running Chromium instance with a single tab.
pub struct ChromiumSession {
    browser: Mutex<Browser>,
    page: Page,
    handler_task: JoinHandle<()>,
    markers: PageMarkers,
    page_timeout: Duration,
}

impl ChromiumSession {
    async fn launch(
        config: &BrowserConfig,
        headless: bool,
        markers: PageMarkers,
        page_timeout: Duration,
    ) -> Result<Self> {
        let mut builder = ChromiumConfig::builder()
            .no_sandbox()
            .window_size(1920, 1080)
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-blink-features=AutomationControlled");

        if !headless {
            builder = builder.with_head();
        }

        if let Some(ref executable) = config.chrome_executable {
            builder = builder.chrome_executable(executable);
        }

        let chromium_config = builder
            .build()
            .map_err(|e| Error::Browser(format!("Failed to build browser config: {}", e)))?;

        tracing::debug!("Launching Chromium (headless: {})", headless);

        let (browser, mut handler) = Browser::launch(chromium_config)
            .await
            .map_err(|e| Error::Browser(format!("Failed to launch browser: {}", e)))?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("Browser handler error: {}", e);
                }
            }
        });

        let page = match browser.new_page(config.home_url.as_str()).await {
            Ok(page) => page,
            Err(e) => {
                let mut browser = browser;
                let _ = browser.close().await;
                handler_task.abort();
                return Err(e.into());
            }
        };

        Ok(Self {
            browser: Mutex::new(browser),
            page,
            handler_task,
            markers,
            page_timeout,
        })
    }

    /// Poll until `selector` matches an element or `timeout` elapses.
    pub async fn wait_for(&self, selector: &str, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;

        loop {
            if self.page.find_element(selector).await.is_ok() {
                return true;
            }

            if Instant::now() >= deadline {
                return false;
            }

            sleep(POLL_INTERVAL).await;
        }
    }

    /// Get all cookies of the current tab.
    pub async fn cookies(&self) -> Result<Vec<CookieRecord>> {
        let cookies = self.page.get_cookies().await?;
        Ok(cookies.into_iter().map(record_from_cdp).collect())
    }

    /// Drop every browser cookie and install `cookies` instead.
    async fn replace_cookies(&self, cookies: &[CookieRecord]) -> Result<()> {
        self.page.execute(ClearBrowserCookiesParams::default()).await?;

        let params = cookies
            .iter()
            .map(param_from_record)
            .collect::<Result<Vec<_>>>()?;

        self.page.set_cookies(params).await?;
        Ok(())
    }

    async fn reload(&self) -> Result<()> {
        self.page.reload().await?;
        Ok(())
    }

    /// Close the browser and wait for its event handler to finish.
    pub async fn shutdown(self) {
        let mut browser = self.browser.into_inner();

        if let Err(e) = browser.close().await {
            tracing::warn!("Failed to close browser gracefully: {}", e);
        }
        if let Err(e) = browser.wait().await {
            tracing::debug!("Failed to wait for browser process: {}", e);
        }
        if let Err(e) = self.handler_task.await {
            tracing::debug!("Browser handler join error: {}", e);
        }
    }
}

#[async_trait]
impl PageFetcher for ChromiumSession {
    async fn fetch_and_classify(&self, url: &str) -> Result<FetchedPage> {
        self.page.goto(url).await?;

        if !self
            .wait_for(self.markers.wait_selector(), self.page_timeout)
            .await
        {
            tracing::warn!(
                "No page marker appeared within {} seconds",
                self.page_timeout.as_secs()
            );
            return Ok(FetchedPage::of(PageKind::Unknown));
        }

        let markup = self.page.content().await?;
        Ok(self.markers.classify_markup(markup))
    }
}

fn record_from_cdp(cookie: Cookie) -> CookieRecord {
    let expiry = if cookie.session || cookie.expires < 0.0 {
        None
    } else {
        Some(cookie.expires as i64)
    };

    CookieRecord {
        domain: cookie.domain,
        name: cookie.name,
        value: cookie.value,
        path: cookie.path,
        secure: cookie.secure,
        http_only: cookie.http_only,
        expiry,
        same_site: cookie.same_site.map(|s| same_site_name(&s).to_string()),
    }
}

fn param_from_record(record: &CookieRecord) -> Result<CookieParam> {
    let mut builder = CookieParam::builder()
        .name(record.name.clone())
        .value(record.value.clone())
        .domain(record.domain.clone())
        .path(record.path.clone())
        .secure(record.secure)
        .http_only(record.http_only);

    if let Some(expiry) = record.expiry {
        builder = builder.expires(TimeSinceEpoch::new(expiry as f64));
    }

    if let Some(same_site) = record.same_site.as_deref() {
        match parse_same_site(same_site) {
            Some(same_site) => builder = builder.same_site(same_site),
            None => tracing::debug!(
                "Ignoring unknown sameSite '{}' of cookie {}",
                same_site,
                record.name
            ),
        }
    }

    builder
        .build()
        .map_err(|e| Error::Browser(format!("Invalid cookie '{}': {}", record.name, e)))
}

/// Name of a SameSite value as stored in the cookie store.
fn same_site_name(same_site: &CookieSameSite) -> &'static str {
    match same_site {
        CookieSameSite::Strict => "Strict",
        CookieSameSite::Lax => "Lax",
        CookieSameSite::None => "None",
    }
}

fn parse_same_site(value: &str) -> Option<CookieSameSite> {
    match value.to_ascii_lowercase().as_str() {
        "strict" => Some(CookieSameSite::Strict),
        "lax" => Some(CookieSameSite::Lax),
        "none" => Some(CookieSameSite::None),
        _ => None,
    }
}
