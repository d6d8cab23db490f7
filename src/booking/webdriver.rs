use anyhow::{Context, Result};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use thirtyfour::components::SelectElement;
use thirtyfour::prelude::*;
use tracing::{debug, info};
use url::Url;

use crate::booking::browser::{Browser, Launcher, PageElement};
use crate::booking::constants::{HTTP_TIMEOUT_SECS, WINDOW_HEIGHT, WINDOW_WIDTH};

// Navigation timing knows the status of the document the browser is showing.
const NAVIGATION_STATUS_JS: &str = r#"
    const nav = performance.getEntriesByType('navigation')[0];
    return nav && nav.responseStatus ? nav.responseStatus : null;
"#;

/// Starts Chrome sessions through a running chromedriver.
pub struct WebDriverLauncher {
    webdriver_url: Url,
    headless: bool,
}

impl WebDriverLauncher {
    pub fn new(webdriver_url: Url, headless: bool) -> Self {
        WebDriverLauncher {
            webdriver_url,
            headless,
        }
    }
}

impl Launcher for WebDriverLauncher {
    type Browser = WebDriverBrowser;

    async fn launch(&self) -> Result<WebDriverBrowser> {
        let mut caps = DesiredCapabilities::chrome();
        if self.headless {
            caps.set_headless()?;
        }

        caps.add_arg("--no-sandbox")?;
        caps.add_arg("--disable-dev-shm-usage")?;
        caps.add_arg("--disable-gpu")?;
        caps.add_arg("--disable-extensions")?;
        caps.add_arg("--disable-notifications")?;
        caps.add_arg("--no-first-run")?;

        info!(webdriver = %self.webdriver_url, headless = self.headless, "Starting Chrome session");
        let driver = WebDriver::new(self.webdriver_url.as_str(), caps)
            .await
            .with_context(|| format!("unable to start a session on {}", self.webdriver_url))?;

        driver
            .set_window_rect(0, 0, WINDOW_WIDTH, WINDOW_HEIGHT)
            .await?;

        let http = http_client(Duration::from_secs(HTTP_TIMEOUT_SECS))?;

        Ok(WebDriverBrowser {
            driver,
            http,
            last_status: 0,
        })
    }
}

fn http_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .context("unable to build http client")
}

/// Status the site answers `url` with. Fails if no answer comes within the
/// client's timeout.
async fn fetch_status(http: &reqwest::Client, url: &str) -> Result<u16> {
    let response = http
        .get(url)
        .send()
        .await
        .with_context(|| format!("unable to reach {url}"))?;
    Ok(response.status().as_u16())
}

pub struct WebDriverBrowser {
    driver: WebDriver,
    http: reqwest::Client,
    last_status: u16,
}

impl Browser for WebDriverBrowser {
    type Element = WebDriverElement;

    /// WebDriver hides HTTP statuses, so the page is fetched once with reqwest
    /// first to learn whether the site is up.
    async fn visit(&mut self, url: &str) -> Result<()> {
        self.last_status = fetch_status(&self.http, url).await?;
        debug!(url, status = self.last_status, "Fetched page status");

        self.driver.goto(url).await?;
        Ok(())
    }

    async fn status_code(&self) -> Result<u16> {
        let ret = self
            .driver
            .execute(NAVIGATION_STATUS_JS, Arc::from(Vec::<Value>::new()))
            .await?;
        let status = ret
            .json()
            .as_u64()
            .and_then(|status| u16::try_from(status).ok());
        Ok(status.unwrap_or(self.last_status))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<WebDriverElement>> {
        let elements = self.driver.find_all(By::Id(id)).await?;
        Ok(elements.into_iter().next().map(WebDriverElement))
    }

    async fn find_by_css(&self, selector: &str) -> Result<Vec<WebDriverElement>> {
        let elements = self.driver.find_all(By::Css(selector)).await?;
        Ok(elements.into_iter().map(WebDriverElement).collect())
    }

    async fn quit(self) -> Result<()> {
        self.driver.quit().await?;
        Ok(())
    }
}

pub struct WebDriverElement(WebElement);

impl PageElement for WebDriverElement {
    async fn click(&self) -> Result<()> {
        self.0.click().await?;
        Ok(())
    }

    async fn fill(&self, text: &str) -> Result<()> {
        self.0.clear().await?;
        self.0.send_keys(text).await?;
        Ok(())
    }

    async fn select(&self, value: &str) -> Result<()> {
        SelectElement::new(&self.0)
            .await?
            .select_by_value(value)
            .await?;
        Ok(())
    }

    async fn is_visible(&self) -> Result<bool> {
        Ok(self.0.is_displayed().await?)
    }
}
