use anyhow::Result;
use std::time::Duration;
use thirtyfour::support::sleep;

/// Number of polls a bounded wait makes before giving up.
pub const WAIT_POLLS: u32 = 5;

/// The slice of a browser session the booking flow needs.
#[allow(async_fn_in_trait)]
pub trait Browser {
    type Element: PageElement;

    async fn visit(&mut self, url: &str) -> Result<()>;

    /// HTTP status of the page currently loaded.
    async fn status_code(&self) -> Result<u16>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Self::Element>>;

    async fn find_by_css(&self, selector: &str) -> Result<Vec<Self::Element>>;

    async fn quit(self) -> Result<()>;
}

#[allow(async_fn_in_trait)]
pub trait PageElement {
    async fn click(&self) -> Result<()>;

    async fn fill(&self, text: &str) -> Result<()>;

    /// Picks the option with `value` in a `<select>`.
    async fn select(&self, value: &str) -> Result<()>;

    async fn is_visible(&self) -> Result<bool>;
}

/// Opens browser sessions. A run asks for at most one.
#[allow(async_fn_in_trait)]
pub trait Launcher {
    type Browser: Browser;

    async fn launch(&self) -> Result<Self::Browser>;
}

fn poll_interval(timeout: Duration) -> Duration {
    timeout / WAIT_POLLS
}

/// Looks the element up until it exists or `timeout` runs out.
pub async fn wait_for_element<B: Browser>(
    browser: &B,
    id: &str,
    timeout: Duration,
) -> Result<Option<B::Element>> {
    for poll in 0..=WAIT_POLLS {
        if let Some(element) = browser.find_by_id(id).await? {
            return Ok(Some(element));
        }
        if poll < WAIT_POLLS {
            sleep(poll_interval(timeout)).await;
        }
    }
    Ok(None)
}

/// Waits for an element to be shown. Returns whether it ended up visible.
pub async fn wait_for_visible<E: PageElement>(element: &E, timeout: Duration) -> Result<bool> {
    for _ in 0..WAIT_POLLS {
        if element.is_visible().await? {
            return Ok(true);
        }
        sleep(poll_interval(timeout)).await;
    }
    element.is_visible().await
}

/// First visible element matching `selector`, if any.
pub async fn first_visible<B: Browser>(browser: &B, selector: &str) -> Result<Option<B::Element>> {
    for element in browser.find_by_css(selector).await? {
        if element.is_visible().await? {
            return Ok(Some(element));
        }
    }
    Ok(None)
}
