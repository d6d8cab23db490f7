//! In-memory court sheet used by the booking tests.
//!
//! Elements are addressed by id. Clicking an element, or picking an option in
//! it, applies the effects registered for it, which is how tests script dialogs appearing after a slot
//! is clicked. Effects can also be tied to the n-th lookup of an element, for
//! pages that change while the flow is polling.

use anyhow::{Result, anyhow};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::booking::browser::{Browser, Launcher, PageElement};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Visit(String),
    Click(String),
    Fill(String, String),
    Select(String, String),
    Quit,
}

#[derive(Debug, Clone)]
pub enum Effect {
    /// Adds the element if needed and makes it visible.
    Show(&'static str),
    Hide(&'static str),
    Remove(&'static str),
    Status(u16),
}

#[derive(Debug, Default)]
struct Node {
    visible: bool,
    broken: bool,
    visibility_checks: usize,
}

#[derive(Debug)]
struct SiteState {
    status: u16,
    unreachable: bool,
    nodes: HashMap<String, Node>,
    selectors: HashMap<String, Vec<String>>,
    on_click: HashMap<String, Vec<Effect>>,
    on_lookup: HashMap<String, (usize, Vec<Effect>)>,
    lookups: HashMap<String, usize>,
    events: Vec<Event>,
    launches: usize,
}

#[derive(Debug, Clone)]
pub struct FakeSite {
    state: Arc<Mutex<SiteState>>,
}

impl Default for FakeSite {
    fn default() -> Self {
        FakeSite {
            state: Arc::new(Mutex::new(SiteState {
                status: 200,
                unreachable: false,
                nodes: HashMap::new(),
                selectors: HashMap::new(),
                on_click: HashMap::new(),
                on_lookup: HashMap::new(),
                lookups: HashMap::new(),
                events: Vec::new(),
                launches: 0,
            })),
        }
    }
}

impl FakeSite {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, SiteState> {
        self.state.lock().unwrap()
    }

    pub fn with_status(self, status: u16) -> Self {
        self.lock().status = status;
        self
    }

    pub fn unreachable(self) -> Self {
        self.lock().unreachable = true;
        self
    }

    pub fn with_element(self, id: &str, visible: bool) -> Self {
        self.lock().nodes.insert(
            id.to_string(),
            Node {
                visible,
                ..Node::default()
            },
        );
        self
    }

    /// A visible element whose clicks fail like an intercepted WebDriver click.
    pub fn with_broken_element(self, id: &str) -> Self {
        self.lock().nodes.insert(
            id.to_string(),
            Node {
                visible: true,
                broken: true,
                ..Node::default()
            },
        );
        self
    }

    pub fn with_css(self, selector: &str, ids: &[&str]) -> Self {
        self.lock().selectors.insert(
            selector.to_string(),
            ids.iter().map(|id| id.to_string()).collect(),
        );
        self
    }

    pub fn on_click(self, id: &str, effects: Vec<Effect>) -> Self {
        self.lock().on_click.insert(id.to_string(), effects);
        self
    }

    /// Applies `effects` just before the `nth` lookup of `id` is answered.
    pub fn after_lookups(self, id: &str, nth: usize, effects: Vec<Effect>) -> Self {
        self.lock()
            .on_lookup
            .insert(id.to_string(), (nth, effects));
        self
    }

    /// The court sheet after a successful login, with both dropdowns present.
    pub fn logged_in_sheet() -> Self {
        FakeSite::new()
            .with_element("InputEmail1", true)
            .with_element("InputPassword1", true)
            .with_element("loginButton", true)
            .with_element("squashlocation", true)
            .with_element("myid", true)
    }

    pub fn browser(&self) -> FakeBrowser {
        FakeBrowser { site: self.clone() }
    }

    pub fn launcher(&self) -> FakeLauncher {
        FakeLauncher {
            site: self.clone(),
            fail: false,
        }
    }

    pub fn events(&self) -> Vec<Event> {
        self.lock().events.clone()
    }

    pub fn clicks(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Click(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    pub fn selections(&self) -> Vec<(String, String)> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Select(id, value) => Some((id, value)),
                _ => None,
            })
            .collect()
    }

    pub fn quits(&self) -> usize {
        self.events()
            .iter()
            .filter(|event| **event == Event::Quit)
            .count()
    }

    pub fn launches(&self) -> usize {
        self.lock().launches
    }

    pub fn visibility_checks(&self, id: &str) -> usize {
        self.lock()
            .nodes
            .get(id)
            .map_or(0, |node| node.visibility_checks)
    }

    fn apply(&self, effects: &[Effect]) {
        let mut state = self.lock();
        for effect in effects {
            match effect {
                Effect::Show(id) => state.nodes.entry(id.to_string()).or_default().visible = true,
                Effect::Hide(id) => {
                    if let Some(node) = state.nodes.get_mut(*id) {
                        node.visible = false;
                    }
                }
                Effect::Remove(id) => {
                    state.nodes.remove(*id);
                }
                Effect::Status(status) => state.status = *status,
            }
        }
    }
}

#[derive(Debug)]
pub struct FakeBrowser {
    site: FakeSite,
}

impl Browser for FakeBrowser {
    type Element = FakeElement;

    async fn visit(&mut self, url: &str) -> Result<()> {
        let mut state = self.site.lock();
        state.events.push(Event::Visit(url.to_string()));
        if state.unreachable {
            return Err(anyhow!("connection refused: {url}"));
        }
        Ok(())
    }

    async fn status_code(&self) -> Result<u16> {
        Ok(self.site.lock().status)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<FakeElement>> {
        let effects = {
            let mut state = self.site.lock();
            let seen = state.lookups.entry(id.to_string()).or_default();
            *seen += 1;
            let seen = *seen;
            match state.on_lookup.get(id) {
                Some((nth, effects)) if *nth == seen => effects.clone(),
                _ => Vec::new(),
            }
        };
        self.site.apply(&effects);

        let found = self.site.lock().nodes.contains_key(id);
        Ok(found.then(|| FakeElement {
            id: id.to_string(),
            site: self.site.clone(),
        }))
    }

    async fn find_by_css(&self, selector: &str) -> Result<Vec<FakeElement>> {
        let state = self.site.lock();
        let ids = state.selectors.get(selector).cloned().unwrap_or_default();
        Ok(ids
            .into_iter()
            .filter(|id| state.nodes.contains_key(id))
            .map(|id| FakeElement {
                id,
                site: self.site.clone(),
            })
            .collect())
    }

    async fn quit(self) -> Result<()> {
        self.site.lock().events.push(Event::Quit);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct FakeElement {
    id: String,
    site: FakeSite,
}

impl FakeElement {
    fn ensure_attached(&self) -> Result<()> {
        if self.site.lock().nodes.contains_key(&self.id) {
            Ok(())
        } else {
            Err(anyhow!("stale element reference: {}", self.id))
        }
    }
}

impl PageElement for FakeElement {
    async fn click(&self) -> Result<()> {
        self.ensure_attached()?;
        let effects = {
            let mut state = self.site.lock();
            if state.nodes.get(&self.id).is_some_and(|node| node.broken) {
                return Err(anyhow!("element click intercepted: {}", self.id));
            }
            state.events.push(Event::Click(self.id.clone()));
            state.on_click.get(&self.id).cloned().unwrap_or_default()
        };
        self.site.apply(&effects);
        Ok(())
    }

    async fn fill(&self, text: &str) -> Result<()> {
        self.ensure_attached()?;
        self.site
            .lock()
            .events
            .push(Event::Fill(self.id.clone(), text.to_string()));
        Ok(())
    }

    async fn select(&self, value: &str) -> Result<()> {
        self.ensure_attached()?;
        let effects = {
            let mut state = self.site.lock();
            state
                .events
                .push(Event::Select(self.id.clone(), value.to_string()));
            state.on_click.get(&self.id).cloned().unwrap_or_default()
        };
        self.site.apply(&effects);
        Ok(())
    }

    async fn is_visible(&self) -> Result<bool> {
        let mut state = self.site.lock();
        match state.nodes.get_mut(&self.id) {
            Some(node) => {
                node.visibility_checks += 1;
                Ok(node.visible)
            }
            None => Err(anyhow!("stale element reference: {}", self.id)),
        }
    }
}

pub struct FakeLauncher {
    site: FakeSite,
    fail: bool,
}

impl FakeLauncher {
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }
}

impl Launcher for FakeLauncher {
    type Browser = FakeBrowser;

    async fn launch(&self) -> Result<FakeBrowser> {
        if self.fail {
            return Err(anyhow!("session not created: webdriver is not running"));
        }
        self.site.lock().launches += 1;
        Ok(self.site.browser())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn default_site_is_up_and_empty() {
        let site = FakeSite::default();
        let mut browser = site.browser();

        browser.visit("https://courtbooking.bayclubs.com/").await.unwrap();

        assert_eq!(browser.status_code().await.unwrap(), 200);
        assert!(browser.find_by_id("loginButton").await.unwrap().is_none());
        assert_eq!(site.launches(), 0);
    }

    #[tokio::test]
    async fn lookup_effects_fire_on_the_nth_lookup() {
        let site = FakeSite::new()
            .with_element("loginButton", true)
            .after_lookups("loginButton", 2, vec![Effect::Remove("loginButton")]);
        let browser = site.browser();

        assert!(browser.find_by_id("loginButton").await.unwrap().is_some());
        assert!(browser.find_by_id("loginButton").await.unwrap().is_none());
    }
}
