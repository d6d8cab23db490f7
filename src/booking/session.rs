use chrono::NaiveDate;
use thirtyfour::support::sleep;
use thiserror::Error;
use tracing::{error, info, warn};
use url::Url;

use crate::booking::attempt::book_slot;
use crate::booking::browser::{Browser, PageElement, WAIT_POLLS, wait_for_element};
use crate::booking::constants::*;
use crate::config::Timeouts;
use crate::models::club::Club;
use crate::models::outcome::BookingOutcome;
use crate::models::request::Credentials;
use crate::models::slot::SlotCandidate;

/// Reasons a run stops before the attempt loop finishes.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("court booking website unavailable: {0}")]
    SiteUnavailable(String),
    #[error("incorrect login credentials")]
    LoginRejected,
    #[error("{0} control did not appear")]
    MissingControl(&'static str),
    #[error(transparent)]
    Driver(#[from] anyhow::Error),
}

impl From<&SessionError> for BookingOutcome {
    fn from(err: &SessionError) -> Self {
        match err {
            SessionError::LoginRejected => BookingOutcome::LoginFailed,
            SessionError::SiteUnavailable(_)
            | SessionError::MissingControl(_)
            | SessionError::Driver(_) => BookingOutcome::SiteUnavailable,
        }
    }
}

/// One logged-in pass over the court sheet. Owns the browser until `close`.
pub struct BookingSession<B: Browser> {
    browser: B,
    timeouts: Timeouts,
}

impl<B: Browser> BookingSession<B> {
    pub fn new(browser: B, timeouts: Timeouts) -> Self {
        BookingSession { browser, timeouts }
    }

    /// Logs in, opens the club's sheet for `date` and books the first
    /// candidate the site accepts.
    pub async fn book(
        &mut self,
        site_url: &Url,
        credentials: &Credentials,
        club: Club,
        date: NaiveDate,
        candidates: &[SlotCandidate],
    ) -> BookingOutcome {
        match self.run(site_url, credentials, club, date, candidates).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Booking run aborted: {}", e);
                BookingOutcome::from(&e)
            }
        }
    }

    /// Ends the browser session. Consumes the session so it can only happen once.
    pub async fn close(self) {
        info!("Quitting browser session");
        if let Err(e) = self.browser.quit().await {
            warn!("Failed to quit browser cleanly: {:?}", e);
        }
    }

    async fn run(
        &mut self,
        site_url: &Url,
        credentials: &Credentials,
        club: Club,
        date: NaiveDate,
        candidates: &[SlotCandidate],
    ) -> Result<BookingOutcome, SessionError> {
        self.login(site_url, credentials).await?;
        self.select_sheet(club, date).await?;
        self.attempt_all(candidates).await
    }

    async fn control(&self, id: &'static str) -> Result<B::Element, SessionError> {
        self.browser
            .find_by_id(id)
            .await?
            .ok_or(SessionError::MissingControl(id))
    }

    async fn login(&mut self, site_url: &Url, credentials: &Credentials) -> Result<(), SessionError> {
        self.browser
            .visit(site_url.as_str())
            .await
            .map_err(|e| SessionError::SiteUnavailable(format!("{e:#}")))?;

        let status = self.browser.status_code().await?;
        if status != 200 {
            return Err(SessionError::SiteUnavailable(format!(
                "{site_url} answered with status {status}"
            )));
        }

        self.control(EMAIL_INPUT_ID).await?.fill(&credentials.user).await?;
        self.control(PASSWORD_INPUT_ID)
            .await?
            .fill(&credentials.password)
            .await?;
        self.control(LOGIN_BUTTON_ID).await?.click().await?;

        if self.await_login_response().await? {
            return Err(SessionError::LoginRejected);
        }

        let status = self.browser.status_code().await?;
        if status != 200 {
            return Err(SessionError::SiteUnavailable(format!(
                "login answered with status {status}"
            )));
        }

        if wait_for_element(&self.browser, LOGIN_ERROR_ID, self.timeouts.login_result)
            .await?
            .is_some()
        {
            return Err(SessionError::LoginRejected);
        }

        info!(user = %credentials.user, "Logged in to court booking website");
        Ok(())
    }

    /// Polls until the login form is gone or the error indicator shows up.
    /// Returns whether the login was rejected. If the form is still there when
    /// the wait runs out, the status read afterwards is the login page's own.
    async fn await_login_response(&self) -> Result<bool, SessionError> {
        let interval = self.timeouts.login_result / WAIT_POLLS;
        for poll in 0..=WAIT_POLLS {
            if self.browser.find_by_id(LOGIN_ERROR_ID).await?.is_some() {
                return Ok(true);
            }
            if self.browser.find_by_id(LOGIN_BUTTON_ID).await?.is_none() {
                return Ok(false);
            }
            if poll < WAIT_POLLS {
                sleep(interval).await;
            }
        }
        Ok(false)
    }

    async fn select_sheet(&self, club: Club, date: NaiveDate) -> Result<(), SessionError> {
        wait_for_element(&self.browser, LOCATION_SELECT_ID, self.timeouts.control)
            .await?
            .ok_or(SessionError::MissingControl("club selection"))?
            .select(club.location_id())
            .await?;

        let day = date.format("%Y-%m-%d").to_string();
        wait_for_element(&self.browser, DATE_SELECT_ID, self.timeouts.control)
            .await?
            .ok_or(SessionError::MissingControl("date selection"))?
            .select(&day)
            .await?;

        let status = self.browser.status_code().await?;
        if status != 200 && status != 302 {
            return Err(SessionError::SiteUnavailable(format!(
                "court sheet for {day} answered with status {status}"
            )));
        }

        info!(club = club.name(), %day, "Opened court sheet");
        Ok(())
    }

    async fn attempt_all(&self, candidates: &[SlotCandidate]) -> Result<BookingOutcome, SessionError> {
        for candidate in candidates {
            let Some(slot) = self.browser.find_by_id(candidate.id()).await? else {
                continue;
            };

            info!(
                slot = %candidate,
                index = candidate.index(),
                starts_at = %candidate.starts_at(),
                "Trying to book court {}",
                candidate.court()
            );
            match book_slot(&self.browser, &slot, &self.timeouts).await {
                Ok(true) => {
                    info!(slot = %candidate, "Court successfully booked");
                    return Ok(BookingOutcome::Success);
                }
                Ok(false) => {}
                Err(e) => error!(slot = %candidate, "Booking attempt failed: {:?}", e),
            }

            sleep(self.timeouts.settle).await;
        }

        Ok(BookingOutcome::AllAttemptsFailed)
    }
}
