use chrono::{Days, NaiveDate};
use tracing::{error, info};

use crate::booking::browser::Launcher;
use crate::booking::constants::DAYS_AHEAD;
use crate::booking::session::BookingSession;
use crate::config::Settings;
use crate::models::club::Club;
use crate::models::email::OutcomeMessage;
use crate::models::outcome::BookingOutcome;
use crate::models::request::BookingRequest;
use crate::models::slot::bccu_slot_candidates;
use crate::notify::Notifier;

/// The day whose court sheet opens today.
pub fn booking_date(today: NaiveDate) -> NaiveDate {
    today.checked_add_days(Days::new(DAYS_AHEAD)).unwrap_or(today)
}

/// Runs one booking pass for the requested club. Returns `None` for clubs
/// that cannot be booked yet.
pub async fn reserve<L: Launcher, N: Notifier>(
    launcher: &L,
    notifier: &N,
    request: &BookingRequest,
    settings: &Settings,
) -> Option<BookingOutcome> {
    match request.club {
        Club::Bccu => Some(reserve_bccu(launcher, notifier, request, settings).await),
        Club::Bcsc => {
            info!("Reserving courts at {} is not implemented", request.club.name());
            None
        }
    }
}

async fn reserve_bccu<L: Launcher, N: Notifier>(
    launcher: &L,
    notifier: &N,
    request: &BookingRequest,
    settings: &Settings,
) -> BookingOutcome {
    let window = &request.window;
    let candidates = bccu_slot_candidates(window);
    if candidates.is_empty() {
        error!(
            "No bookable court between {} and {} on {}",
            window.start(),
            window.end(),
            window.date()
        );
        let outcome = BookingOutcome::NoCandidates;
        send_outcome(notifier, request, outcome).await;
        return outcome;
    }
    info!(candidates = candidates.len(), date = %window.date(), "Generated court ids");

    let browser = match launcher.launch().await {
        Ok(browser) => browser,
        Err(e) => {
            error!("Unable to open browser session: {:?}", e);
            let outcome = BookingOutcome::SiteUnavailable;
            send_outcome(notifier, request, outcome).await;
            return outcome;
        }
    };

    let mut session = BookingSession::new(browser, settings.timeouts);
    let outcome = session
        .book(
            &settings.site_url,
            &request.credentials,
            request.club,
            window.date(),
            &candidates,
        )
        .await;

    send_outcome(notifier, request, outcome).await;
    session.close().await;
    outcome
}

async fn send_outcome<N: Notifier>(notifier: &N, request: &BookingRequest, outcome: BookingOutcome) {
    let message = OutcomeMessage::new(&request.credentials.user, outcome, &request.window);
    if let Err(e) = notifier.notify(&message).await {
        error!("Unable to send outcome mail: {:?}", e);
    }
}
