mod booking;
mod cli;
mod config;
mod handlers;
mod logging;
mod models;
mod notify;

use chrono::Local;
use clap::Parser;
use dotenv::dotenv;
use tracing::{Instrument, error, info, info_span, warn};
use uuid::Uuid;

use crate::booking::webdriver::WebDriverLauncher;
use crate::cli::Cli;
use crate::config::Settings;
use crate::handlers::reserve::{booking_date, reserve};
use crate::models::request::{BookingRequest, Credentials};
use crate::models::window::BookingWindow;
use crate::notify::smtp::SmtpNotifier;

// Run failures are reported through the log and the outcome mail, so the
// process exits 0 once the arguments are valid.
#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.logfile.as_deref()) {
        eprintln!("{e:#}");
        return;
    }
    dotenv().ok();

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            error!("Invalid configuration: {:#}", e);
            return;
        }
    };

    let date = booking_date(Local::now().date_naive());
    let window = match BookingWindow::new(date, cli.start_time, cli.end_time) {
        Ok(window) => window,
        Err(e) => {
            error!("Invalid booking window: {}", e);
            return;
        }
    };

    let request = BookingRequest {
        club: cli.club,
        credentials: Credentials {
            user: cli.user,
            password: cli.password,
        },
        window,
    };

    let launcher = WebDriverLauncher::new(settings.webdriver_url.clone(), cli.headless);
    let notifier = SmtpNotifier::new(settings.smtp.clone());

    let span = info_span!("booking_run", run_id = %Uuid::new_v4(), club = %request.club);
    let outcome = reserve(&launcher, &notifier, &request, &settings)
        .instrument(span)
        .await;

    match outcome {
        Some(outcome) if outcome.is_success() => info!(%outcome, "Booking run finished"),
        Some(outcome) => warn!(%outcome, "Booking run finished without a court"),
        None => {}
    }
}
