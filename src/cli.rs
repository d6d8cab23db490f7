use chrono::NaiveTime;
use clap::Parser;
use std::path::PathBuf;

use crate::models::club::Club;
use crate::models::window::parse_quarter_hour;

/// Book a squash court at the Bay Club one week ahead.
#[derive(Debug, Parser)]
#[command(name = "courtbooking", version)]
pub struct Cli {
    /// Which gym for the court booking
    #[arg(long, value_enum, default_value_t = Club::Bccu)]
    pub club: Club,

    /// User name for court booking website
    #[arg(long)]
    pub user: String,

    /// Password for court booking website
    #[arg(long)]
    pub password: String,

    /// Start time for booking - format HH:MM AM/PM
    #[arg(long, value_parser = parse_quarter_hour)]
    pub start_time: NaiveTime,

    /// End time for booking - format HH:MM AM/PM
    #[arg(long, value_parser = parse_quarter_hour)]
    pub end_time: NaiveTime,

    /// Run the browser without a visible window
    #[arg(long)]
    pub headless: bool,

    /// Log file to be used for logging
    #[arg(long)]
    pub logfile: Option<PathBuf>,
}
