use std::fmt;

/// How a booking run ended. Only used to pick the notification text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingOutcome {
    Success,
    NoCandidates,
    LoginFailed,
    SiteUnavailable,
    AllAttemptsFailed,
}

impl BookingOutcome {
    pub fn subject(&self) -> &'static str {
        match self {
            BookingOutcome::Success => "[courtbooking] court reserved successfully",
            BookingOutcome::NoCandidates => {
                "[courtbooking] no bookable court for given start and end time"
            }
            BookingOutcome::LoginFailed => {
                "[courtbooking] unable to log in to the court booking website"
            }
            BookingOutcome::SiteUnavailable => {
                "[courtbooking] court booking website unavailable, check manually"
            }
            BookingOutcome::AllAttemptsFailed => {
                "[courtbooking] unable to reserve a court successfully, check manually"
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, BookingOutcome::Success)
    }
}

impl fmt::Display for BookingOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BookingOutcome::Success => "success",
            BookingOutcome::NoCandidates => "no candidates",
            BookingOutcome::LoginFailed => "login failed",
            BookingOutcome::SiteUnavailable => "site unavailable",
            BookingOutcome::AllAttemptsFailed => "all attempts failed",
        };
        f.write_str(name)
    }
}
