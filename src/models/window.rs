use chrono::{NaiveDate, NaiveTime, Timelike};
use thiserror::Error;

/// Booking times are entered as `HH:MM AM/PM`.
const TIME_FORMAT: &str = "%I:%M%p";
const QUARTER_MINUTES: u32 = 15;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WindowError {
    #[error("invalid time '{0}', expected HH:MM AM/PM")]
    Unparsable(String),
    #[error("time '{0}' rounds past midnight")]
    PastMidnight(String),
    #[error("{0} is not on a 15 minute boundary")]
    Unaligned(NaiveTime),
    #[error("start time {start} is after end time {end}")]
    Reversed { start: NaiveTime, end: NaiveTime },
}

/// Parses a `HH:MM AM/PM` time and rounds it up to the next quarter hour.
///
/// Whitespace anywhere in the input is ignored, so `9:05 am` and `9:05AM` are
/// the same time.
pub fn parse_quarter_hour(input: &str) -> Result<NaiveTime, WindowError> {
    let compact: String = input.split_whitespace().collect();
    let time = NaiveTime::parse_from_str(&compact, TIME_FORMAT)
        .map_err(|_| WindowError::Unparsable(input.to_string()))?;

    let remainder = time.minute() % QUARTER_MINUTES;
    if remainder == 0 {
        return Ok(time);
    }

    let minutes = time.hour() * 60 + time.minute() - remainder + QUARTER_MINUTES;
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0)
        .ok_or_else(|| WindowError::PastMidnight(input.to_string()))
}

/// The date and time range a court should be booked in. Both bounds sit on a
/// quarter hour and the range may be zero-width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingWindow {
    date: NaiveDate,
    start: NaiveTime,
    end: NaiveTime,
}

impl BookingWindow {
    pub fn new(date: NaiveDate, start: NaiveTime, end: NaiveTime) -> Result<Self, WindowError> {
        for time in [start, end] {
            if time.minute() % QUARTER_MINUTES != 0 || time.second() != 0 {
                return Err(WindowError::Unaligned(time));
            }
        }
        if start > end {
            return Err(WindowError::Reversed { start, end });
        }
        Ok(BookingWindow { date, start, end })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }
}
