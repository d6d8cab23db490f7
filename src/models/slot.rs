use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Weekday};
use std::fmt;

use crate::models::window::BookingWindow;

/// BCCU squash courts in the order the court sheet lists them.
pub const BCCU_COURTS: [&str; 4] = ["025", "026", "028", "027"];

/// Index units between two bookable slots. The sheet numbers every 15
/// minutes but a booking always lasts 45.
const INDEX_STEP: usize = 3;
const MINUTES_PER_INDEX: i64 = 15;

/// A court sheet cell id, `a_<COURT>_<HH>_<MM>_<YYYY>-<MM>-<DD>_<SLOT>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotCandidate {
    court: &'static str,
    starts_at: NaiveDateTime,
    index: u32,
    id: String,
}

impl SlotCandidate {
    fn new(court: &'static str, starts_at: NaiveDateTime, index: u32) -> Self {
        let id = format!(
            "a_{}_{}_{}",
            court,
            starts_at.format("%H_%M_%Y-%m-%d"),
            index
        );
        SlotCandidate {
            court,
            starts_at,
            index,
            id,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn court(&self) -> &'static str {
        self.court
    }

    pub fn starts_at(&self) -> NaiveDateTime {
        self.starts_at
    }

    pub fn index(&self) -> u32 {
        self.index
    }
}

impl fmt::Display for SlotCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

/// Sheet numbering starts at 5am on weekdays and 6am on weekends.
pub fn opening_time(date: NaiveDate) -> NaiveTime {
    let hour = match date.weekday() {
        Weekday::Sat | Weekday::Sun => 6,
        _ => 5,
    };
    NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN)
}

/// Snaps a start offset (in quarter hours since opening) onto the first
/// bookable slot index at or after it. Bookable indices are 1, 4, 7, ...
fn snap_start_index(quarters: u32) -> u32 {
    let raw = quarters + 1;
    let remainder = raw % 3;
    let base = raw - remainder;
    if remainder <= 1 { base + 1 } else { base + 4 }
}

fn quarters_since(opening: NaiveDateTime, at: NaiveDateTime) -> u32 {
    ((at - opening).num_minutes() / MINUTES_PER_INDEX) as u32
}

/// Every court sheet cell that could satisfy `window` at the BCCU club.
///
/// Slots come out in chronological order with all four courts listed for each
/// start time. The end bound is inclusive, so a zero-width window on a
/// bookable start still yields one start time. A window that ends before
/// opening yields nothing; one that starts before opening is clamped to it.
pub fn bccu_slot_candidates(window: &BookingWindow) -> Vec<SlotCandidate> {
    let date = window.date();
    let opening = date.and_time(opening_time(date));
    let end = date.and_time(window.end());
    if end < opening {
        return Vec::new();
    }
    let start = date.and_time(window.start()).max(opening);

    let first = snap_start_index(quarters_since(opening, start));
    let last = quarters_since(opening, end) + 1;

    (first..=last)
        .step_by(INDEX_STEP)
        .flat_map(|index| {
            let starts_at =
                opening + TimeDelta::minutes((i64::from(index) - 1) * MINUTES_PER_INDEX);
            BCCU_COURTS
                .into_iter()
                .map(move |court| SlotCandidate::new(court, starts_at, index))
        })
        .collect()
}
