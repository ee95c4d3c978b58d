// Season labels ("2024-25") derived from a calendar date.

use chrono::{Datelike, Local, NaiveDate};

/// First month of a new season.
const SEASON_START_MONTH: u32 = 10;

/// Season label for `date`. October onwards belongs to the season starting
/// that year; anything earlier belongs to the one that started the year before.
pub fn season_for(date: NaiveDate) -> String {
    let start = if date.month() >= SEASON_START_MONTH {
        date.year()
    } else {
        date.year() - 1
    };
    format!("{}-{:02}", start, (start + 1).rem_euclid(100))
}

/// Season label for today's local date.
pub fn current_season() -> String {
    season_for(Local::now().date_naive())
}
