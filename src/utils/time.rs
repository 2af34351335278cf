use crate::utils::constants::SECONDS_PER_DAY;
use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Utc};

/// Today's date in UTC
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

fn days_in_year(date: NaiveDate) -> f64 {
    if date.with_ordinal(366).is_some() {
        366.0
    } else {
        365.0
    }
}

/// Year plus the fraction of that year elapsed at the start of `date`, e.g. 2017-07-02 is
/// 2017 + 182/365.
pub fn decimal_year(date: NaiveDate) -> f64 {
    date.year() as f64 + date.ordinal0() as f64 / days_in_year(date)
}

/// Same as [`decimal_year`] but resolving the time of day, to the nanosecond.
pub fn decimal_year_of_datetime(datetime: NaiveDateTime) -> f64 {
    let date = datetime.date();
    let seconds_into_year = date.ordinal0() as f64 * SECONDS_PER_DAY
        + datetime.num_seconds_from_midnight() as f64
        + datetime.nanosecond() as f64 * 1e-9;
    date.year() as f64 + seconds_into_year / (days_in_year(date) * SECONDS_PER_DAY)
}
