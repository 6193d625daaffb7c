//! Picking one representative sample per future day from interval forecasts.
//!
//! Dates and hours are taken in UTC, the same convention the normalizer uses
//! for `date` and `dayLabel` of interval forecasts.

use chrono::{DateTime, NaiveDate, Timelike, Utc};

use crate::payload::{OwForecastEntry, OwOneCallDaily};

/// Number of future days reported to clients.
pub const FORECAST_DAYS: usize = 3;

const MIDDAY_HOURS: std::ops::RangeInclusive<u32> = 11..=13;

/// Anything carrying a unix timestamp.
pub trait ForecastPoint {
    fn timestamp(&self) -> i64;
}

impl ForecastPoint for OwForecastEntry {
    fn timestamp(&self) -> i64 {
        self.dt
    }
}

pub fn utc_datetime(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}

/// Select up to [`FORECAST_DAYS`] points from a 3-hour interval feed.
///
/// A midday sample (11:00 to 13:00) is preferred for each day. If that does
/// not yield enough days, the selection is redone taking the first sample of
/// every day regardless of hour. `today` is never selected.
pub fn select_daily<T: ForecastPoint>(points: &[T], today: NaiveDate) -> Vec<&T> {
    let mut ordered: Vec<(&T, DateTime<Utc>)> = points
        .iter()
        .filter_map(|p| utc_datetime(p.timestamp()).map(|at| (p, at)))
        .filter(|(_, at)| at.date_naive() != today)
        .collect();
    ordered.sort_by_key(|(_, at)| *at);

    let midday = first_per_date(&ordered, |at| MIDDAY_HOURS.contains(&at.hour()));
    if midday.len() >= FORECAST_DAYS {
        return midday;
    }

    tracing::debug!(
        days = midday.len(),
        "not enough midday samples, falling back to first sample per day"
    );
    first_per_date(&ordered, |_| true)
}

fn first_per_date<'a, T>(
    ordered: &[(&'a T, DateTime<Utc>)],
    accept: impl Fn(&DateTime<Utc>) -> bool,
) -> Vec<&'a T> {
    let mut dates: Vec<NaiveDate> = Vec::with_capacity(FORECAST_DAYS);
    let mut picked = Vec::with_capacity(FORECAST_DAYS);

    for (point, at) in ordered {
        if picked.len() == FORECAST_DAYS {
            break;
        }
        let date = at.date_naive();
        if accept(at) && !dates.contains(&date) {
            dates.push(date);
            picked.push(*point);
        }
    }

    picked
}

/// The one-call daily array starts with today; the next three entries are the forecast.
pub fn select_daily_array(days: &[OwOneCallDaily]) -> &[OwOneCallDaily] {
    let end = days.len().min(FORECAST_DAYS + 1);
    days.get(1..end).unwrap_or(&[])
}
