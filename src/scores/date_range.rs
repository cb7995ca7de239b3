use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Inclusive range of instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }
}

fn local_instant(naive: NaiveDateTime, earliest: bool) -> Option<DateTime<Utc>> {
    let resolved = Local.from_local_datetime(&naive);
    let local = if earliest {
        resolved.earliest()
    } else {
        resolved.latest()
    };
    local.map(|dt| dt.with_timezone(&Utc))
}

fn local_bounds(first_day: NaiveDate, last_day: NaiveDate, end_millis: u32) -> Option<TimeRange> {
    let start = local_instant(first_day.and_hms_opt(0, 0, 0)?, true)?;
    let end = local_instant(last_day.and_hms_milli_opt(23, 59, 59, end_millis)?, false)?;
    Some(TimeRange { start, end })
}

/// Parses `YYYY-MM-DD` component by component, so no timezone ever shifts the day.
/// All three components must be present and non-zero.
pub fn parse_calendar_date(date: &str) -> Option<NaiveDate> {
    let mut parts = date.trim().split('-').map(|part| part.trim().parse::<u32>().ok());
    let year = parts.next()??;
    let month = parts.next()??;
    let day = parts.next()??;
    if year == 0 || month == 0 || day == 0 {
        return None;
    }
    NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, day)
}

/// `[00:00:00.000, 23:59:59.999]` of the given server-local calendar day.
pub fn day_range(date: &str) -> Option<TimeRange> {
    let day = parse_calendar_date(date)?;
    local_bounds(day, day, 999)
}

/// `[first day 00:00:00, last day 23:59:59]` of the given server-local month.
pub fn month_range(month: &str, year: &str) -> Option<TimeRange> {
    let month = month.trim().parse::<u32>().ok()?;
    let year = year.trim().parse::<i32>().ok()?;
    let first_day = NaiveDate::from_ymd_opt(year, month, 1)?;
    let last_day = match month {
        12 => NaiveDate::from_ymd_opt(year + 1, 1, 1)?,
        _ => NaiveDate::from_ymd_opt(year, month + 1, 1)?,
    }
    .pred_opt()?;
    local_bounds(first_day, last_day, 0)
}
