use chrono::{Datelike, Duration, NaiveDate, ParseError};

/// Canonical date format used everywhere a date crosses the API boundary.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Number of cells in a rendered month grid: always six full weeks so the
/// calendar layout never changes height between months.
pub const GRID_DAYS: usize = 42;

/// Format a date as `YYYY-MM-DD`. Round-trips losslessly through
/// [`parse_date`].
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a `YYYY-MM-DD` string as a plain calendar date, no time-of-day and
/// no timezone involved. Malformed input is rejected up front rather than
/// carried along as a nonsense date.
pub fn parse_date(s: &str) -> Result<NaiveDate, ParseError> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
}

/// Shift a date by `days` (may be negative). Month and year rollovers are
/// handled by chrono's date arithmetic.
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    date + Duration::days(days)
}

/// Day-precision equality. `NaiveDate` has no time component, so this is
/// plain equality; it exists so calendar call sites read as intent.
pub fn is_same_day(a: NaiveDate, b: NaiveDate) -> bool {
    a == b
}

/// The 42-day grid for a month view: six consecutive weeks starting on the
/// Sunday on or before the 1st. `month` is 1-based; returns `None` for an
/// out-of-range month.
pub fn month_grid(year: i32, month: u32) -> Option<Vec<NaiveDate>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let back = first.weekday().num_days_from_sunday() as i64;
    let start = first - Duration::days(back);
    Some((0..GRID_DAYS as i64).map(|i| start + Duration::days(i)).collect())
}

/// True when `date` falls in the given 1-based month of `year`.
pub fn is_in_month(date: NaiveDate, year: i32, month: u32) -> bool {
    date.year() == year && date.month() == month
}

pub fn month_name(month: u32) -> Option<&'static str> {
    const NAMES: [&str; 12] = [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ];
    NAMES.get(month.checked_sub(1)? as usize).copied()
}
