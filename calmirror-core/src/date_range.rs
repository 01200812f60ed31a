//! Date range for filtering events.

use chrono::{Duration, Local, Months, NaiveDate, NaiveTime, TimeZone};

use crate::error::{CalendarError, CalendarResult};
use crate::event::Instant;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Date range for filtering events.
/// None values mean unbounded in that direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    pub from: Instant,
    pub to: Instant,
}

impl DateRange {
    /// `days` days starting at local midnight of `today`.
    pub fn upcoming(today: NaiveDate, days: i64) -> CalendarResult<Self> {
        if days < 0 {
            return Err(CalendarError::InvalidInput(format!(
                "day count must not be negative, got {days}"
            )));
        }

        Ok(DateRange {
            from: local_midnight(today),
            to: local_midnight(add_days(today, days)?),
        })
    }

    /// Parse the `events` command arguments.
    /// - none: the next `default_days` days
    /// - `today`, `week`, `month`: a day, seven days or a calendar month from today
    /// - `YYYY-MM-DD`: that day
    /// - `YYYY-MM-DD YYYY-MM-DD`: first day through the end of the second
    pub fn from_args(args: &[String], today: NaiveDate, default_days: i64) -> CalendarResult<Self> {
        match args {
            [] => Self::upcoming(today, default_days),
            [single] => match single.as_str() {
                "today" => Self::upcoming(today, 1),
                "week" => Self::upcoming(today, 7),
                "month" => {
                    let end = today
                        .checked_add_months(Months::new(1))
                        .ok_or_else(out_of_range)?;
                    Ok(DateRange {
                        from: local_midnight(today),
                        to: local_midnight(end),
                    })
                }
                date => Self::upcoming(parse_date(date, "date")?, 1),
            },
            [first, last] => {
                let first = parse_date(first, "date")?;
                let last = parse_date(last, "end date")?;
                Ok(DateRange {
                    from: local_midnight(first),
                    to: local_midnight(add_days(last, 1)?),
                })
            }
            _ => Err(CalendarError::InvalidInput(
                "expected at most two dates".into(),
            )),
        }
    }
}

fn out_of_range() -> CalendarError {
    CalendarError::InvalidInput("date out of range".into())
}

fn add_days(date: NaiveDate, days: i64) -> CalendarResult<NaiveDate> {
    Duration::try_days(days)
        .and_then(|delta| date.checked_add_signed(delta))
        .ok_or_else(out_of_range)
}

fn parse_date(s: &str, what: &str) -> CalendarResult<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| {
        CalendarError::InvalidInput(format!(
            "invalid {what} {s:?} (use YYYY-MM-DD, today, week, or month)"
        ))
    })
}

/// Start of `date` in the local timezone, or in UTC if local midnight doesn't exist.
fn local_midnight(date: NaiveDate) -> Instant {
    let naive = date.and_time(NaiveTime::default());

    let local = Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.fixed_offset());

    local.or_else(|| Some(naive.and_utc().fixed_offset()))
}
