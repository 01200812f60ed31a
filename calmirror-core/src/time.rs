//! Resolution of DTSTART/DTEND style property values into instants.
//!
//! Handles:
//! - VALUE=DATE: `DTSTART;VALUE=DATE:20240315` (all-day, no zone conversion)
//! - TZID parameter: `DTSTART;TZID=Europe/Berlin:20240315T090000`
//! - UTC: `DTSTART:20240315T090000Z`
//! - Floating: `DTSTART:20240315T090000` (process local time)
//!
//! Unknown zones fall back to local time and unparseable values resolve to
//! no instant at all. Nothing here returns an error.

use chrono::{
    DateTime, Duration, FixedOffset, Local, LocalResult, NaiveDate, NaiveDateTime, NaiveTime,
    Offset, TimeZone,
};
use chrono_tz::Tz;

use crate::event::Instant;

const DATE_FORMAT: &str = "%Y%m%d";
const DATE_TIME_FORMAT: &str = "%Y%m%dT%H%M%S";

/// The property parameters that affect time resolution.
#[derive(Debug, Default, Clone, Copy)]
pub struct TimeParams<'a> {
    /// The VALUE parameter, e.g. `DATE` or `DATE-TIME`.
    pub value_type: Option<&'a str>,
    /// The TZID parameter.
    pub tzid: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved {
    pub instant: Instant,
    pub all_day: bool,
}

impl Resolved {
    /// A missing or unusable property.
    pub const ABSENT: Resolved = Resolved {
        instant: None,
        all_day: false,
    };

    fn date(date: NaiveDate) -> Self {
        Resolved {
            instant: Some(midnight(date)),
            all_day: true,
        }
    }
}

/// Resolve a raw property value with its parameters.
pub fn resolve(value: &str, params: &TimeParams<'_>) -> Resolved {
    let value = value.trim();

    if params
        .value_type
        .is_some_and(|v| v.eq_ignore_ascii_case("DATE"))
    {
        return parse_date(value).map_or(Resolved::ABSENT, Resolved::date);
    }

    if let Some(instant) = parse_date_time(value, params.tzid) {
        return Resolved {
            instant: Some(instant),
            all_day: false,
        };
    }

    // Some feeds put bare dates in DTSTART without VALUE=DATE.
    parse_date(value).map_or(Resolved::ABSENT, Resolved::date)
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

fn midnight(date: NaiveDate) -> DateTime<FixedOffset> {
    date.and_time(NaiveTime::default()).and_utc().fixed_offset()
}

fn parse_date_time(value: &str, tzid: Option<&str>) -> Option<DateTime<FixedOffset>> {
    if let Some(utc) = value.strip_suffix('Z') {
        let naive = NaiveDateTime::parse_from_str(utc, DATE_TIME_FORMAT).ok()?;
        return Some(naive.and_utc().fixed_offset());
    }

    let naive = NaiveDateTime::parse_from_str(value, DATE_TIME_FORMAT).ok()?;

    match tzid.and_then(lookup_zone) {
        Some(zone) => localize(&zone, naive),
        None => localize(&Local, naive),
    }
}

fn lookup_zone(tzid: &str) -> Option<Tz> {
    tzid.trim().trim_matches('"').parse::<Tz>().ok()
}

/// Pin a wall-clock time to `zone`.
///
/// Ambiguous times (DST fall-back) take the earlier instant. Times inside a
/// DST gap are read with the offset in effect before the gap, which moves
/// them forward by the gap length.
fn localize<Z: TimeZone>(zone: &Z, naive: NaiveDateTime) -> Option<DateTime<FixedOffset>> {
    match zone.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt.fixed_offset()),
        LocalResult::Ambiguous(earliest, _) => Some(earliest.fixed_offset()),
        LocalResult::None => {
            let before = zone
                .from_local_datetime(&(naive - Duration::hours(3)))
                .earliest()?;
            let offset = before.offset().fix().local_minus_utc();
            let utc = naive - Duration::seconds(i64::from(offset));
            Some(zone.from_utc_datetime(&utc).fixed_offset())
        }
    }
}
